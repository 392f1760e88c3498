//! Storage for the `entries` table.
//!
//! # Responsibility
//! - Hand out SQLite connections, file-backed or in-memory, with the
//!   entries schema already at the latest version.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`; one migration per step.
//! - A connection is never returned before every pending migration ran.
//! - A database written by a newer build is refused, never downgraded.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the entries database.
#[derive(Debug)]
pub enum DbError {
    /// Driver-level failure (I/O, locking, malformed SQL, constraint).
    Sqlite(rusqlite::Error),
    /// `user_version` is ahead of the newest migration this build ships.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "entries database error: {err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "entries schema v{db_version} was written by a newer noteboard (this build knows up to v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

#[cfg(test)]
mod tests {
    use super::DbError;
    use std::error::Error;

    #[test]
    fn schema_error_names_both_versions() {
        let err = DbError::UnsupportedSchemaVersion {
            db_version: 7,
            latest_supported: 2,
        };
        let message = err.to_string();
        assert!(message.contains("v7"));
        assert!(message.contains("v2"));
        assert!(err.source().is_none());
    }

    #[test]
    fn driver_error_is_chained() {
        let err = DbError::from(rusqlite::Error::InvalidQuery);
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("entries database error"));
    }
}
