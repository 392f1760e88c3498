//! Entry table contracts and SQLite implementation.
//!
//! # Responsibility
//! - Expose the backend boundary the gateway talks to: select, insert,
//!   partial update, tombstone toggle and batch upsert over `entries`.
//! - Keep SQL details and row parsing inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate drafts/patches before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Ids are generated here, on insert, and never by callers.

use crate::db::DbError;
use crate::model::entry::{
    Entry, EntryDraft, EntryId, EntryKind, EntryPatch, EntryValidationError, Timestamp,
};
use crate::model::row::EntryRow;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    kind,
    content,
    is_done,
    order_rank,
    width,
    height,
    deleted_at,
    created_at,
    updated_at
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    NotFound(EntryId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Query options for listing entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryListQuery {
    pub kind: Option<EntryKind>,
    pub include_deleted: bool,
}

/// Backend table boundary for entries.
///
/// Every method is one round trip. Listing order is `order_rank ASC`, then
/// `created_at ASC`, then `id ASC`.
pub trait EntryRepository {
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>>;
    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<Entry>>;
    /// Inserts the draft with a fresh id, rank 0 and backend timestamps.
    fn insert_entry(&self, draft: &EntryDraft) -> RepoResult<Entry>;
    /// Writes only the fields present in `patch` plus `updated_at`.
    fn update_entry(&self, id: EntryId, patch: &EntryPatch, updated_at: Timestamp)
        -> RepoResult<Entry>;
    /// Sets or clears the tombstone; `None` restores.
    fn set_deleted_at(&self, id: EntryId, deleted_at: Option<Timestamp>) -> RepoResult<()>;
    /// Inserts or replaces every row by id.
    fn upsert_entries(&self, rows: &[EntryRow]) -> RepoResult<()>;
}

impl<R: EntryRepository + ?Sized> EntryRepository for &R {
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        (**self).list_entries(query)
    }

    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<Entry>> {
        (**self).get_entry(id, include_deleted)
    }

    fn insert_entry(&self, draft: &EntryDraft) -> RepoResult<Entry> {
        (**self).insert_entry(draft)
    }

    fn update_entry(
        &self,
        id: EntryId,
        patch: &EntryPatch,
        updated_at: Timestamp,
    ) -> RepoResult<Entry> {
        (**self).update_entry(id, patch, updated_at)
    }

    fn set_deleted_at(&self, id: EntryId, deleted_at: Option<Timestamp>) -> RepoResult<()> {
        (**self).set_deleted_at(id, deleted_at)
    }

    fn upsert_entries(&self, rows: &[EntryRow]) -> RepoResult<()> {
        (**self).upsert_entries(rows)
    }
}

/// SQLite-backed entry table.
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        let mut sql = format!("{ENTRY_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_deleted {
            sql.push_str(" AND deleted_at IS NULL");
        }

        if let Some(kind) = query.kind {
            sql.push_str(" AND kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }

        sql.push_str(" ORDER BY order_rank ASC, created_at ASC, id ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            entries.push(parse_entry_row(row)?);
        }

        Ok(entries)
    }

    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ENTRY_SELECT_SQL}
             WHERE id = ?1
               AND (?2 = 1 OR deleted_at IS NULL);"
        ))?;

        let mut rows = stmt.query(params![id.to_string(), bool_to_int(include_deleted)])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn insert_entry(&self, draft: &EntryDraft) -> RepoResult<Entry> {
        draft.validate()?;

        let id = Uuid::new_v4();
        self.conn.execute(
            "INSERT INTO entries (
                id,
                kind,
                content,
                is_done,
                width,
                height
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                id.to_string(),
                draft.kind.as_str(),
                draft.content.as_str(),
                bool_to_int(draft.is_done),
                draft.width,
                draft.height,
            ],
        )?;

        self.get_entry(id, true)?
            .ok_or_else(|| RepoError::InvalidData(format!("inserted entry {id} not readable")))
    }

    fn update_entry(
        &self,
        id: EntryId,
        patch: &EntryPatch,
        updated_at: Timestamp,
    ) -> RepoResult<Entry> {
        patch.validate()?;

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(kind) = patch.kind {
            assignments.push("kind = ?");
            bind_values.push(Value::Text(kind.as_str().to_string()));
        }
        if let Some(content) = &patch.content {
            assignments.push("content = ?");
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(is_done) = patch.is_done {
            assignments.push("is_done = ?");
            bind_values.push(Value::Integer(bool_to_int(is_done)));
        }
        if let Some(width) = patch.width {
            assignments.push("width = ?");
            bind_values.push(Value::Integer(width));
        }
        if let Some(height) = patch.height {
            assignments.push("height = ?");
            bind_values.push(Value::Integer(height));
        }
        assignments.push("updated_at = ?");
        bind_values.push(Value::Integer(updated_at));
        bind_values.push(Value::Text(id.to_string()));

        let sql = format!(
            "UPDATE entries SET {} WHERE id = ?;",
            assignments.join(", ")
        );
        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.get_entry(id, true)?.ok_or(RepoError::NotFound(id))
    }

    fn set_deleted_at(&self, id: EntryId, deleted_at: Option<Timestamp>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE entries SET deleted_at = ?1 WHERE id = ?2;",
            params![deleted_at, id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn upsert_entries(&self, rows: &[EntryRow]) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries (
                    id,
                    kind,
                    content,
                    is_done,
                    order_rank,
                    width,
                    height,
                    deleted_at,
                    created_at,
                    updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(id) DO UPDATE SET
                    kind = excluded.kind,
                    content = excluded.content,
                    is_done = excluded.is_done,
                    order_rank = excluded.order_rank,
                    width = excluded.width,
                    height = excluded.height,
                    deleted_at = excluded.deleted_at,
                    updated_at = excluded.updated_at;",
            )?;

            for row in rows {
                if EntryKind::parse(&row.kind).is_none() {
                    return Err(RepoError::InvalidData(format!(
                        "refusing to upsert unknown kind `{}`",
                        row.kind
                    )));
                }
                stmt.execute(params![
                    row.id,
                    row.kind,
                    row.content,
                    bool_to_int(row.is_done),
                    row.order_rank,
                    row.width,
                    row.height,
                    row.deleted_at,
                    row.created_at,
                    row.updated_at,
                ])?;
            }
        }
        tx.commit()?;

        Ok(())
    }
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<Entry> {
    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in entries.is_done"
            )));
        }
    };

    let raw = EntryRow {
        id: row.get("id")?,
        kind: row.get("kind")?,
        content: row.get("content")?,
        is_done,
        order_rank: row.get("order_rank")?,
        width: row.get("width")?,
        height: row.get("height")?,
        deleted_at: row.get("deleted_at")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };

    Entry::try_from(raw).map_err(|err| RepoError::InvalidData(err.to_string()))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
