//! Backend row shape and its mapping to [`Entry`].
//!
//! Column names are underscore-separated and match the `entries` table.
//! The conversion is a pure field mapping; only unparseable ids and kinds
//! are rejected.

use crate::model::entry::{Entry, EntryKind, Timestamp};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One row of the `entries` table as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRow {
    pub id: String,
    pub kind: String,
    pub content: String,
    pub is_done: bool,
    pub order_rank: i64,
    pub width: i64,
    pub height: i64,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row that cannot be mapped into the domain model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowMappingError {
    InvalidId(String),
    InvalidKind(String),
}

impl Display for RowMappingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid id value `{value}` in entries.id"),
            Self::InvalidKind(value) => write!(f, "invalid kind `{value}` in entries.kind"),
        }
    }
}

impl Error for RowMappingError {}

impl From<&Entry> for EntryRow {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.to_string(),
            kind: entry.kind.as_str().to_string(),
            content: entry.content.clone(),
            is_done: entry.is_done,
            order_rank: entry.order_rank,
            width: entry.width,
            height: entry.height,
            deleted_at: entry.deleted_at,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl TryFrom<EntryRow> for Entry {
    type Error = RowMappingError;

    fn try_from(row: EntryRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|_| RowMappingError::InvalidId(row.id.clone()))?;
        let kind =
            EntryKind::parse(&row.kind).ok_or_else(|| RowMappingError::InvalidKind(row.kind.clone()))?;

        Ok(Self {
            id,
            kind,
            content: row.content,
            is_done: row.is_done,
            order_rank: row.order_rank,
            width: row.width,
            height: row.height,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
