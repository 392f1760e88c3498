//! Entry domain model.
//!
//! # Responsibility
//! - Define the single board record shared by the note and task columns.
//! - Define draft/patch shapes used by create and partial update paths.
//! - Provide lifecycle helpers for soft-delete semantics.
//!
//! # Invariants
//! - `id` is assigned once by the backend and never reused.
//! - `deleted_at` is the source of truth for tombstone state.
//! - `order_rank` is only comparable between entries of the same kind.
//! - `width` and `height` are strictly positive.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a board entry.
pub type EntryId = Uuid;

/// Epoch milliseconds as stored by the backend.
pub type Timestamp = i64;

/// Discriminator for the board column an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Free-form text note.
    Note,
    /// Checkable task.
    Task,
}

impl EntryKind {
    /// Column name used in the backend `kind` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Note => "note",
            Self::Task => "task",
        }
    }

    /// Parses the backend `kind` column value.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "note" => Some(Self::Note),
            "task" => Some(Self::Task),
            _ => None,
        }
    }

    /// Column heading shown by frontends.
    pub fn title(self) -> &'static str {
        match self {
            Self::Note => "Notes",
            Self::Task => "Tasks",
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for entry write shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryValidationError {
    /// `width` must be greater than zero.
    NonPositiveWidth(i64),
    /// `height` must be greater than zero.
    NonPositiveHeight(i64),
    /// A patch must carry at least one field.
    EmptyPatch,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveWidth(value) => write!(f, "width must be positive, got {value}"),
            Self::NonPositiveHeight(value) => write!(f, "height must be positive, got {value}"),
            Self::EmptyPatch => write!(f, "update patch carries no fields"),
        }
    }
}

impl Error for EntryValidationError {}

/// In-memory board entry.
///
/// Serialized with camel-cased field names for frontends; the backend row
/// shape lives in [`crate::model::row::EntryRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub content: String,
    /// Meaningful only when `kind == EntryKind::Task`.
    pub is_done: bool,
    pub order_rank: i64,
    pub width: i64,
    pub height: i64,
    /// Non-null means soft-deleted.
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Entry {
    /// Returns whether this entry shows up in the default listing.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }

    /// Marks this entry as softly deleted at `now`.
    pub fn soft_delete(&mut self, now: Timestamp) {
        self.deleted_at = Some(now);
    }

    /// Clears the soft-delete marker.
    pub fn restore(&mut self) {
        self.deleted_at = None;
    }

    /// Merges a patch into this entry, leaving absent fields untouched.
    pub fn apply_patch(&mut self, patch: &EntryPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(is_done) = patch.is_done {
            self.is_done = is_done;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
    }

    /// Returns the user-supplied part of this entry.
    pub fn to_draft(&self) -> EntryDraft {
        EntryDraft {
            kind: self.kind,
            content: self.content.clone(),
            is_done: self.is_done,
            width: self.width,
            height: self.height,
        }
    }
}

/// User-supplied fields for a new entry.
///
/// Id, rank and timestamps are defaulted by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    pub kind: EntryKind,
    pub content: String,
    pub is_done: bool,
    pub width: i64,
    pub height: i64,
}

impl EntryDraft {
    /// Creates a not-done draft with the given tile size.
    pub fn new(kind: EntryKind, content: impl Into<String>, width: i64, height: i64) -> Self {
        Self {
            kind,
            content: content.into(),
            is_done: false,
            width,
            height,
        }
    }

    /// Validates size invariants before persistence.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_width(self.width)?;
        validate_height(self.height)
    }
}

/// Partial field set for an update. `None` means "leave unchanged".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_done: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

impl EntryPatch {
    pub fn content(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    pub fn done(is_done: bool) -> Self {
        Self {
            is_done: Some(is_done),
            ..Self::default()
        }
    }

    pub fn height(height: i64) -> Self {
        Self {
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.kind.is_none()
            && self.content.is_none()
            && self.is_done.is_none()
            && self.width.is_none()
            && self.height.is_none()
    }

    /// Rejects empty patches and non-positive sizes.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.is_empty() {
            return Err(EntryValidationError::EmptyPatch);
        }
        if let Some(width) = self.width {
            validate_width(width)?;
        }
        if let Some(height) = self.height {
            validate_height(height)?;
        }
        Ok(())
    }
}

fn validate_width(width: i64) -> Result<(), EntryValidationError> {
    if width <= 0 {
        return Err(EntryValidationError::NonPositiveWidth(width));
    }
    Ok(())
}

fn validate_height(height: i64) -> Result<(), EntryValidationError> {
    if height <= 0 {
        return Err(EntryValidationError::NonPositiveHeight(height));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryKind, EntryPatch, EntryValidationError};
    use uuid::Uuid;

    fn sample() -> Entry {
        Entry {
            id: Uuid::new_v4(),
            kind: EntryKind::Task,
            content: "water plants".to_string(),
            is_done: false,
            order_rank: 3,
            width: 200,
            height: 60,
            deleted_at: None,
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn apply_patch_only_touches_present_fields() {
        let mut entry = sample();
        entry.apply_patch(&EntryPatch::done(true));

        assert!(entry.is_done);
        assert_eq!(entry.content, "water plants");
        assert_eq!(entry.height, 60);
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert_eq!(
            EntryPatch::default().validate(),
            Err(EntryValidationError::EmptyPatch)
        );
        assert_eq!(
            EntryPatch::height(0).validate(),
            Err(EntryValidationError::NonPositiveHeight(0))
        );
    }

    #[test]
    fn kind_parses_only_known_values() {
        assert_eq!(EntryKind::parse("note"), Some(EntryKind::Note));
        assert_eq!(EntryKind::parse("task"), Some(EntryKind::Task));
        assert_eq!(EntryKind::parse("event"), None);
    }
}
