//! Card editor and resize state machines.
//!
//! # Responsibility
//! - Track whether a card is being viewed or edited and what the edit
//!   buffer holds.
//! - Decide, on blur, whether an update must be issued.
//! - Track an interactive vertical resize and report the final height.
//!
//! # Invariants
//! - Blur yields new content only when the buffer differs from the content
//!   the editing session started from.
//! - Resized height always stays within `[MIN_CARD_HEIGHT, MAX_CARD_HEIGHT]`.
//! - Width never changes through a resize.
//! - A live resize height is only overwritten by a persisted size that
//!   itself moved by at least the re-sync tolerance, and never mid-drag.

use crate::model::entry::{Entry, EntryId};
use serde::Serialize;

pub const MIN_CARD_HEIGHT: i64 = 40;
pub const MAX_CARD_HEIGHT: i64 = 2_000;
/// Rendered size for entries persisted without a usable width/height.
pub const FALLBACK_CARD_SIZE: i64 = 200;
/// Persisted size changes smaller than this are not re-synced.
pub const RESYNC_TOLERANCE_PX: i64 = 2;

/// Width/height a card is drawn with.
pub fn display_size(entry: &Entry) -> (i64, i64) {
    (or_fallback(entry.width), or_fallback(entry.height))
}

fn or_fallback(value: i64) -> i64 {
    if value > 0 {
        value
    } else {
        FALLBACK_CARD_SIZE
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardMode {
    Viewing,
    Editing,
}

/// Inline text editor for one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardEditor {
    entry_id: EntryId,
    content: String,
    buffer: String,
    mode: CardMode,
}

impl CardEditor {
    pub fn new(entry: &Entry) -> Self {
        Self {
            entry_id: entry.id,
            content: entry.content.clone(),
            buffer: entry.content.clone(),
            mode: CardMode::Viewing,
        }
    }

    pub fn entry_id(&self) -> EntryId {
        self.entry_id
    }

    pub fn mode(&self) -> CardMode {
        self.mode
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Selection puts the card into editing.
    pub fn select(&mut self) {
        if self.mode == CardMode::Viewing {
            self.buffer = self.content.clone();
            self.mode = CardMode::Editing;
        }
    }

    /// Replaces the edit buffer. Ignored while viewing.
    pub fn input(&mut self, text: impl Into<String>) {
        if self.mode == CardMode::Editing {
            self.buffer = text.into();
        }
    }

    /// Leaves editing. Returns the new content when it changed.
    pub fn blur(&mut self) -> Option<String> {
        if self.mode != CardMode::Editing {
            return None;
        }
        self.mode = CardMode::Viewing;
        if self.buffer == self.content {
            return None;
        }
        self.content = self.buffer.clone();
        Some(self.buffer.clone())
    }

    /// Takes in content coming back from the store.
    ///
    /// While editing the buffer is left alone so typing is not clobbered.
    pub fn sync_content(&mut self, content: &str) {
        self.content = content.to_string();
        if self.mode == CardMode::Viewing {
            self.buffer = content.to_string();
        }
    }
}

/// Vertical-only resize session for a tile card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeHandle {
    width: i64,
    height: i64,
    /// Persisted size this handle last took in.
    stored: (i64, i64),
    drag_origin: Option<i64>,
}

impl ResizeHandle {
    pub fn new(entry: &Entry) -> Self {
        let (width, height) = display_size(entry);
        Self {
            width,
            height,
            stored: (width, height),
            drag_origin: None,
        }
    }

    pub fn size(&self) -> (i64, i64) {
        (self.width, self.height)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }

    pub fn begin(&mut self) {
        self.drag_origin = Some(self.height);
    }

    /// Applies the pointer offset since `begin` and returns the live height.
    pub fn drag_to(&mut self, dy: i64) -> i64 {
        if let Some(origin) = self.drag_origin {
            self.height = clamp_height(origin.saturating_add(dy));
        }
        self.height
    }

    /// Finishes the drag and reports the height to persist.
    pub fn end(&mut self) -> Option<i64> {
        self.drag_origin.take().map(|_| self.height)
    }

    /// Re-reads the persisted size.
    ///
    /// Only a persisted change of at least [`RESYNC_TOLERANCE_PX`] against
    /// the last persisted size is taken in, and never mid-drag.
    pub fn sync_from_entry(&mut self, entry: &Entry) {
        if self.is_dragging() {
            return;
        }
        let (width, height) = display_size(entry);
        let (stored_width, stored_height) = self.stored;
        if (stored_width - width).abs() < RESYNC_TOLERANCE_PX
            && (stored_height - height).abs() < RESYNC_TOLERANCE_PX
        {
            return;
        }
        self.stored = (width, height);
        self.width = width;
        self.height = height;
    }
}

pub fn clamp_height(height: i64) -> i64 {
    height.clamp(MIN_CARD_HEIGHT, MAX_CARD_HEIGHT)
}
