//! In-memory entry list owned by the board.

use crate::model::entry::{Entry, EntryId, EntryKind, EntryPatch, Timestamp};

/// Entries as last fetched, plus optimistic content merges.
#[derive(Debug, Clone, Default)]
pub struct EntryStore {
    entries: Vec<Entry>,
}

impl EntryStore {
    /// Replaces the whole list with a fresh fetch.
    pub fn replace_all(&mut self, entries: Vec<Entry>) {
        self.entries = entries;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn column(&self, kind: EntryKind) -> Vec<Entry> {
        crate::board::view::filter_kind(&self.entries, kind)
    }

    /// Applies `patch` locally ahead of the backend round trip.
    ///
    /// Returns `false` when `id` is not in the store.
    pub fn merge_patch(&mut self, id: EntryId, patch: &EntryPatch, updated_at: Timestamp) -> bool {
        match self.entries.iter_mut().find(|entry| entry.id == id) {
            Some(entry) => {
                entry.apply_patch(patch);
                entry.updated_at = updated_at;
                true
            }
            None => false,
        }
    }

    /// Swaps in the backend's copy of one entry.
    pub fn upsert(&mut self, updated: Entry) {
        match self.entries.iter_mut().find(|entry| entry.id == updated.id) {
            Some(entry) => *entry = updated,
            None => self.entries.push(updated),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
