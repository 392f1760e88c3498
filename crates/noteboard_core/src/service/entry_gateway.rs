//! CRUD gateway between board state and the entry table.
//!
//! # Responsibility
//! - Translate board operations into single backend round trips.
//! - Stamp `updated_at`/`deleted_at` from the injected clock.
//! - Own the read-failure policy: listing never fails, it logs and
//!   returns an empty board.
//!
//! # Invariants
//! - `list()` only returns entries whose `deleted_at` is null, ordered by
//!   `order_rank` ascending.
//! - `reorder()` writes dense ranks `0..n-1` in sequence order.
//! - Write failures are propagated unchanged; there is no retry.

use crate::clock::Clock;
use crate::model::entry::{Entry, EntryDraft, EntryId, EntryPatch, Timestamp};
use crate::model::row::EntryRow;
use crate::repo::entry_repo::{EntryListQuery, EntryRepository, RepoResult};
use log::{debug, error, info};

/// Use-case gateway over an [`EntryRepository`].
pub struct EntryGateway<R: EntryRepository, C: Clock> {
    repo: R,
    clock: C,
}

impl<R: EntryRepository, C: Clock> EntryGateway<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Lists visible entries ordered by rank.
    ///
    /// Backend errors are logged and reported as an empty list.
    pub fn list(&self) -> Vec<Entry> {
        match self.repo.list_entries(&EntryListQuery::default()) {
            Ok(entries) => {
                debug!(
                    "event=entry_list module=gateway status=ok count={}",
                    entries.len()
                );
                entries
            }
            Err(err) => {
                error!(
                    "event=entry_list module=gateway status=error error_code=list_failed error={}",
                    err
                );
                Vec::new()
            }
        }
    }

    /// Lists entries with explicit filters; unlike [`Self::list`] errors
    /// are propagated.
    pub fn list_with(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        self.repo.list_entries(query)
    }

    pub fn get(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<Entry>> {
        self.repo.get_entry(id, include_deleted)
    }

    /// Inserts a new entry; id, rank and timestamps come from the backend.
    pub fn create(&self, draft: &EntryDraft) -> RepoResult<Entry> {
        let result = self.repo.insert_entry(draft);
        match &result {
            Ok(entry) => info!(
                "event=entry_create module=gateway status=ok id={} kind={}",
                entry.id, entry.kind
            ),
            Err(err) => error!(
                "event=entry_create module=gateway status=error kind={} error={}",
                draft.kind, err
            ),
        }
        result
    }

    /// Sends only the patched fields plus a refreshed `updated_at`.
    pub fn update(&self, id: EntryId, patch: &EntryPatch) -> RepoResult<Entry> {
        let result = self.repo.update_entry(id, patch, self.clock.now_ms());
        log_write("entry_update", id, &result);
        result
    }

    /// Sets `deleted_at` to the current time.
    pub fn soft_delete(&self, id: EntryId) -> RepoResult<()> {
        let result = self.repo.set_deleted_at(id, Some(self.clock.now_ms()));
        log_write("entry_soft_delete", id, &result);
        result
    }

    /// Clears `deleted_at`.
    pub fn restore(&self, id: EntryId) -> RepoResult<()> {
        let result = self.repo.set_deleted_at(id, None);
        log_write("entry_restore", id, &result);
        result
    }

    /// Persists `order_rank = index` for every entry of `ordered` in one
    /// batch upsert.
    pub fn reorder(&self, ordered: &[Entry]) -> RepoResult<()> {
        let rows = rank_rows(ordered, self.clock.now_ms());
        let result = self.repo.upsert_entries(&rows);
        match &result {
            Ok(()) => info!(
                "event=entry_reorder module=gateway status=ok count={}",
                rows.len()
            ),
            Err(err) => error!(
                "event=entry_reorder module=gateway status=error count={} error={}",
                rows.len(),
                err
            ),
        }
        result
    }
}

/// Builds upsert rows carrying dense positional ranks.
pub fn rank_rows(ordered: &[Entry], updated_at: Timestamp) -> Vec<EntryRow> {
    ordered
        .iter()
        .zip(0_i64..)
        .map(|(entry, rank)| {
            let mut row = EntryRow::from(entry);
            row.order_rank = rank;
            row.updated_at = updated_at;
            row
        })
        .collect()
}

fn log_write<T>(event: &str, id: EntryId, result: &RepoResult<T>) {
    match result {
        Ok(_) => info!("event={event} module=gateway status=ok id={id}"),
        Err(err) => error!("event={event} module=gateway status=error id={id} error={err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::rank_rows;
    use crate::model::entry::{Entry, EntryKind};
    use uuid::Uuid;

    fn entry(rank: i64) -> Entry {
        Entry {
            id: Uuid::new_v4(),
            kind: EntryKind::Note,
            content: format!("rank {rank}"),
            is_done: false,
            order_rank: rank,
            width: 200,
            height: 60,
            deleted_at: None,
            created_at: 10,
            updated_at: 10,
        }
    }

    #[test]
    fn rank_rows_rewrites_ranks_densely_in_sequence_order() {
        let ordered = vec![entry(7), entry(2), entry(2)];
        let rows = rank_rows(&ordered, 99);

        let ranks: Vec<i64> = rows.iter().map(|row| row.order_rank).collect();
        assert_eq!(ranks, vec![0, 1, 2]);
        assert!(rows.iter().all(|row| row.updated_at == 99));
        assert!(rows.iter().all(|row| row.created_at == 10));
        assert_eq!(rows[1].id, ordered[1].id.to_string());
    }
}
