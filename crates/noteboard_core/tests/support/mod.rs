#![allow(dead_code)]

use noteboard_core::db::DbError;
use noteboard_core::{
    Entry, EntryDraft, EntryId, EntryListQuery, EntryPatch, EntryRepository, EntryRow, RepoError,
    RepoResult, SqliteEntryRepository,
};
use std::cell::RefCell;
use std::collections::HashSet;

/// Repository operations a test can count or force to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Get,
    Insert,
    Update,
    SetDeletedAt,
    Upsert,
}

/// Wraps the SQLite repository, records every call and fails on demand.
pub struct RecordingRepository<'conn> {
    inner: SqliteEntryRepository<'conn>,
    calls: RefCell<Vec<Op>>,
    failing: RefCell<HashSet<Op>>,
    updates: RefCell<Vec<(EntryId, EntryPatch)>>,
}

impl<'conn> RecordingRepository<'conn> {
    pub fn new(conn: &'conn rusqlite::Connection) -> Self {
        Self {
            inner: SqliteEntryRepository::new(conn),
            calls: RefCell::new(Vec::new()),
            failing: RefCell::new(HashSet::new()),
            updates: RefCell::new(Vec::new()),
        }
    }

    pub fn fail(&self, op: Op) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn heal(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    pub fn count(&self, op: Op) -> usize {
        self.calls.borrow().iter().filter(|call| **call == op).count()
    }

    pub fn updates(&self) -> Vec<(EntryId, EntryPatch)> {
        self.updates.borrow().clone()
    }

    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
        self.updates.borrow_mut().clear();
    }

    fn record(&self, op: Op) -> RepoResult<()> {
        self.calls.borrow_mut().push(op);
        if self.failing.borrow().contains(&op) {
            return Err(RepoError::Db(DbError::Sqlite(
                rusqlite::Error::InvalidQuery,
            )));
        }
        Ok(())
    }
}

impl EntryRepository for RecordingRepository<'_> {
    fn list_entries(&self, query: &EntryListQuery) -> RepoResult<Vec<Entry>> {
        self.record(Op::List)?;
        self.inner.list_entries(query)
    }

    fn get_entry(&self, id: EntryId, include_deleted: bool) -> RepoResult<Option<Entry>> {
        self.record(Op::Get)?;
        self.inner.get_entry(id, include_deleted)
    }

    fn insert_entry(&self, draft: &EntryDraft) -> RepoResult<Entry> {
        self.record(Op::Insert)?;
        self.inner.insert_entry(draft)
    }

    fn update_entry(&self, id: EntryId, patch: &EntryPatch, updated_at: i64) -> RepoResult<Entry> {
        self.record(Op::Update)?;
        self.updates.borrow_mut().push((id, patch.clone()));
        self.inner.update_entry(id, patch, updated_at)
    }

    fn set_deleted_at(&self, id: EntryId, deleted_at: Option<i64>) -> RepoResult<()> {
        self.record(Op::SetDeletedAt)?;
        self.inner.set_deleted_at(id, deleted_at)
    }

    fn upsert_entries(&self, rows: &[EntryRow]) -> RepoResult<()> {
        self.record(Op::Upsert)?;
        self.inner.upsert_entries(rows)
    }
}
