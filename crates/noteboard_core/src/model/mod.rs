//! Board domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the backend row shape separate from the in-memory shape.
//!
//! # Invariants
//! - Every entry is identified by a stable `EntryId`.
//! - Deletion is represented by a `deleted_at` tombstone, not hard delete.

pub mod entry;
pub mod row;
