//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the backend table contract consumed by the gateway.
//! - Isolate SQLite query details from gateway/board orchestration.
//!
//! # Invariants
//! - Repository writes validate drafts and patches before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod entry_repo;
