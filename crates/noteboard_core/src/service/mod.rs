//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into board-level operations.
//! - Keep board/frontend layers decoupled from storage details.

pub mod entry_gateway;
