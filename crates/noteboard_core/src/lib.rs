//! Core domain logic for the noteboard.
//! This crate is the single source of truth for board invariants.

pub mod board;
pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;

pub use board::card::{CardEditor, CardMode, ResizeHandle};
pub use board::collision::{closest_center, Rect};
pub use board::controller::{Board, BoardCommand, BoardError, BoardResult};
pub use board::reorder::{array_move, plan_reorder};
pub use board::view::{filter_kind, layout, LayoutMetrics, Slot, ViewMode};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{BoardConfig, BoardSettings, ConfigError};
pub use logging::{default_log_level, init_logging, init_stderr_logging, logging_status, LogTarget};
pub use model::entry::{Entry, EntryDraft, EntryId, EntryKind, EntryPatch, EntryValidationError};
pub use model::row::EntryRow;
pub use notify::{
    Notification, NotificationCenter, NotificationId, NotificationVariant, ShowOptions,
};
pub use repo::entry_repo::{
    EntryListQuery, EntryRepository, RepoError, RepoResult, SqliteEntryRepository,
};
pub use service::entry_gateway::EntryGateway;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
