//! Core domain logic for Chorebook.
//! This crate is the single source of truth for chore period and completion rules.

pub mod clock;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::child::{Child, ChildId, ChildPatch, ChildValidationError};
pub use model::chore::{Chore, ChoreId, ChorePatch, ChoreValidationError, Frequency};
pub use model::completion::{Completion, CompletionOutcome};
pub use model::period::{period_start, Period};
pub use repo::child_repo::{ChildRepository, SqliteChildRepository};
pub use repo::chore_repo::{ChoreRepository, SqliteChoreRepository};
pub use repo::history_repo::{HistoryRepository, SqliteHistoryRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::{RepoError, RepoResult};
pub use service::child_service::ChildService;
pub use service::chore_service::ChoreService;
pub use service::due_state::{ChoreDueState, DueStateResolver};
pub use service::history_service::{ChildHistoryDay, HistoryDay, HistoryService};
pub use service::ledger::CompletionLedger;
pub use service::lifecycle::ChoreLifecycle;
pub use service::pin_service::{PinError, PinService};
pub use service::{ServiceError, ServiceErrorKind, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
