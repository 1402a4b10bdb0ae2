//! Core records engine for the veterinary clinic.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validate;

pub use clock::{Clock, DateWindow, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use db::{open_db, open_db_in_memory, DbError, DbHandle, DbResult, DbSource};
pub use logging::{default_log_level, init_logging, LogLevel, LoggingError};
pub use model::domain::Domain;
pub use model::ids::{IdGenerator, IdSource, ReceiptNo};
pub use model::record::{DomainKind, Record, RecordId};
pub use repo::{InsertOutcome, RecordStore, RepoError, RepoResult, SqliteRecordStore};
pub use service::{
    load_dashboard, spawn_dashboard_load, Confirmation, DashboardSummary, DeleteOutcome,
    LifecycleError, LifecycleResult, ListView, RecordService, SaveOutcome, Selection,
};
pub use validate::{ValidationError, ValidationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
