//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate record stores into lifecycle, list-view and dashboard APIs.
//! - Keep presentation layers decoupled from storage details.

pub mod change;
pub mod dashboard;
pub mod list_view;
pub mod notification;
pub mod record_service;
pub mod selection;

pub use change::{detect_change, Change};
pub use dashboard::{
    counter_label, format_earnings, load_dashboard, spawn_dashboard_load, DashboardSummary,
};
pub use list_view::ListView;
pub use notification::{
    render_digest, DigestSource, DomainDigest, NotificationAggregator, NO_NEW_NOTIFICATIONS,
};
pub use record_service::{
    Confirmation, DeleteOutcome, LifecycleError, LifecycleResult, RecordService, SaveOutcome,
};
pub use selection::{Selection, SelectionChange};
