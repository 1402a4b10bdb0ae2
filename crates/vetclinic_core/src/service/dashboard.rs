//! Dashboard summary loading.
//!
//! # Responsibility
//! - Gather headline totals, the weekly schedule and every domain digest in
//!   one read-only pass.
//! - Optionally run that pass on a worker thread with its own connection.
//!
//! # Invariants
//! - Loading never writes.
//! - All date arithmetic uses the injected clock.

use super::notification::{DigestSource, DomainDigest, NotificationAggregator};
use crate::clock::{Clock, DateWindow};
use crate::db::open_db;
use crate::model::appointment::{Appointment, AppointmentFields};
use crate::model::boarder::Boarder;
use crate::model::item::Item;
use crate::model::kennel::Kennel;
use crate::model::lab::Lab;
use crate::model::patient::Patient;
use crate::model::personnel::Personnel;
use crate::model::record::Record;
use crate::model::transaction::{Transaction, TransactionFields, TransactionStatus};
use crate::repo::{RecordStore, RepoError, RepoResult, SqliteRecordStore};
use log::{info, warn};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use std::time::Instant;

const COUNTER_MAX: u64 = 99;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub week: DateWindow,
    pub week_label: String,
    pub total_patients: u64,
    pub total_personnel: u64,
    pub total_boarders: u64,
    /// Sum of `Captured` transaction amounts.
    pub earnings: Decimal,
    /// Appointments dated inside `week`, in insertion order.
    pub weekly_schedule: Vec<Record<AppointmentFields>>,
    /// One digest per domain, patients first.
    pub digests: Vec<DomainDigest>,
}

impl DashboardSummary {
    pub fn earnings_label(&self) -> String {
        format_earnings(self.earnings)
    }
}

/// Renders an earnings total as `₱x.xxM`, `₱x.xxK` or `₱x.xx`.
pub fn format_earnings(total: Decimal) -> String {
    let million = Decimal::from(1_000_000);
    let thousand = Decimal::from(1_000);
    let magnitude = total.abs();
    if magnitude >= million {
        format!("₱{:.2}M", total / million)
    } else if magnitude >= thousand {
        format!("₱{:.2}K", total / thousand)
    } else {
        format!("₱{total:.2}")
    }
}

/// Two-digit dashboard counter, saturating at `99`.
pub fn counter_label(count: u64) -> String {
    format!("{:02}", count.min(COUNTER_MAX))
}

/// Loads the dashboard from an already migrated connection.
pub fn load_dashboard<C: Clock>(conn: &Connection, clock: C) -> RepoResult<DashboardSummary> {
    let started_at = Instant::now();
    match load_summary(conn, clock) {
        Ok(summary) => {
            info!(
                "event=dashboard_load module=service status=ok duration_ms={} digests={}",
                started_at.elapsed().as_millis(),
                summary.digests.len()
            );
            Ok(summary)
        }
        Err(err) => {
            warn!(
                "event=dashboard_load module=service status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

/// Loads the dashboard on a worker thread that opens `db_path` itself.
pub fn spawn_dashboard_load<C>(
    db_path: impl Into<PathBuf>,
    clock: C,
) -> JoinHandle<RepoResult<DashboardSummary>>
where
    C: Clock + Send + 'static,
{
    let db_path = db_path.into();
    thread::spawn(move || -> RepoResult<DashboardSummary> {
        let conn = open_db(&db_path)?;
        load_dashboard(&conn, clock)
    })
}

/// Sums `Captured` amounts; a total outside the decimal range is an error.
fn captured_earnings(transactions: &[Record<TransactionFields>]) -> RepoResult<Decimal> {
    transactions
        .iter()
        .filter(|record| record.fields.status == TransactionStatus::Captured)
        .try_fold(Decimal::ZERO, |total, record| {
            total.checked_add(record.fields.amount).ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "earnings overflow adding transaction {}",
                    record.id
                ))
            })
        })
}

fn load_summary<C: Clock>(conn: &Connection, clock: C) -> RepoResult<DashboardSummary> {
    let patients = SqliteRecordStore::<Patient>::try_new(conn)?;
    let boarders = SqliteRecordStore::<Boarder>::try_new(conn)?;
    let appointments = SqliteRecordStore::<Appointment>::try_new(conn)?;
    let items = SqliteRecordStore::<Item>::try_new(conn)?;
    let kennels = SqliteRecordStore::<Kennel>::try_new(conn)?;
    let labs = SqliteRecordStore::<Lab>::try_new(conn)?;
    let personnel = SqliteRecordStore::<Personnel>::try_new(conn)?;
    let transactions = SqliteRecordStore::<Transaction>::try_new(conn)?;

    let week = DateWindow::week_containing(clock.today());
    let earnings = captured_earnings(&transactions.list()?)?;

    let sources: [&dyn DigestSource; 8] = [
        &patients,
        &boarders,
        &appointments,
        &items,
        &kennels,
        &labs,
        &personnel,
        &transactions,
    ];
    let digests = NotificationAggregator::new(&clock).collect(&sources)?;

    Ok(DashboardSummary {
        week,
        week_label: week.label(),
        total_patients: patients.count()?,
        total_personnel: personnel.count()?,
        total_boarders: boarders.count()?,
        earnings,
        weekly_schedule: appointments.list_recent(week)?,
        digests,
    })
}
