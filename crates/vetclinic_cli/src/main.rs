//! CLI smoke entry point.
//!
//! # Responsibility
//! - Open the configured clinic database and print the dashboard digest.
//! - Keep output deterministic enough for quick local sanity checks.

use log::error;
use std::process::ExitCode;
use vetclinic_core::service::counter_label;
use vetclinic_core::{
    core_version, init_logging, load_dashboard, CoreConfig, DbHandle, DbSource, RepoError,
    SystemClock,
};

fn main() -> ExitCode {
    let config = CoreConfig::from_env();
    // Logging is best effort; the dashboard still prints without a log sink.
    if let Err(err) = init_logging(&config) {
        eprintln!("logging disabled: {err}");
    }

    println!("vetclinic_core version={}", core_version());

    let mut handle = DbHandle::new(DbSource::File(config.db_path.clone()));
    let summary = match handle
        .connection()
        .map_err(RepoError::from)
        .and_then(|conn| load_dashboard(conn, SystemClock))
    {
        Ok(summary) => summary,
        Err(err) => {
            error!("event=cli_dashboard module=cli status=error error={err}");
            eprintln!("failed to load dashboard: {err}");
            return ExitCode::FAILURE;
        }
    };

    println!("week: {}", summary.week_label);
    println!("patients: {}", counter_label(summary.total_patients));
    println!("personnel: {}", counter_label(summary.total_personnel));
    println!("boarders: {}", counter_label(summary.total_boarders));
    println!("earnings: {}", summary.earnings_label());
    println!(
        "appointments this week: {}",
        counter_label(summary.weekly_schedule.len() as u64)
    );
    for digest in &summary.digests {
        println!("[{}] {}", digest.kind, digest.text);
    }

    if let Err(err) = handle.close() {
        eprintln!("failed to close database: {err}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
