mod support;

use rust_decimal::Decimal;
use std::str::FromStr;
use support::{clock, service};
use vetclinic_core::db::{open_db, open_db_in_memory};
use vetclinic_core::model::appointment::Appointment;
use vetclinic_core::model::boarder::Boarder;
use vetclinic_core::model::kennel::Kennel;
use vetclinic_core::model::patient::Patient;
use vetclinic_core::model::personnel::Personnel;
use vetclinic_core::model::transaction::Transaction;
use vetclinic_core::service::{
    spawn_dashboard_load, DigestSource, NotificationAggregator, NO_NEW_NOTIFICATIONS,
};
use vetclinic_core::{load_dashboard, DomainKind, FixedClock, RepoError, SqliteRecordStore};

fn digest_text(source: &dyn DigestSource) -> String {
    NotificationAggregator::new(clock())
        .digest(source)
        .unwrap()
        .text
}

#[test]
fn empty_clinic_has_no_new_notifications() {
    let conn = open_db_in_memory().unwrap();
    let summary = load_dashboard(&conn, clock()).unwrap();

    assert_eq!(summary.digests.len(), DomainKind::ALL.len());
    for (digest, kind) in summary.digests.iter().zip(DomainKind::ALL) {
        assert_eq!(digest.kind, kind);
        assert_eq!(digest.text, NO_NEW_NOTIFICATIONS);
    }
}

#[test]
fn recent_window_is_sunday_through_saturday() {
    let conn = open_db_in_memory().unwrap();
    let mut patients = service::<Patient>(&conn, 1);
    patients.create(&support::patient("Sunday", "2026-10-18")).unwrap();
    patients.create(&support::patient("Saturday", "2026-10-24")).unwrap();
    patients.create(&support::patient("Stale", "2026-10-13")).unwrap();
    patients.create(&support::patient("Next", "2026-10-25")).unwrap();

    let store = SqliteRecordStore::<Patient>::try_new(&conn).unwrap();
    assert_eq!(digest_text(&store), "2 patient(s) admitted this week.");
}

#[test]
fn boarder_digest_joins_both_clauses() {
    let conn = open_db_in_memory().unwrap();
    let mut boarders = service::<Boarder>(&conn, 2);
    boarders
        .create(&support::boarder("Mingming", "2026-10-19", "2026-10-25"))
        .unwrap();
    boarders
        .create(&support::boarder("Longstay", "2026-10-01", "2026-11-30"))
        .unwrap();

    let store = SqliteRecordStore::<Boarder>::try_new(&conn).unwrap();
    assert_eq!(
        digest_text(&store),
        "You have 1 recently admitted boarder(s) and 1 boarder(s) with departure dates within the week."
    );
}

#[test]
fn overdue_boarders_still_need_attention_but_past_appointments_do_not() {
    let conn = open_db_in_memory().unwrap();
    let mut boarders = service::<Boarder>(&conn, 6);
    boarders
        .create(&support::boarder("Overstay", "2026-10-19", "2026-10-22"))
        .unwrap();
    boarders
        .create(&support::boarder("Longstay", "2026-10-01", "2026-11-30"))
        .unwrap();
    let mut appointments = service::<Appointment>(&conn, 7);
    appointments
        .create(&support::appointment("2026-10-23", "10:00", "Ongoing"))
        .unwrap();

    // Twelve days on, the first boarder is past its departure date.
    let later = NotificationAggregator::new(FixedClock(
        support::date("2026-11-02").and_hms_opt(9, 0, 0).unwrap(),
    ));
    let boarder_store = SqliteRecordStore::<Boarder>::try_new(&conn).unwrap();
    let appointment_store = SqliteRecordStore::<Appointment>::try_new(&conn).unwrap();

    let boarder_digest = later.digest(&boarder_store).unwrap();
    assert_eq!(boarder_digest.needing_attention, 1);
    assert_eq!(
        boarder_digest.text,
        "1 boarder(s) with departure dates within the week."
    );
    assert_eq!(
        later.digest(&appointment_store).unwrap().text,
        NO_NEW_NOTIFICATIONS
    );
}

#[test]
fn appointment_attention_needs_open_status_and_upcoming_date() {
    let conn = open_db_in_memory().unwrap();
    let mut appointments = service::<Appointment>(&conn, 3);
    appointments
        .create(&support::appointment("2026-10-23", "10:00", "Ongoing"))
        .unwrap();
    appointments
        .create(&support::appointment("2026-10-23", "11:00", "Completed"))
        .unwrap();
    appointments
        .create(&support::appointment("2026-11-15", "10:00", "Ongoing"))
        .unwrap();

    let store = SqliteRecordStore::<Appointment>::try_new(&conn).unwrap();
    assert_eq!(
        digest_text(&store),
        "1 appointment(s) within this week that need your attention."
    );
}

#[test]
fn status_attention_skips_nominal_values() {
    let conn = open_db_in_memory().unwrap();
    let mut kennels = service::<Kennel>(&conn, 4);
    kennels
        .create(&support::kennel("Boarding Kennel", "4", "Available for Boarding"))
        .unwrap();
    kennels
        .create(&support::kennel("Daycare Kennel", "2", "Under Cleaning"))
        .unwrap();
    let mut transactions = service::<Transaction>(&conn, 5);
    transactions
        .create(&support::transaction("100", "100", "Captured"))
        .unwrap();
    transactions
        .create(&support::transaction("200", "200", "Authorized"))
        .unwrap();
    transactions
        .create(&support::transaction("300", "0", "Pending"))
        .unwrap();

    let kennel_store = SqliteRecordStore::<Kennel>::try_new(&conn).unwrap();
    let transaction_store = SqliteRecordStore::<Transaction>::try_new(&conn).unwrap();
    assert_eq!(
        digest_text(&kennel_store),
        "1 kennel(s) that need your attention."
    );
    assert_eq!(
        digest_text(&transaction_store),
        "1 transaction(s) that need your attention."
    );
}

#[test]
fn dashboard_collects_totals_and_weekly_schedule() {
    let conn = open_db_in_memory().unwrap();
    service::<Patient>(&conn, 6)
        .create(&support::patient("Bantay", "2026-10-19"))
        .unwrap();
    service::<Personnel>(&conn, 7)
        .create(&support::personnel("Rafael Cruz", "2025-01-06"))
        .unwrap();
    let mut appointments = service::<Appointment>(&conn, 8);
    appointments
        .create(&support::appointment("2026-10-24", "15:00", "Ongoing"))
        .unwrap();
    appointments
        .create(&support::appointment("2026-10-29", "15:00", "Ongoing"))
        .unwrap();
    let mut transactions = service::<Transaction>(&conn, 9);
    transactions
        .create(&support::transaction("1500", "1500", "Captured"))
        .unwrap();
    transactions
        .create(&support::transaction("250.50", "300", "Captured"))
        .unwrap();
    transactions
        .create(&support::transaction("999", "0", "Refunded"))
        .unwrap();

    let summary = load_dashboard(&conn, clock()).unwrap();

    assert_eq!(summary.week_label, "Oct 18 - Oct 24");
    assert_eq!(summary.total_patients, 1);
    assert_eq!(summary.total_personnel, 1);
    assert_eq!(summary.total_boarders, 0);
    assert_eq!(summary.earnings, Decimal::from_str("1750.50").unwrap());
    assert_eq!(summary.earnings_label(), "₱1.75K");
    assert_eq!(summary.weekly_schedule.len(), 1);
    assert_eq!(
        summary.weekly_schedule[0].fields.date,
        support::date("2026-10-24")
    );
}

#[test]
fn earnings_overflow_is_reported_as_an_error() {
    let conn = open_db_in_memory().unwrap();
    let largest = Decimal::MAX.to_string();
    let mut transactions = service::<Transaction>(&conn, 11);
    transactions
        .create(&support::transaction(&largest, "0", "Captured"))
        .unwrap();
    let mut second = support::transaction(&largest, "0", "Captured");
    second.payer = "Paolo Ramos".to_string();
    transactions.create(&second).unwrap();

    match load_dashboard(&conn, clock()) {
        Err(RepoError::InvalidData(message)) => assert!(message.contains("earnings overflow")),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(summary) => panic!("overflowing earnings must fail, got {}", summary.earnings),
    }
}

#[test]
fn dashboard_loads_on_worker_thread() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clinic.db");
    {
        let conn = open_db(&path).unwrap();
        service::<Kennel>(&conn, 10)
            .create(&support::kennel("Private Kennel", "1", "Occupied"))
            .unwrap();
    }

    let summary = spawn_dashboard_load(&path, clock())
        .join()
        .unwrap()
        .unwrap();

    let kennel_digest = summary
        .digests
        .iter()
        .find(|digest| digest.kind == DomainKind::Kennel)
        .unwrap();
    assert_eq!(kennel_digest.needing_attention, 1);
    assert_eq!(kennel_digest.text, "1 kennel(s) that need your attention.");
}
