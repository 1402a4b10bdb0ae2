//! Shared fixtures for integration tests.
#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;
use vetclinic_core::model::appointment::AppointmentDraft;
use vetclinic_core::model::boarder::BoarderDraft;
use vetclinic_core::model::item::ItemDraft;
use vetclinic_core::model::kennel::KennelDraft;
use vetclinic_core::model::lab::LabDraft;
use vetclinic_core::model::patient::PatientDraft;
use vetclinic_core::model::personnel::PersonnelDraft;
use vetclinic_core::model::transaction::TransactionDraft;
use vetclinic_core::{Domain, FixedClock, IdGenerator, RecordService, SqliteRecordStore};

pub type Service<'conn, D> =
    RecordService<D, SqliteRecordStore<'conn, D>, FixedClock, IdGenerator<StdRng>>;

/// Wednesday 2026-10-21; its week runs Sunday 10-18 through Saturday 10-24.
pub fn now() -> NaiveDateTime {
    date("2026-10-21").and_hms_opt(9, 0, 0).unwrap()
}

pub fn clock() -> FixedClock {
    FixedClock(now())
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").unwrap()
}

pub fn service<D: Domain>(conn: &Connection, seed: u64) -> Service<'_, D> {
    RecordService::with_parts(
        SqliteRecordStore::try_new(conn).unwrap(),
        clock(),
        IdGenerator::with_rng(StdRng::seed_from_u64(seed)),
    )
}

pub fn patient(name: &str, admitted: &str) -> PatientDraft {
    PatientDraft {
        name: name.to_string(),
        species: "Dog".to_string(),
        breed: "Aspin".to_string(),
        age: "3.5".to_string(),
        color: "Brown".to_string(),
        admitted_date: admitted.to_string(),
        medical_history: "n/a".to_string(),
        vaccine_history: "Rabies 2025".to_string(),
        special_instructions: "n/a".to_string(),
        owner_name: "Maria Santos".to_string(),
        owner_contact: "09171234567".to_string(),
        owner_email: "maria@example.ph".to_string(),
        owner_address: "Quezon City".to_string(),
        insurance: "n/a".to_string(),
        weight: "12.40".to_string(),
        microchip_id: "n/a".to_string(),
        gender: "Male".to_string(),
    }
}

pub fn boarder(name: &str, boarded: &str, departed: &str) -> BoarderDraft {
    BoarderDraft {
        name: name.to_string(),
        species: "Cat".to_string(),
        breed: "Puspin".to_string(),
        color: "Calico".to_string(),
        special_instructions: "n/a".to_string(),
        owner_name: "Jose Reyes".to_string(),
        owner_contact: "09181112222".to_string(),
        owner_address: "Pasig".to_string(),
        owner_email: "jose.reyes@example.com".to_string(),
        date_boarded: boarded.to_string(),
        age: "2".to_string(),
        gender: "Female".to_string(),
        weight: "4.2".to_string(),
        date_departed: departed.to_string(),
    }
}

pub fn appointment(date: &str, time: &str, status: &str) -> AppointmentDraft {
    AppointmentDraft {
        client_name: "Ana Lim".to_string(),
        client_contact: "09991234567".to_string(),
        service: "Vaccination".to_string(),
        assigned_personnel: "Dr Cruz".to_string(),
        date: date.to_string(),
        time: time.to_string(),
        status: status.to_string(),
    }
}

pub fn item(name: &str, status: &str) -> ItemDraft {
    ItemDraft {
        name: name.to_string(),
        item_type: "Medication".to_string(),
        quantity: "4".to_string(),
        unit_cost: "150.50".to_string(),
        supplier: "VetPharma".to_string(),
        exp_date: "2027-01-31".to_string(),
        no_expiration: false,
        confirm_expired: false,
        status: status.to_string(),
    }
}

pub fn kennel(name: &str, capacity: &str, status: &str) -> KennelDraft {
    KennelDraft {
        name: name.to_string(),
        capacity: capacity.to_string(),
        status: status.to_string(),
    }
}

pub fn lab(name: &str, equipment: &str, status: &str) -> LabDraft {
    LabDraft {
        name: name.to_string(),
        equipment_count: equipment.to_string(),
        status: status.to_string(),
    }
}

pub fn personnel(name: &str, hired: &str) -> PersonnelDraft {
    PersonnelDraft {
        name: name.to_string(),
        email: "rcruz@genvet.ph".to_string(),
        address: "Makati".to_string(),
        contact: "09170000001".to_string(),
        emergency_contact: "09170000002".to_string(),
        job_title: "Veterinarian".to_string(),
        specialization: "Veterinary Surgery".to_string(),
        hire_date: hired.to_string(),
        work_schedule: "Mon-Fri 8-5".to_string(),
        certification: "PRC Licensed".to_string(),
        performance_rating: "4.5".to_string(),
        attendance_rating: "4.8".to_string(),
    }
}

pub fn transaction(amount: &str, received: &str, status: &str) -> TransactionDraft {
    TransactionDraft {
        payer: "Liza Soberano".to_string(),
        payee: "GenVet Clinic".to_string(),
        transaction_type: "Consultation Fees".to_string(),
        description: "Checkup".to_string(),
        amount: amount.to_string(),
        amount_received: received.to_string(),
        payment_method: "Cash".to_string(),
        status: status.to_string(),
    }
}
