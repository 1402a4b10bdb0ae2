//! Appointment domain.

use super::domain::{
    AttentionRule, DigestTemplate, Domain, StatusCondition, TableSchema, UpcomingCondition,
};
use super::menu::MenuValue;
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    ensure, is_valid_integer, is_valid_name, parse_date, parse_menu, parse_time,
    require_present, RuleContext, ValidationResult, MISSING_FIELDS_MESSAGE,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

const FORMAT_MESSAGE: &str = "Invalid date or time format. Please use the correct format.";

closed_menu! {
    pub enum AppointmentService {
        DiagnosisAndTreatment => "Diagnosis and Treatment",
        Vaccination => "Vaccination",
        ParasiteControl => "Parasite Control",
        LaboratoryServices => "Laboratory Services",
        Counseling => "Counseling",
        Boarding => "Boarding",
        Grooming => "Grooming",
        Euthanasia => "Euthanasia",
    }
}

closed_menu! {
    pub enum AppointmentStatus {
        Ongoing => "Ongoing",
        Completed => "Completed",
        Cancelled => "Cancelled",
        SetForReschedule => "Set for Reschedule",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentFields {
    pub client_name: String,
    pub client_contact: String,
    pub service: AppointmentService,
    pub assigned_personnel: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub status: AppointmentStatus,
}

impl AppointmentFields {
    pub fn scheduled_at(&self) -> NaiveDateTime {
        NaiveDateTime::new(self.date, self.time)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub client_name: String,
    pub client_contact: String,
    pub service: String,
    pub assigned_personnel: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

pub struct Appointment;

impl Domain for Appointment {
    type Fields = AppointmentFields;
    type Draft = AppointmentDraft;

    const KIND: DomainKind = DomainKind::Appointment;
    const SCHEMA: TableSchema = TableSchema {
        table: "appointments",
        id_column: "appointment_id",
        columns: &[
            "client_name",
            "client_contact",
            "service_required",
            "assigned_personnel",
            "appointment_date",
            "appointment_time",
            "appointment_status",
        ],
        business_key: &[
            "client_name",
            "assigned_personnel",
            "service_required",
            "appointment_date",
            "appointment_time",
        ],
        recent_column: Some("appointment_date"),
        attention: AttentionRule {
            status: Some(StatusCondition {
                column: "appointment_status",
                nominal: &["Completed"],
            }),
            upcoming: Some(UpcomingCondition {
                column: "appointment_date",
                days: 7,
                include_overdue: false,
            }),
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: None,
        attention: Some("appointment(s) within this week that need your attention"),
    };
    const DUPLICATE_MESSAGE: &'static str =
        "An appointment with the same client, personnel, date, and time already exists.";

    fn validate(draft: &AppointmentDraft, ctx: &RuleContext) -> ValidationResult<AppointmentFields> {
        require_present(
            &[
                draft.client_name.as_str(),
                draft.client_contact.as_str(),
                draft.service.as_str(),
                draft.assigned_personnel.as_str(),
                draft.date.as_str(),
                draft.time.as_str(),
                draft.status.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        ensure(
            is_valid_name(&draft.client_name),
            "Invalid client name. Please use only letters and spaces.",
        )?;
        ensure(
            is_valid_name(&draft.assigned_personnel),
            "Invalid assigned personnel name. Please use only letters and spaces.",
        )?;
        ensure(
            is_valid_integer(&draft.client_contact),
            "Invalid client contact number.",
        )?;
        let date = parse_date(&draft.date, FORMAT_MESSAGE)?;
        let time = parse_time(&draft.time, FORMAT_MESSAGE)?;
        ensure(
            NaiveDateTime::new(date, time) >= ctx.now,
            "Invalid date or time. Please select a date and time in the future.",
        )?;
        let service = parse_menu(&draft.service, "Please select a service from the menu.")?;
        let status = parse_menu(
            &draft.status,
            "Please select an appointment status from the menu.",
        )?;

        Ok(AppointmentFields {
            client_name: draft.client_name.clone(),
            client_contact: draft.client_contact.clone(),
            service,
            assigned_personnel: draft.assigned_personnel.clone(),
            date,
            time,
            status,
        })
    }

    fn to_draft(fields: &AppointmentFields) -> AppointmentDraft {
        AppointmentDraft {
            client_name: fields.client_name.clone(),
            client_contact: fields.client_contact.clone(),
            service: fields.service.as_str().to_string(),
            assigned_personnel: fields.assigned_personnel.clone(),
            date: codec::date_text(fields.date),
            time: fields.time.format("%H:%M").to_string(),
            status: fields.status.as_str().to_string(),
        }
    }

    fn to_columns(fields: &AppointmentFields) -> Vec<Value> {
        vec![
            codec::text(&fields.client_name),
            codec::text(&fields.client_contact),
            codec::menu(fields.service),
            codec::text(&fields.assigned_personnel),
            codec::date(fields.date),
            codec::time(fields.time),
            codec::menu(fields.status),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<AppointmentFields> {
        Ok(AppointmentFields {
            client_name: row.text("client_name")?,
            client_contact: row.text("client_contact")?,
            service: row.menu("service_required")?,
            assigned_personnel: row.text("assigned_personnel")?,
            date: row.date("appointment_date")?,
            time: row.time("appointment_time")?,
            status: row.menu("appointment_status")?,
        })
    }
}
