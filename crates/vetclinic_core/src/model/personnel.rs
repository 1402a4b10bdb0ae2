//! Personnel domain.

use super::domain::{AttentionRule, DigestTemplate, Domain, TableSchema};
use super::menu::MenuValue;
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    ensure, is_valid_email, is_valid_integer, is_valid_name, parse_date, parse_menu,
    parse_non_negative, require_present, RuleContext, ValidationResult, MISSING_FIELDS_MESSAGE,
    NOT_APPLICABLE,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

closed_menu! {
    pub enum JobTitle {
        Veterinarian => "Veterinarian",
        VeterinaryTechnician => "Veterinary Technician",
        VeterinaryAssistant => "Veterinary Assistant",
        Receptionist => "Receptionist",
        PracticeOwner => "Practice Owner",
        PracticeManager => "Practice Manager",
        Accountant => "Accountant",
        Bookkeeper => "Bookkeeper",
        KennelAttendant => "Kennel Attendant",
        Groomer => "Groomer",
        LaboratoryTechnician => "Laboratory Technician",
        RadiologyTechnician => "Radiology Technician",
        ClientServiceRepresentative => "Client Service Representative",
        PharmacyTechnician => "Pharmacy Technician",
        ItManager => "IT Manager",
        SystemAdministrator => "System Administrator",
        ItSupportTechnician => "IT Support Technician",
        Custodian => "Custodian",
    }
}

impl JobTitle {
    /// Titles whose holders must record an actual certification.
    pub fn requires_certification(self) -> bool {
        matches!(
            self,
            Self::Veterinarian
                | Self::VeterinaryTechnician
                | Self::LaboratoryTechnician
                | Self::RadiologyTechnician
                | Self::PharmacyTechnician
        )
    }
}

closed_menu! {
    pub enum Specialization {
        NotApplicable => "n/a",
        GeneralPractitioner => "General Practitioner",
        Surgery => "Veterinary Surgery",
        InternalMedicine => "Veterinary Internal Medicine",
        Dermatology => "Veterinary Dermatology",
        Oncology => "Veterinary Oncology",
        Radiology => "Veterinary Radiology",
        Neurology => "Veterinary Neurology",
        Cardiology => "Veterinary Cardiology",
        Ophthalmology => "Veterinary Ophthalmology",
        Dentistry => "Veterinary Dentistry",
        Anesthesiology => "Veterinary Anesthesiology",
        EmergencyAndCriticalCare => "Emergency and Critical Care",
        Behavior => "Veterinary Behavior",
        EquineMedicineSurgery => "Equine Medicine/Surgery",
        ZoologicalMedicine => "Zoological Medicine",
        Theriogenology => "Theriogenology",
        Nutrition => "Veterinary Nutrition",
        Pathology => "Veterinary Pathology",
        PreventiveMedicine => "Veterinary Preventive Medicine",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelFields {
    pub name: String,
    pub email: String,
    pub address: String,
    pub contact: String,
    pub emergency_contact: String,
    pub job_title: JobTitle,
    pub specialization: Option<Specialization>,
    pub hire_date: NaiveDate,
    pub work_schedule: String,
    pub certification: String,
    pub performance_rating: Decimal,
    pub attendance_rating: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonnelDraft {
    pub name: String,
    pub email: String,
    pub address: String,
    pub contact: String,
    pub emergency_contact: String,
    pub job_title: String,
    /// Blank when no specialization was picked.
    pub specialization: String,
    pub hire_date: String,
    pub work_schedule: String,
    pub certification: String,
    pub performance_rating: String,
    pub attendance_rating: String,
}

pub struct Personnel;

impl Domain for Personnel {
    type Fields = PersonnelFields;
    type Draft = PersonnelDraft;

    const KIND: DomainKind = DomainKind::Personnel;
    const SCHEMA: TableSchema = TableSchema {
        table: "personnel",
        id_column: "personnel_id",
        columns: &[
            "personnel_name",
            "personnel_email",
            "personnel_address",
            "personnel_contact",
            "emergency_contact",
            "job_title",
            "vet_specialization",
            "hire_date",
            "work_schedule",
            "certification",
            "performance_rating",
            "attendance_rating",
        ],
        business_key: &["personnel_name", "personnel_email", "personnel_contact"],
        recent_column: Some("hire_date"),
        attention: AttentionRule::NONE,
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: Some("recently hired personnel"),
        attention: None,
    };
    const DUPLICATE_MESSAGE: &'static str =
        "Personnel with the same name, email, and contact number already exists.";

    fn validate(draft: &PersonnelDraft, _ctx: &RuleContext) -> ValidationResult<PersonnelFields> {
        require_present(
            &[
                draft.name.as_str(),
                draft.email.as_str(),
                draft.address.as_str(),
                draft.contact.as_str(),
                draft.emergency_contact.as_str(),
                draft.job_title.as_str(),
                draft.hire_date.as_str(),
                draft.work_schedule.as_str(),
                draft.certification.as_str(),
                draft.performance_rating.as_str(),
                draft.attendance_rating.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        ensure(
            is_valid_name(&draft.name),
            "Invalid employee name. Please use only letters and spaces.",
        )?;
        ensure(is_valid_email(&draft.email), "Invalid employee email address.")?;
        ensure(
            is_valid_integer(&draft.contact),
            "Invalid employee contact number.",
        )?;
        ensure(
            is_valid_integer(&draft.emergency_contact),
            "Invalid employee emergency contact number.",
        )?;

        let job_title: JobTitle =
            parse_menu(&draft.job_title, "Please select a job title from the menu.")?;
        let specialization = if draft.specialization.trim().is_empty() {
            None
        } else {
            Some(parse_menu(
                &draft.specialization,
                "Please select a specialization from the menu.",
            )?)
        };
        ensure(
            job_title != JobTitle::Veterinarian || specialization.is_some(),
            "Specialization is required for Veterinarians.",
        )?;
        ensure(
            !(job_title.requires_certification()
                && draft.certification.trim().eq_ignore_ascii_case(NOT_APPLICABLE)),
            "Certification cannot be 'n/a' for the selected job title.",
        )?;

        let performance_rating = parse_non_negative(
            &draft.performance_rating,
            "Invalid format for performance rating. Please enter a valid number.",
            "Invalid format for performance rating. Please enter a valid number.",
        )?;
        let attendance_rating = parse_non_negative(
            &draft.attendance_rating,
            "Invalid format for attendance rating. Please enter a valid number.",
            "Invalid format for attendance rating. Please enter a valid number.",
        )?;
        let hire_date = parse_date(
            &draft.hire_date,
            "Invalid hire date format. Please use the correct format.",
        )?;

        Ok(PersonnelFields {
            name: draft.name.clone(),
            email: draft.email.clone(),
            address: draft.address.clone(),
            contact: draft.contact.clone(),
            emergency_contact: draft.emergency_contact.clone(),
            job_title,
            specialization,
            hire_date,
            work_schedule: draft.work_schedule.clone(),
            certification: draft.certification.clone(),
            performance_rating,
            attendance_rating,
        })
    }

    fn to_draft(fields: &PersonnelFields) -> PersonnelDraft {
        PersonnelDraft {
            name: fields.name.clone(),
            email: fields.email.clone(),
            address: fields.address.clone(),
            contact: fields.contact.clone(),
            emergency_contact: fields.emergency_contact.clone(),
            job_title: fields.job_title.as_str().to_string(),
            specialization: fields
                .specialization
                .map(|value| value.as_str().to_string())
                .unwrap_or_default(),
            hire_date: codec::date_text(fields.hire_date),
            work_schedule: fields.work_schedule.clone(),
            certification: fields.certification.clone(),
            performance_rating: fields.performance_rating.to_string(),
            attendance_rating: fields.attendance_rating.to_string(),
        }
    }

    fn to_columns(fields: &PersonnelFields) -> Vec<Value> {
        vec![
            codec::text(&fields.name),
            codec::text(&fields.email),
            codec::text(&fields.address),
            codec::text(&fields.contact),
            codec::text(&fields.emergency_contact),
            codec::menu(fields.job_title),
            codec::opt_menu(fields.specialization),
            codec::date(fields.hire_date),
            codec::text(&fields.work_schedule),
            codec::text(&fields.certification),
            codec::decimal(fields.performance_rating),
            codec::decimal(fields.attendance_rating),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<PersonnelFields> {
        Ok(PersonnelFields {
            name: row.text("personnel_name")?,
            email: row.text("personnel_email")?,
            address: row.text("personnel_address")?,
            contact: row.text("personnel_contact")?,
            emergency_contact: row.text("emergency_contact")?,
            job_title: row.menu("job_title")?,
            specialization: row.opt_menu("vet_specialization")?,
            hire_date: row.date("hire_date")?,
            work_schedule: row.text("work_schedule")?,
            certification: row.text("certification")?,
            performance_rating: row.decimal("performance_rating")?,
            attendance_rating: row.decimal("attendance_rating")?,
        })
    }
}
