//! Patient domain.
//!
//! Patients are counted as "recent" by admission date and have no attention
//! rule.

use super::domain::{AttentionRule, DigestTemplate, Domain, TableSchema};
use super::menu::{Gender, MenuValue};
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    ensure, is_valid_email, is_valid_integer, is_valid_name, parse_date, parse_menu,
    parse_non_negative, require_present, RuleContext, ValidationResult, MISSING_FIELDS_MESSAGE,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const AGE_WEIGHT_MESSAGE: &str = "Age and Weight must be greater than or equal to zero.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientFields {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: Decimal,
    pub color: String,
    pub admitted_date: NaiveDate,
    pub medical_history: String,
    pub vaccine_history: String,
    pub special_instructions: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_email: String,
    pub owner_address: String,
    pub insurance: String,
    pub weight: Decimal,
    pub microchip_id: String,
    pub gender: Gender,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub age: String,
    pub color: String,
    pub admitted_date: String,
    pub medical_history: String,
    pub vaccine_history: String,
    pub special_instructions: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_email: String,
    pub owner_address: String,
    pub insurance: String,
    pub weight: String,
    pub microchip_id: String,
    pub gender: String,
}

pub struct Patient;

impl Domain for Patient {
    type Fields = PatientFields;
    type Draft = PatientDraft;

    const KIND: DomainKind = DomainKind::Patient;
    const SCHEMA: TableSchema = TableSchema {
        table: "patients",
        id_column: "patient_id",
        columns: &[
            "patient_name",
            "patient_species",
            "patient_breed",
            "age_in_years",
            "patient_color",
            "admitted_date",
            "medical_history",
            "vaccination_history",
            "special_instruction",
            "owner_name",
            "owner_contact",
            "owner_email",
            "owner_address",
            "patient_insurance",
            "patient_weight",
            "microchip_id",
            "patient_gender",
        ],
        business_key: &["patient_name", "patient_species", "patient_breed", "owner_name"],
        recent_column: Some("admitted_date"),
        attention: AttentionRule::NONE,
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: Some("patient(s) admitted this week"),
        attention: None,
    };
    const DUPLICATE_MESSAGE: &'static str = "Patient already exists.";

    fn validate(draft: &PatientDraft, _ctx: &RuleContext) -> ValidationResult<PatientFields> {
        require_present(
            &[
                draft.name.as_str(),
                draft.species.as_str(),
                draft.breed.as_str(),
                draft.age.as_str(),
                draft.color.as_str(),
                draft.admitted_date.as_str(),
                draft.medical_history.as_str(),
                draft.vaccine_history.as_str(),
                draft.special_instructions.as_str(),
                draft.owner_name.as_str(),
                draft.owner_contact.as_str(),
                draft.owner_email.as_str(),
                draft.owner_address.as_str(),
                draft.insurance.as_str(),
                draft.weight.as_str(),
                draft.microchip_id.as_str(),
                draft.gender.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        ensure(
            is_valid_name(&draft.name) && is_valid_name(&draft.owner_name),
            "Invalid patient or owner name. Please use only letters and spaces.",
        )?;
        ensure(
            is_valid_email(&draft.owner_email),
            "Invalid owner email address.",
        )?;
        ensure(
            is_valid_integer(&draft.owner_contact),
            "Invalid owner contact number.",
        )?;
        let age = parse_non_negative(&draft.age, AGE_WEIGHT_MESSAGE, AGE_WEIGHT_MESSAGE)?;
        let weight = parse_non_negative(&draft.weight, AGE_WEIGHT_MESSAGE, AGE_WEIGHT_MESSAGE)?;
        let admitted_date = parse_date(
            &draft.admitted_date,
            "Invalid date format. Please use the correct format.",
        )?;
        let gender = parse_menu(&draft.gender, "Please select a gender from the menu.")?;

        Ok(PatientFields {
            name: draft.name.clone(),
            species: draft.species.clone(),
            breed: draft.breed.clone(),
            age,
            color: draft.color.clone(),
            admitted_date,
            medical_history: draft.medical_history.clone(),
            vaccine_history: draft.vaccine_history.clone(),
            special_instructions: draft.special_instructions.clone(),
            owner_name: draft.owner_name.clone(),
            owner_contact: draft.owner_contact.clone(),
            owner_email: draft.owner_email.clone(),
            owner_address: draft.owner_address.clone(),
            insurance: draft.insurance.clone(),
            weight,
            microchip_id: draft.microchip_id.clone(),
            gender,
        })
    }

    fn to_draft(fields: &PatientFields) -> PatientDraft {
        PatientDraft {
            name: fields.name.clone(),
            species: fields.species.clone(),
            breed: fields.breed.clone(),
            age: fields.age.to_string(),
            color: fields.color.clone(),
            admitted_date: codec::date_text(fields.admitted_date),
            medical_history: fields.medical_history.clone(),
            vaccine_history: fields.vaccine_history.clone(),
            special_instructions: fields.special_instructions.clone(),
            owner_name: fields.owner_name.clone(),
            owner_contact: fields.owner_contact.clone(),
            owner_email: fields.owner_email.clone(),
            owner_address: fields.owner_address.clone(),
            insurance: fields.insurance.clone(),
            weight: fields.weight.to_string(),
            microchip_id: fields.microchip_id.clone(),
            gender: fields.gender.as_str().to_string(),
        }
    }

    fn to_columns(fields: &PatientFields) -> Vec<Value> {
        vec![
            codec::text(&fields.name),
            codec::text(&fields.species),
            codec::text(&fields.breed),
            codec::decimal(fields.age),
            codec::text(&fields.color),
            codec::date(fields.admitted_date),
            codec::text(&fields.medical_history),
            codec::text(&fields.vaccine_history),
            codec::text(&fields.special_instructions),
            codec::text(&fields.owner_name),
            codec::text(&fields.owner_contact),
            codec::text(&fields.owner_email),
            codec::text(&fields.owner_address),
            codec::text(&fields.insurance),
            codec::decimal(fields.weight),
            codec::text(&fields.microchip_id),
            codec::menu(fields.gender),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<PatientFields> {
        Ok(PatientFields {
            name: row.text("patient_name")?,
            species: row.text("patient_species")?,
            breed: row.text("patient_breed")?,
            age: row.decimal("age_in_years")?,
            color: row.text("patient_color")?,
            admitted_date: row.date("admitted_date")?,
            medical_history: row.text("medical_history")?,
            vaccine_history: row.text("vaccination_history")?,
            special_instructions: row.text("special_instruction")?,
            owner_name: row.text("owner_name")?,
            owner_contact: row.text("owner_contact")?,
            owner_email: row.text("owner_email")?,
            owner_address: row.text("owner_address")?,
            insurance: row.text("patient_insurance")?,
            weight: row.decimal("patient_weight")?,
            microchip_id: row.text("microchip_id")?,
            gender: row.menu("patient_gender")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RuleContext {
        RuleContext::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn valid_draft() -> PatientDraft {
        PatientDraft {
            name: "Bantay".to_string(),
            species: "Dog".to_string(),
            breed: "Aspin".to_string(),
            age: "3.5".to_string(),
            color: "Brown".to_string(),
            admitted_date: "2026-10-19".to_string(),
            medical_history: "n/a".to_string(),
            vaccine_history: "Rabies 2025".to_string(),
            special_instructions: "n/a".to_string(),
            owner_name: "Maria Santos".to_string(),
            owner_contact: "09171234567".to_string(),
            owner_email: "maria@example.ph".to_string(),
            owner_address: "Quezon City".to_string(),
            insurance: "n/a".to_string(),
            weight: "12".to_string(),
            microchip_id: "n/a".to_string(),
            gender: "Male".to_string(),
        }
    }

    #[test]
    fn valid_draft_round_trips_through_to_draft() {
        let fields = Patient::validate(&valid_draft(), &ctx()).unwrap();
        assert_eq!(fields.gender, Gender::Male);
        let again = Patient::validate(&Patient::to_draft(&fields), &ctx()).unwrap();
        assert_eq!(again, fields);
    }

    #[test]
    fn rules_fire_in_order() {
        let mut draft = valid_draft();
        draft.owner_name = "Maria 2".to_string();
        draft.owner_email = "not-an-email".to_string();
        let err = Patient::validate(&draft, &ctx()).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid patient or owner name. Please use only letters and spaces."
        );
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut draft = valid_draft();
        draft.weight = "-1".to_string();
        let err = Patient::validate(&draft, &ctx()).unwrap_err();
        assert_eq!(err.message(), AGE_WEIGHT_MESSAGE);
    }

    #[test]
    fn contact_must_be_digits() {
        let mut draft = valid_draft();
        draft.owner_contact = "+63 917".to_string();
        let err = Patient::validate(&draft, &ctx()).unwrap_err();
        assert_eq!(err.message(), "Invalid owner contact number.");
    }

    #[test]
    fn columns_follow_schema_order() {
        let fields = Patient::validate(&valid_draft(), &ctx()).unwrap();
        let columns = Patient::to_columns(&fields);
        assert_eq!(columns.len(), Patient::SCHEMA.columns.len());
        let breed_at = Patient::SCHEMA.column_index("patient_breed").unwrap();
        assert_eq!(columns[breed_at], Value::Text("Aspin".to_string()));
    }
}
