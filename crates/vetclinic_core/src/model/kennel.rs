//! Kennel domain.

use super::domain::{AttentionRule, DigestTemplate, Domain, StatusCondition, TableSchema};
use super::menu::MenuValue;
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    parse_count, parse_menu, require_present, RuleContext, ValidationResult,
    MISSING_FIELDS_MESSAGE,
};
use rusqlite::types::Value;
use serde::{Deserialize, Serialize};

const NOMINAL_STATUS: &str = "Available for Boarding";

closed_menu! {
    pub enum KennelName {
        Boarding => "Boarding Kennel",
        Daycare => "Daycare Kennel",
        BreedSpecific => "Breed-specific Kennel",
        RescueShelter => "Rescue/Shelter Kennel",
        Veterinary => "Veterinary Kennel",
        Training => "Training Kennel",
        Private => "Private Kennel",
    }
}

closed_menu! {
    pub enum KennelStatus {
        AvailableForBoarding => "Available for Boarding",
        Occupied => "Occupied",
        Reserved => "Reserved",
        UnderCleaning => "Under Cleaning",
        MedicalObservation => "Medical Observation",
        AdoptionPending => "Adoption Pending",
        InTraining => "In Training",
        Vacant => "Vacant",
        Quarantine => "Quarantine",
        ScheduledVetVisit => "Scheduled Vet Visit",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KennelFields {
    pub name: KennelName,
    pub capacity: u32,
    pub status: KennelStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KennelDraft {
    pub name: String,
    pub capacity: String,
    pub status: String,
}

pub struct Kennel;

impl Domain for Kennel {
    type Fields = KennelFields;
    type Draft = KennelDraft;

    const KIND: DomainKind = DomainKind::Kennel;
    const SCHEMA: TableSchema = TableSchema {
        table: "kennels",
        id_column: "kennel_id",
        columns: &["kennel_name", "kennel_capacity", "kennel_status"],
        business_key: &["kennel_name", "kennel_capacity", "kennel_status"],
        recent_column: None,
        attention: AttentionRule {
            status: Some(StatusCondition {
                column: "kennel_status",
                nominal: &[NOMINAL_STATUS],
            }),
            upcoming: None,
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: None,
        attention: Some("kennel(s) that need your attention"),
    };
    const DUPLICATE_MESSAGE: &'static str =
        "A kennel with the same name, capacity, and status already exists.";

    fn validate(draft: &KennelDraft, _ctx: &RuleContext) -> ValidationResult<KennelFields> {
        require_present(
            &[draft.name.as_str(), draft.capacity.as_str(), draft.status.as_str()],
            MISSING_FIELDS_MESSAGE,
        )?;
        let capacity = parse_count(
            &draft.capacity,
            "Invalid format for kennel capacity. Please enter a valid integer.",
        )?;
        let name = parse_menu(&draft.name, "Please select a kennel name from the menu.")?;
        let status = parse_menu(&draft.status, "Please select a kennel status from the menu.")?;

        Ok(KennelFields {
            name,
            capacity,
            status,
        })
    }

    fn to_draft(fields: &KennelFields) -> KennelDraft {
        KennelDraft {
            name: fields.name.as_str().to_string(),
            capacity: fields.capacity.to_string(),
            status: fields.status.as_str().to_string(),
        }
    }

    fn to_columns(fields: &KennelFields) -> Vec<Value> {
        vec![
            codec::menu(fields.name),
            codec::count(fields.capacity),
            codec::menu(fields.status),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<KennelFields> {
        Ok(KennelFields {
            name: row.menu("kennel_name")?,
            capacity: row.count("kennel_capacity")?,
            status: row.menu("kennel_status")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ctx() -> RuleContext {
        RuleContext::new(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        )
    }

    fn draft(name: &str, capacity: &str, status: &str) -> KennelDraft {
        KennelDraft {
            name: name.to_string(),
            capacity: capacity.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn valid_draft_becomes_typed_fields() {
        let fields = Kennel::validate(&draft("Boarding Kennel", "12", "Vacant"), &ctx()).unwrap();
        assert_eq!(fields.name, KennelName::Boarding);
        assert_eq!(fields.capacity, 12);
        assert_eq!(fields.status, KennelStatus::Vacant);
        assert_eq!(Kennel::to_draft(&fields), draft("Boarding Kennel", "12", "Vacant"));
    }

    #[test]
    fn blank_field_is_reported_before_format() {
        let err = Kennel::validate(&draft("", "abc", "Vacant"), &ctx()).unwrap_err();
        assert_eq!(err.message(), MISSING_FIELDS_MESSAGE);
    }

    #[test]
    fn capacity_must_be_digits() {
        let err = Kennel::validate(&draft("Boarding Kennel", "-3", "Vacant"), &ctx()).unwrap_err();
        assert!(err.message().contains("valid integer"));
    }

    #[test]
    fn nominal_status_is_a_menu_label() {
        assert_eq!(
            KennelStatus::parse(NOMINAL_STATUS),
            Some(KennelStatus::AvailableForBoarding)
        );
    }
}
