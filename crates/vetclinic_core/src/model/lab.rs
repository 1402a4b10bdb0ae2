//! Laboratory domain.

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

const NOMINAL_STATUS: &str = "Available for Testing";

closed_menu! {
    pub enum LabName {
        ClinicalPathology => "Clinical Pathology Lab",
        Microbiology => "Microbiology Lab",
        Parasitology => "Parasitology Lab",
        Hematology => "Hematology Lab",
        Serology => "Serology Lab",
        Cytology => "Cytology Lab",
        Histopathology => "Histopathology Lab",
        DiagnosticImaging => "Diagnostic Imaging Lab",
        Genetics => "Genetics Lab",
        Chemistry => "Chemistry Lab",
    }
}

closed_menu! {
    pub enum LabStatus {
        AvailableForTesting => "Available for Testing",
        InUse => "In Use",
        UnderMaintenance => "Under Maintenance",
        OutOfService => "Out of Service",
        PendingApproval => "Pending Approval",
        CompletedExperiment => "Completed Experiment",
        AwaitingSupplies => "Awaiting Supplies",
        CalibrationDue => "Calibration Due",
        DataAnalysis => "Data Analysis",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabFields {
    pub name: LabName,
    pub equipment_count: u32,
    pub status: LabStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabDraft {
    pub name: String,
    pub equipment_count: String,
    pub status: String,
}

pub struct Lab;

impl Domain for Lab {
    type Fields = LabFields;
    type Draft = LabDraft;

    const KIND: DomainKind = DomainKind::Lab;
    const SCHEMA: TableSchema = TableSchema {
        table: "laboratories",
        id_column: "lab_id",
        columns: &["lab_name", "no_of_lab_equipment", "lab_status"],
        business_key: &["lab_name", "no_of_lab_equipment", "lab_status"],
        recent_column: None,
        attention: AttentionRule {
            status: Some(StatusCondition {
                column: "lab_status",
                nominal: &[NOMINAL_STATUS],
            }),
            upcoming: None,
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: None,
        attention: Some("laboratory(ies) that need your attention"),
    };
    const DUPLICATE_MESSAGE: &'static str =
        "A laboratory with the same name, equipment count, and status already exists.";

    fn validate(draft: &LabDraft, _ctx: &RuleContext) -> ValidationResult<LabFields> {
        require_present(
            &[
                draft.name.as_str(),
                draft.equipment_count.as_str(),
                draft.status.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        let equipment_count = parse_count(
            &draft.equipment_count,
            "Invalid format for number of equipment. Please enter a valid integer.",
        )?;
        let name = parse_menu(&draft.name, "Please select a laboratory name from the menu.")?;
        let status = parse_menu(
            &draft.status,
            "Please select a laboratory status from the menu.",
        )?;

        Ok(LabFields {
            name,
            equipment_count,
            status,
        })
    }

    fn to_draft(fields: &LabFields) -> LabDraft {
        LabDraft {
            name: fields.name.as_str().to_string(),
            equipment_count: fields.equipment_count.to_string(),
            status: fields.status.as_str().to_string(),
        }
    }

    fn to_columns(fields: &LabFields) -> Vec<Value> {
        vec![
            codec::menu(fields.name),
            codec::count(fields.equipment_count),
            codec::menu(fields.status),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<LabFields> {
        Ok(LabFields {
            name: row.menu("lab_name")?,
            equipment_count: row.count("no_of_lab_equipment")?,
            status: row.menu("lab_status")?,
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

    #[test]
    fn equipment_count_rejects_decimals() {
        let draft = LabDraft {
            name: "Hematology Lab".to_string(),
            equipment_count: "2.5".to_string(),
            status: "In Use".to_string(),
        };
        let err = Lab::validate(&draft, &ctx()).unwrap_err();
        assert_eq!(
            err.message(),
            "Invalid format for number of equipment. Please enter a valid integer."
        );
    }

    #[test]
    fn unknown_menu_label_is_rejected() {
        let draft = LabDraft {
            name: "Alchemy Lab".to_string(),
            equipment_count: "4".to_string(),
            status: "In Use".to_string(),
        };
        assert!(Lab::validate(&draft, &ctx()).is_err());
    }

    #[test]
    fn nominal_status_is_a_menu_label() {
        assert_eq!(
            LabStatus::parse(NOMINAL_STATUS),
            Some(LabStatus::AvailableForTesting)
        );
    }
}
