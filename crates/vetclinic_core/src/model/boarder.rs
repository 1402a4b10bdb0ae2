//! Boarder domain.
//!
//! Boarders are "recent" by board-in date and need attention when their
//! departure falls within the coming week.

use super::domain::{AttentionRule, DigestTemplate, Domain, TableSchema, UpcomingCondition};
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
pub struct BoarderFields {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub special_instructions: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_address: String,
    pub owner_email: String,
    pub date_boarded: NaiveDate,
    pub age: Decimal,
    pub gender: Gender,
    pub weight: Decimal,
    pub date_departed: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoarderDraft {
    pub name: String,
    pub species: String,
    pub breed: String,
    pub color: String,
    pub special_instructions: String,
    pub owner_name: String,
    pub owner_contact: String,
    pub owner_address: String,
    pub owner_email: String,
    pub date_boarded: String,
    pub age: String,
    pub gender: String,
    pub weight: String,
    pub date_departed: String,
}

pub struct Boarder;

impl Domain for Boarder {
    type Fields = BoarderFields;
    type Draft = BoarderDraft;

    const KIND: DomainKind = DomainKind::Boarder;
    const SCHEMA: TableSchema = TableSchema {
        table: "boarders",
        id_column: "boarder_id",
        columns: &[
            "boarder_name",
            "boarder_species",
            "boarder_breed",
            "boarder_color",
            "special_instruction",
            "owner_name",
            "owner_contact",
            "owner_address",
            "owner_email",
            "date_boarded",
            "boarder_age",
            "boarder_gender",
            "boarder_weight",
            "date_departed",
        ],
        business_key: &[
            "boarder_name",
            "boarder_species",
            "boarder_breed",
            "owner_name",
            "date_boarded",
            "date_departed",
        ],
        recent_column: Some("date_boarded"),
        attention: AttentionRule {
            status: None,
            upcoming: Some(UpcomingCondition {
                column: "date_departed",
                days: 7,
                // A boarder past its departure date still occupies a kennel.
                include_overdue: true,
            }),
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: Some("recently admitted boarder(s)"),
        attention: Some("boarder(s) with departure dates within the week"),
    };
    const DUPLICATE_MESSAGE: &'static str = "Boarder already exists.";

    fn validate(draft: &BoarderDraft, ctx: &RuleContext) -> ValidationResult<BoarderFields> {
        require_present(
            &[
                draft.name.as_str(),
                draft.species.as_str(),
                draft.breed.as_str(),
                draft.color.as_str(),
                draft.special_instructions.as_str(),
                draft.owner_name.as_str(),
                draft.owner_contact.as_str(),
                draft.owner_address.as_str(),
                draft.owner_email.as_str(),
                draft.date_boarded.as_str(),
                draft.age.as_str(),
                draft.gender.as_str(),
                draft.weight.as_str(),
                draft.date_departed.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        ensure(
            is_valid_name(&draft.name) && is_valid_name(&draft.owner_name),
            "Invalid boarder or owner name. Please use only letters and spaces.",
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
        let date_boarded = parse_date(
            &draft.date_boarded,
            "Invalid date format for Date Boarded. Please use the correct format.",
        )?;
        let date_departed = parse_date(
            &draft.date_departed,
            "Invalid date format for Departure Date. Please use the correct format.",
        )?;
        ensure(
            date_departed >= ctx.today(),
            "Departure date must be in the future.",
        )?;
        let gender = parse_menu(&draft.gender, "Please select a gender from the menu.")?;

        Ok(BoarderFields {
            name: draft.name.clone(),
            species: draft.species.clone(),
            breed: draft.breed.clone(),
            color: draft.color.clone(),
            special_instructions: draft.special_instructions.clone(),
            owner_name: draft.owner_name.clone(),
            owner_contact: draft.owner_contact.clone(),
            owner_address: draft.owner_address.clone(),
            owner_email: draft.owner_email.clone(),
            date_boarded,
            age,
            gender,
            weight,
            date_departed,
        })
    }

    fn to_draft(fields: &BoarderFields) -> BoarderDraft {
        BoarderDraft {
            name: fields.name.clone(),
            species: fields.species.clone(),
            breed: fields.breed.clone(),
            color: fields.color.clone(),
            special_instructions: fields.special_instructions.clone(),
            owner_name: fields.owner_name.clone(),
            owner_contact: fields.owner_contact.clone(),
            owner_address: fields.owner_address.clone(),
            owner_email: fields.owner_email.clone(),
            date_boarded: codec::date_text(fields.date_boarded),
            age: fields.age.to_string(),
            gender: fields.gender.as_str().to_string(),
            weight: fields.weight.to_string(),
            date_departed: codec::date_text(fields.date_departed),
        }
    }

    fn to_columns(fields: &BoarderFields) -> Vec<Value> {
        vec![
            codec::text(&fields.name),
            codec::text(&fields.species),
            codec::text(&fields.breed),
            codec::text(&fields.color),
            codec::text(&fields.special_instructions),
            codec::text(&fields.owner_name),
            codec::text(&fields.owner_contact),
            codec::text(&fields.owner_address),
            codec::text(&fields.owner_email),
            codec::date(fields.date_boarded),
            codec::decimal(fields.age),
            codec::menu(fields.gender),
            codec::decimal(fields.weight),
            codec::date(fields.date_departed),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<BoarderFields> {
        Ok(BoarderFields {
            name: row.text("boarder_name")?,
            species: row.text("boarder_species")?,
            breed: row.text("boarder_breed")?,
            color: row.text("boarder_color")?,
            special_instructions: row.text("special_instruction")?,
            owner_name: row.text("owner_name")?,
            owner_contact: row.text("owner_contact")?,
            owner_address: row.text("owner_address")?,
            owner_email: row.text("owner_email")?,
            date_boarded: row.date("date_boarded")?,
            age: row.decimal("boarder_age")?,
            gender: row.menu("boarder_gender")?,
            weight: row.decimal("boarder_weight")?,
            date_departed: row.date("date_departed")?,
        })
    }
}
