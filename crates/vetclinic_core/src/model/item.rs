//! Inventory item domain.
//!
//! # Invariants
//! - `total_cost` always equals `unit_cost * quantity`; it is derived during
//!   validation and never taken from input.
//! - An expiration date of today or earlier needs explicit confirmation
//!   (`ItemDraft::confirm_expired`) rather than being rejected outright.

use super::domain::{AttentionRule, DigestTemplate, Domain, StatusCondition, TableSchema};
use super::menu::MenuValue;
use super::record::DomainKind;
use crate::repo::codec::{self, RowReader};
use crate::repo::RepoResult;
use crate::validate::{
    parse_count, parse_date, parse_menu, parse_non_negative, require_present, RuleContext,
    ValidationError, ValidationResult, MISSING_FIELDS_MESSAGE,
};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const NOMINAL_STATUS: &str = "In Stock";
const NUMBERS_MESSAGE: &str = "Invalid quantity or unit cost. Please enter valid numbers.";
pub const EXPIRED_CONFIRMATION_MESSAGE: &str =
    "The expiration date is today or in the past. Do you still want to keep this item?";

closed_menu! {
    pub enum ItemType {
        MedicalSupplies => "Medical Supplies",
        Medication => "Medication",
        FoodAndWater => "Food and Water",
        CleaningSupplies => "Cleaning Supplies",
        LaboratorySupplies => "Laboratory Supplies",
        OfficeSupplies => "Office Supplies",
        Equipment => "Equipment",
        AnimalCareItems => "Animal Care Items",
    }
}

closed_menu! {
    pub enum ItemStatus {
        OutOfStock => "Out of Stock",
        InStock => "In Stock",
        OnOrder => "On Order",
        Reserved => "Reserved",
        DamagedFaulty => "Damaged/Faulty",
        InTransit => "In transit",
        LowStock => "Low Stock",
        UnderInspection => "Under Inspection",
        Discontinued => "Discontinued",
        Returned => "Returned",
        SoldIssued => "Sold/Issued",
        ScrappedObsolete => "Scrapped/Obsolete",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemFields {
    pub name: String,
    pub item_type: ItemType,
    pub quantity: u32,
    pub unit_cost: Decimal,
    pub supplier: String,
    pub exp_date: Option<NaiveDate>,
    pub status: ItemStatus,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub item_type: String,
    pub quantity: String,
    pub unit_cost: String,
    pub supplier: String,
    /// Ignored when `no_expiration` is set.
    pub exp_date: String,
    pub no_expiration: bool,
    /// User accepted an expiration date of today or earlier.
    pub confirm_expired: bool,
    pub status: String,
}

pub struct Item;

impl Domain for Item {
    type Fields = ItemFields;
    type Draft = ItemDraft;

    const KIND: DomainKind = DomainKind::Item;
    const SCHEMA: TableSchema = TableSchema {
        table: "inventory",
        id_column: "item_id",
        columns: &[
            "item_name",
            "item_type",
            "item_quantity",
            "unit_cost",
            "item_supplier",
            "exp_date",
            "item_status",
            "total_cost",
        ],
        business_key: &["item_name", "item_type", "item_supplier", "exp_date"],
        recent_column: None,
        attention: AttentionRule {
            status: Some(StatusCondition {
                column: "item_status",
                nominal: &[NOMINAL_STATUS],
            }),
            upcoming: None,
        },
    };
    const DIGEST: DigestTemplate = DigestTemplate {
        recent: None,
        attention: Some("item(s)/unit(s) that need your attention"),
    };
    const DUPLICATE_MESSAGE: &'static str =
        "An item with the same name, type, supplier, and expiration date already exists.";

    fn validate(draft: &ItemDraft, ctx: &RuleContext) -> ValidationResult<ItemFields> {
        require_present(
            &[
                draft.name.as_str(),
                draft.item_type.as_str(),
                draft.quantity.as_str(),
                draft.unit_cost.as_str(),
                draft.supplier.as_str(),
                draft.status.as_str(),
            ],
            MISSING_FIELDS_MESSAGE,
        )?;
        if !draft.no_expiration {
            require_present(&[draft.exp_date.as_str()], MISSING_FIELDS_MESSAGE)?;
        }

        let quantity = parse_count(&draft.quantity, NUMBERS_MESSAGE)?;
        let unit_cost = parse_non_negative(&draft.unit_cost, NUMBERS_MESSAGE, NUMBERS_MESSAGE)?;
        let total_cost = unit_cost
            .checked_mul(Decimal::from(quantity))
            .ok_or_else(|| ValidationError::rejected(NUMBERS_MESSAGE))?;

        let exp_date = if draft.no_expiration {
            None
        } else {
            Some(parse_date(
                &draft.exp_date,
                "Invalid date format for expiration date. Please use the correct format.",
            )?)
        };
        if let Some(exp_date) = exp_date {
            if exp_date <= ctx.today() && !draft.confirm_expired {
                return Err(ValidationError::ConfirmationRequired(
                    EXPIRED_CONFIRMATION_MESSAGE.to_string(),
                ));
            }
        }

        let item_type = parse_menu(&draft.item_type, "Please select an item type from the menu.")?;
        let status = parse_menu(&draft.status, "Please select an item status from the menu.")?;

        Ok(ItemFields {
            name: draft.name.clone(),
            item_type,
            quantity,
            unit_cost,
            supplier: draft.supplier.clone(),
            exp_date,
            status,
            total_cost,
        })
    }

    fn to_draft(fields: &ItemFields) -> ItemDraft {
        ItemDraft {
            name: fields.name.clone(),
            item_type: fields.item_type.as_str().to_string(),
            quantity: fields.quantity.to_string(),
            unit_cost: fields.unit_cost.to_string(),
            supplier: fields.supplier.clone(),
            exp_date: fields.exp_date.map(codec::date_text).unwrap_or_default(),
            no_expiration: fields.exp_date.is_none(),
            confirm_expired: false,
            status: fields.status.as_str().to_string(),
        }
    }

    fn to_columns(fields: &ItemFields) -> Vec<Value> {
        vec![
            codec::text(&fields.name),
            codec::menu(fields.item_type),
            codec::count(fields.quantity),
            codec::decimal(fields.unit_cost),
            codec::text(&fields.supplier),
            codec::opt_date(fields.exp_date),
            codec::menu(fields.status),
            codec::decimal(fields.total_cost),
        ]
    }

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<ItemFields> {
        Ok(ItemFields {
            name: row.text("item_name")?,
            item_type: row.menu("item_type")?,
            quantity: row.count("item_quantity")?,
            unit_cost: row.decimal("unit_cost")?,
            supplier: row.text("item_supplier")?,
            exp_date: row.opt_date("exp_date")?,
            status: row.menu("item_status")?,
            total_cost: row.decimal("total_cost")?,
        })
    }
}
