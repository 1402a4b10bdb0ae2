//! Domain schema contract shared by all eight record kinds.
//!
//! # Responsibility
//! - Describe one domain's table, business key and summary predicates as
//!   static data the generic store turns into SQL.
//! - Tie a raw form draft to its typed fields through the domain rule chain.
//!
//! # Invariants
//! - `to_columns` yields values in exactly `SCHEMA.columns` order.
//! - Every `SCHEMA.business_key` entry is also listed in `SCHEMA.columns`.
//! - `to_draft` followed by `validate` reproduces equal fields for any record
//!   that was valid when it was stored.

use super::ids::IdSource;
use super::record::DomainKind;
use crate::repo::codec::RowReader;
use crate::repo::record_store::RepoResult;
use crate::validate::{RuleContext, ValidationResult};
use rusqlite::types::Value;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// Static description of one domain table.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    pub table: &'static str,
    pub id_column: &'static str,
    /// Mutable columns, in `Domain::to_columns` order.
    pub columns: &'static [&'static str],
    /// Columns compared by the creation-time duplicate check.
    pub business_key: &'static [&'static str],
    /// Date column counted by the weekly "recent" predicate.
    pub recent_column: Option<&'static str>,
    pub attention: AttentionRule,
}

impl TableSchema {
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|candidate| *candidate == column)
    }
}

/// Which rows count as "needing attention".
///
/// All present conditions must hold. A rule with no conditions never matches.
#[derive(Debug, Clone, Copy)]
pub struct AttentionRule {
    /// Rows whose status column holds none of `nominal`.
    pub status: Option<StatusCondition>,
    /// Rows whose date column lies in `[today, today + days]`, or anywhere up
    /// to `today + days` when the condition includes overdue rows.
    pub upcoming: Option<UpcomingCondition>,
}

impl AttentionRule {
    pub const NONE: Self = Self {
        status: None,
        upcoming: None,
    };

    pub fn is_defined(&self) -> bool {
        self.status.is_some() || self.upcoming.is_some()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct StatusCondition {
    pub column: &'static str,
    pub nominal: &'static [&'static str],
}

#[derive(Debug, Clone, Copy)]
pub struct UpcomingCondition {
    pub column: &'static str,
    pub days: i64,
    /// Also match dates already before today.
    pub include_overdue: bool,
}

/// Clause phrases used when rendering a domain's notification digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigestTemplate {
    pub recent: Option<&'static str>,
    pub attention: Option<&'static str>,
}

/// One record kind: its form draft, typed fields, table and rule chain.
pub trait Domain: 'static {
    /// Validated, typed field values (everything but the id).
    type Fields: Clone + PartialEq + Debug + Serialize + DeserializeOwned;
    /// Raw form input, one string (or flag) per form control.
    type Draft: Clone + Default + PartialEq + Debug;

    const KIND: DomainKind;
    const SCHEMA: TableSchema;
    const DIGEST: DigestTemplate;
    /// User-facing message for a business-key collision.
    const DUPLICATE_MESSAGE: &'static str;

    /// Ordered, fail-fast rule chain shared by create and save.
    fn validate(draft: &Self::Draft, ctx: &RuleContext) -> ValidationResult<Self::Fields>;

    /// Repopulates form input from stored fields.
    fn to_draft(fields: &Self::Fields) -> Self::Draft;

    fn to_columns(fields: &Self::Fields) -> Vec<Value>;

    fn from_row(row: &RowReader<'_, '_>) -> RepoResult<Self::Fields>;

    /// Fills engine-assigned values on a new record.
    fn assign_new(_fields: &mut Self::Fields, _ids: &mut dyn IdSource) {}

    /// Copies engine-assigned values the save path must not overwrite.
    fn carry_immutable(_stored: &Self::Fields, _candidate: &mut Self::Fields) {}
}
