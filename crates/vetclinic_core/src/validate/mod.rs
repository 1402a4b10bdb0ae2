//! Field validation and business-rule primitives.
//!
//! # Responsibility
//! - Provide the presence/format/temporal checks every domain composes into
//!   its own ordered rule chain.
//! - Carry exactly one user-facing message per failure.
//!
//! # Invariants
//! - Rule chains are fail-fast: the first failing rule wins, errors are never
//!   aggregated.
//! - Validation is pure; it never touches storage. The duplicate check runs
//!   later, in the lifecycle service.

use chrono::{NaiveDate, NaiveDateTime};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod field;

pub use field::{
    ensure, is_valid_email, is_valid_integer, is_valid_name, parse_count, parse_date,
    parse_decimal, parse_menu, parse_non_negative, parse_time, require_present,
    NOT_APPLICABLE,
};

/// Message shown when any required field is blank.
pub const MISSING_FIELDS_MESSAGE: &str =
    "Please fill in all fields. Write 'n/a' for inapplicable fields.";

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Outcome of a failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input is rejected; the user must correct it.
    Rejected(String),
    /// Input is acceptable only after the user explicitly confirms it.
    ConfirmationRequired(String),
}

impl ValidationError {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected(message.into())
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Rejected(message) | Self::ConfirmationRequired(message) => message,
        }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl Error for ValidationError {}

/// Ambient facts a rule chain may consult.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleContext {
    pub now: NaiveDateTime,
}

impl RuleContext {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now }
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date()
    }
}
