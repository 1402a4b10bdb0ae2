//! Presence and format checks for raw form input.

use super::{ValidationError, ValidationResult};
use crate::model::menu::MenuValue;
use chrono::{NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Sentinel users type to mark an inapplicable field. Passes presence checks.
pub const NOT_APPLICABLE: &str = "n/a";

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

static NAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid name regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.-]+@[\w.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});
static INTEGER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid integer regex"));
static DATE_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date shape regex"));
static TIME_SHAPE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2}:[0-9]{2}$").expect("valid time shape regex"));

/// Fails with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: &str) -> ValidationResult<()> {
    if condition {
        Ok(())
    } else {
        Err(ValidationError::rejected(message))
    }
}

/// Fails with `message` when any value is blank after trimming.
pub fn require_present(values: &[&str], message: &str) -> ValidationResult<()> {
    ensure(values.iter().all(|value| !value.trim().is_empty()), message)
}

/// Letters and spaces only.
pub fn is_valid_name(value: &str) -> bool {
    NAME_RE.is_match(value)
}

/// `local@domain.tld` with a two-letter-or-longer alphabetic TLD.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// ASCII digits only.
pub fn is_valid_integer(value: &str) -> bool {
    INTEGER_RE.is_match(value)
}

/// Parses a digit-only count.
pub fn parse_count(value: &str, message: &str) -> ValidationResult<u32> {
    let trimmed = value.trim();
    if !is_valid_integer(trimmed) {
        return Err(ValidationError::rejected(message));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::rejected(message))
}

/// Parses any decimal, sign included.
pub fn parse_decimal(value: &str, message: &str) -> ValidationResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(|_| ValidationError::rejected(message))
}

/// Parses a decimal and rejects negatives with `negative_message`.
pub fn parse_non_negative(
    value: &str,
    format_message: &str,
    negative_message: &str,
) -> ValidationResult<Decimal> {
    let parsed = parse_decimal(value, format_message)?;
    ensure(!parsed.is_sign_negative() || parsed.is_zero(), negative_message)?;
    Ok(parsed)
}

/// Parses `yyyy-MM-dd`.
pub fn parse_date(value: &str, message: &str) -> ValidationResult<NaiveDate> {
    let trimmed = value.trim();
    if !DATE_SHAPE_RE.is_match(trimmed) {
        return Err(ValidationError::rejected(message));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| ValidationError::rejected(message))
}

/// Parses `HH:mm` on a 24-hour clock.
pub fn parse_time(value: &str, message: &str) -> ValidationResult<NaiveTime> {
    let trimmed = value.trim();
    if !TIME_SHAPE_RE.is_match(trimmed) {
        return Err(ValidationError::rejected(message));
    }
    NaiveTime::parse_from_str(trimmed, TIME_FORMAT).map_err(|_| ValidationError::rejected(message))
}

/// Maps a menu label to its closed enumeration value.
pub fn parse_menu<M: MenuValue>(value: &str, message: &str) -> ValidationResult<M> {
    M::parse(value.trim()).ok_or_else(|| ValidationError::rejected(message))
}
