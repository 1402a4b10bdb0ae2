//! Column value encoding shared by every domain table.
//!
//! # Invariants
//! - Dates are stored as `YYYY-MM-DD`, times as `HH:MM`, date-times as
//!   `YYYY-MM-DD HH:MM:SS`, so lexical order equals chronological order.
//! - Decimals are stored as normalized TEXT to stay exact.
//! - Reads reject malformed persisted values instead of masking them.

use super::record_store::{RepoError, RepoResult};
use crate::model::menu::MenuValue;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::types::Value;
use rusqlite::Row;
use rust_decimal::Decimal;
use std::str::FromStr;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn text(value: &str) -> Value {
    Value::Text(value.to_string())
}

pub fn opt_text(value: Option<&str>) -> Value {
    value.map_or(Value::Null, text)
}

pub fn menu<M: MenuValue>(value: M) -> Value {
    text(value.as_str())
}

pub fn opt_menu<M: MenuValue>(value: Option<M>) -> Value {
    value.map_or(Value::Null, menu)
}

pub fn decimal(value: Decimal) -> Value {
    Value::Text(value.normalize().to_string())
}

pub fn count(value: u32) -> Value {
    Value::Integer(i64::from(value))
}

/// Receipt numbers are bounded well below `i64::MAX`.
pub fn receipt(value: u64) -> Value {
    Value::Integer(i64::try_from(value).unwrap_or(i64::MAX))
}

pub fn date(value: NaiveDate) -> Value {
    Value::Text(date_text(value))
}

pub fn opt_date(value: Option<NaiveDate>) -> Value {
    value.map_or(Value::Null, date)
}

pub fn time(value: NaiveTime) -> Value {
    Value::Text(value.format(TIME_FORMAT).to_string())
}

pub fn datetime(value: NaiveDateTime) -> Value {
    Value::Text(value.format(DATETIME_FORMAT).to_string())
}

pub fn date_text(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

/// Typed column reader bound to one table row.
pub struct RowReader<'row, 'stmt> {
    row: &'row Row<'stmt>,
    table: &'static str,
}

impl<'row, 'stmt> RowReader<'row, 'stmt> {
    pub fn new(row: &'row Row<'stmt>, table: &'static str) -> Self {
        Self { row, table }
    }

    pub fn text(&self, column: &str) -> RepoResult<String> {
        Ok(self.row.get(column)?)
    }

    pub fn opt_text(&self, column: &str) -> RepoResult<Option<String>> {
        Ok(self.row.get(column)?)
    }

    pub fn menu<M: MenuValue>(&self, column: &str) -> RepoResult<M> {
        let value = self.text(column)?;
        M::parse(&value).ok_or_else(|| self.invalid("menu value", &value, column))
    }

    pub fn opt_menu<M: MenuValue>(&self, column: &str) -> RepoResult<Option<M>> {
        match self.opt_text(column)? {
            Some(value) => M::parse(&value)
                .map(Some)
                .ok_or_else(|| self.invalid("menu value", &value, column)),
            None => Ok(None),
        }
    }

    pub fn decimal(&self, column: &str) -> RepoResult<Decimal> {
        let value = self.text(column)?;
        Decimal::from_str(&value).map_err(|_| self.invalid("decimal", &value, column))
    }

    pub fn count(&self, column: &str) -> RepoResult<u32> {
        let value: i64 = self.row.get(column)?;
        u32::try_from(value).map_err(|_| self.invalid("count", &value.to_string(), column))
    }

    pub fn receipt(&self, column: &str) -> RepoResult<u64> {
        let value: i64 = self.row.get(column)?;
        u64::try_from(value).map_err(|_| self.invalid("receipt number", &value.to_string(), column))
    }

    pub fn date(&self, column: &str) -> RepoResult<NaiveDate> {
        let value = self.text(column)?;
        NaiveDate::parse_from_str(&value, DATE_FORMAT)
            .map_err(|_| self.invalid("date", &value, column))
    }

    pub fn opt_date(&self, column: &str) -> RepoResult<Option<NaiveDate>> {
        match self.opt_text(column)? {
            Some(value) => NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .map(Some)
                .map_err(|_| self.invalid("date", &value, column)),
            None => Ok(None),
        }
    }

    pub fn time(&self, column: &str) -> RepoResult<NaiveTime> {
        let value = self.text(column)?;
        NaiveTime::parse_from_str(&value, TIME_FORMAT)
            .map_err(|_| self.invalid("time", &value, column))
    }

    pub fn datetime(&self, column: &str) -> RepoResult<NaiveDateTime> {
        let value = self.text(column)?;
        NaiveDateTime::parse_from_str(&value, DATETIME_FORMAT)
            .map_err(|_| self.invalid("date-time", &value, column))
    }

    fn invalid(&self, what: &str, value: &str, column: &str) -> RepoError {
        RepoError::InvalidData(format!(
            "invalid {what} `{value}` in {}.{column}",
            self.table
        ))
    }
}
