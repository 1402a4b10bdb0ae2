//! Record store contract and its generic SQLite implementation.
//!
//! # Responsibility
//! - Provide the per-domain persistence operations (existence by business
//!   key, insert, update, delete, list, count) and the two summary predicates
//!   consumed by the notification aggregator.
//! - Keep SQL details inside the persistence boundary. SQL text is derived
//!   from the domain's [`TableSchema`], so all eight domains share one
//!   implementation.
//!
//! # Invariants
//! - Updates never touch the id column.
//! - `insert_unique` runs the business-key check and the insert inside one
//!   immediate transaction.
//! - Read paths reject invalid persisted state instead of masking it.

use super::codec::{date, RowReader};
use crate::clock::DateWindow;
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::domain::{Domain, TableSchema};
use crate::model::record::{DomainKind, Record, RecordId};
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors from record store operations.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// No row with this id exists in the domain table.
    NotFound { kind: DomainKind, id: RecordId },
    /// Persisted data cannot be converted to a valid record.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "record store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::NotFound { .. } => None,
            Self::InvalidData(_) => None,
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Result of an atomic check-then-insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    /// A record with the same business key already exists; nothing was written.
    Duplicate,
}

/// Persistence contract implemented once per domain.
pub trait RecordStore<D: Domain> {
    /// Whether a record with the same business key as `fields` exists.
    fn exists(&self, fields: &D::Fields) -> RepoResult<bool>;
    fn insert(&self, record: &Record<D::Fields>) -> RepoResult<()>;
    /// Business-key check and insert as one atomic step.
    fn insert_unique(&self, record: &Record<D::Fields>) -> RepoResult<InsertOutcome>;
    /// Replaces all mutable fields of the record with the same id.
    fn update(&self, record: &Record<D::Fields>) -> RepoResult<()>;
    fn delete(&self, id: &RecordId) -> RepoResult<()>;
    fn get(&self, id: &RecordId) -> RepoResult<Option<Record<D::Fields>>>;
    /// All records in insertion order.
    fn list(&self) -> RepoResult<Vec<Record<D::Fields>>>;
    fn count(&self) -> RepoResult<u64>;
    /// Records whose recent-date column falls inside `window`.
    ///
    /// Domains without a recent-date column always report zero.
    fn count_recent(&self, window: DateWindow) -> RepoResult<u64>;
    /// Records matching the domain's attention rule as of `today`.
    ///
    /// Domains without an attention rule always report zero.
    fn count_needing_attention(&self, today: NaiveDate) -> RepoResult<u64>;
    /// Records whose recent-date column falls inside `window`, oldest first.
    fn list_recent(&self, window: DateWindow) -> RepoResult<Vec<Record<D::Fields>>>;
}

/// SQLite-backed store for domain `D`.
pub struct SqliteRecordStore<'conn, D: Domain> {
    conn: &'conn Connection,
    _domain: PhantomData<fn() -> D>,
}

impl<'conn, D: Domain> SqliteRecordStore<'conn, D> {
    /// Creates a store after verifying the connection carries `D`'s table.
    ///
    /// # Errors
    /// - [`RepoError::UninitializedConnection`] if migrations were not applied.
    /// - [`RepoError::MissingRequiredTable`] / [`RepoError::MissingRequiredColumn`]
    ///   if the table shape does not match the schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_store_connection_ready(conn, &D::SCHEMA)?;
        Ok(Self {
            conn,
            _domain: PhantomData,
        })
    }

    fn schema() -> TableSchema {
        D::SCHEMA
    }

    fn select_sql() -> String {
        let schema = Self::schema();
        format!(
            "SELECT {}, {} FROM {}",
            schema.id_column,
            schema.columns.join(", "),
            schema.table
        )
    }

    fn query_records(&self, sql: &str, bind: Vec<Value>) -> RepoResult<Vec<Record<D::Fields>>> {
        let schema = Self::schema();
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            let reader = RowReader::new(row, schema.table);
            let id: String = row.get(schema.id_column)?;
            records.push(Record::new(RecordId::new(id), D::from_row(&reader)?));
        }

        Ok(records)
    }

    fn query_count(&self, sql: &str, bind: Vec<Value>) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row(sql, params_from_iter(bind), |row| row.get(0))?;
        u64::try_from(count).map_err(|_| {
            RepoError::InvalidData(format!(
                "negative row count `{count}` from {}",
                Self::schema().table
            ))
        })
    }

    fn exists_on(conn: &Connection, fields: &D::Fields) -> RepoResult<bool> {
        let schema = Self::schema();
        let columns = D::to_columns(fields);
        let mut clauses = Vec::with_capacity(schema.business_key.len());
        let mut bind = Vec::with_capacity(schema.business_key.len());

        for key in schema.business_key {
            let index = schema.column_index(key).ok_or(RepoError::MissingRequiredColumn {
                table: schema.table,
                column: *key,
            })?;
            let value = columns.get(index).cloned().ok_or_else(|| {
                RepoError::InvalidData(format!(
                    "{} values are missing business key column `{key}`",
                    schema.table
                ))
            })?;
            // `IS` so an absent optional value matches another absent value.
            clauses.push(format!("{key} IS ?"));
            bind.push(value);
        }

        let exists: i64 = conn.query_row(
            &format!(
                "SELECT EXISTS(SELECT 1 FROM {} WHERE {});",
                schema.table,
                clauses.join(" AND ")
            ),
            params_from_iter(bind),
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn insert_on(conn: &Connection, record: &Record<D::Fields>) -> RepoResult<()> {
        let schema = Self::schema();
        let mut bind = Vec::with_capacity(schema.columns.len() + 1);
        bind.push(Value::Text(record.id.as_str().to_string()));
        bind.extend(checked_columns::<D>(&record.fields)?);

        let placeholders = vec!["?"; bind.len()].join(", ");
        conn.execute(
            &format!(
                "INSERT INTO {} ({}, {}) VALUES ({placeholders});",
                schema.table,
                schema.id_column,
                schema.columns.join(", ")
            ),
            params_from_iter(bind),
        )?;
        Ok(())
    }
}

impl<D: Domain> RecordStore<D> for SqliteRecordStore<'_, D> {
    fn exists(&self, fields: &D::Fields) -> RepoResult<bool> {
        Self::exists_on(self.conn, fields)
    }

    fn insert(&self, record: &Record<D::Fields>) -> RepoResult<()> {
        Self::insert_on(self.conn, record)
    }

    fn insert_unique(&self, record: &Record<D::Fields>) -> RepoResult<InsertOutcome> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if Self::exists_on(&tx, &record.fields)? {
            tx.rollback()?;
            return Ok(InsertOutcome::Duplicate);
        }
        Self::insert_on(&tx, record)?;
        tx.commit()?;
        Ok(InsertOutcome::Inserted)
    }

    fn update(&self, record: &Record<D::Fields>) -> RepoResult<()> {
        let schema = Self::schema();
        let mut bind = checked_columns::<D>(&record.fields)?;
        bind.push(Value::Text(record.id.as_str().to_string()));

        let assignments = schema
            .columns
            .iter()
            .map(|column| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET {assignments} WHERE {} = ?;",
                schema.table, schema.id_column
            ),
            params_from_iter(bind),
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: D::KIND,
                id: record.id.clone(),
            });
        }

        Ok(())
    }

    fn delete(&self, id: &RecordId) -> RepoResult<()> {
        let schema = Self::schema();
        let changed = self.conn.execute(
            &format!(
                "DELETE FROM {} WHERE {} = ?1;",
                schema.table, schema.id_column
            ),
            [id.as_str()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                kind: D::KIND,
                id: id.clone(),
            });
        }

        Ok(())
    }

    fn get(&self, id: &RecordId) -> RepoResult<Option<Record<D::Fields>>> {
        let sql = format!("{} WHERE {} = ?;", Self::select_sql(), Self::schema().id_column);
        let mut records = self.query_records(&sql, vec![Value::Text(id.as_str().to_string())])?;
        Ok(records.pop())
    }

    fn list(&self) -> RepoResult<Vec<Record<D::Fields>>> {
        let sql = format!("{} ORDER BY rowid ASC;", Self::select_sql());
        self.query_records(&sql, Vec::new())
    }

    fn count(&self) -> RepoResult<u64> {
        self.query_count(
            &format!("SELECT COUNT(*) FROM {};", Self::schema().table),
            Vec::new(),
        )
    }

    fn count_recent(&self, window: DateWindow) -> RepoResult<u64> {
        let schema = Self::schema();
        let Some(column) = schema.recent_column else {
            return Ok(0);
        };

        self.query_count(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE {column} BETWEEN ? AND ?;",
                schema.table
            ),
            vec![date(window.start), date(window.end)],
        )
    }

    fn count_needing_attention(&self, today: NaiveDate) -> RepoResult<u64> {
        let schema = Self::schema();
        let rule = schema.attention;
        if !rule.is_defined() {
            return Ok(0);
        }

        let mut clauses = Vec::new();
        let mut bind = Vec::new();

        if let Some(status) = rule.status {
            let placeholders = vec!["?"; status.nominal.len()].join(", ");
            clauses.push(format!("{} NOT IN ({placeholders})", status.column));
            bind.extend(
                status
                    .nominal
                    .iter()
                    .map(|value| Value::Text((*value).to_string())),
            );
        }

        if let Some(upcoming) = rule.upcoming {
            let window = DateWindow::upcoming(today, upcoming.days);
            if upcoming.include_overdue {
                clauses.push(format!("{} <= ?", upcoming.column));
            } else {
                clauses.push(format!("{} BETWEEN ? AND ?", upcoming.column));
                bind.push(date(window.start));
            }
            bind.push(date(window.end));
        }

        self.query_count(
            &format!(
                "SELECT COUNT(*) FROM {} WHERE {};",
                schema.table,
                clauses.join(" AND ")
            ),
            bind,
        )
    }

    fn list_recent(&self, window: DateWindow) -> RepoResult<Vec<Record<D::Fields>>> {
        let schema = Self::schema();
        let Some(column) = schema.recent_column else {
            return Ok(Vec::new());
        };

        let sql = format!(
            "{} WHERE {column} BETWEEN ? AND ? ORDER BY {column} ASC, rowid ASC;",
            Self::select_sql()
        );
        self.query_records(&sql, vec![date(window.start), date(window.end)])
    }
}

fn checked_columns<D: Domain>(fields: &D::Fields) -> RepoResult<Vec<Value>> {
    let schema = &D::SCHEMA;
    let values = D::to_columns(fields);
    if values.len() != schema.columns.len() {
        return Err(RepoError::InvalidData(format!(
            "{} expects {} column values, got {}",
            schema.table,
            schema.columns.len(),
            values.len()
        )));
    }
    Ok(values)
}

fn ensure_store_connection_ready(conn: &Connection, schema: &TableSchema) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, schema.table)? {
        return Err(RepoError::MissingRequiredTable(schema.table));
    }

    for column in std::iter::once(&schema.id_column).chain(schema.columns.iter()) {
        if !table_has_column(conn, schema.table, column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: schema.table,
                column: *column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
