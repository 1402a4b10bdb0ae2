//! Lazily (re)opened connection handle.
//!
//! # Responsibility
//! - Hold the one live connection a process uses for every record store.
//! - Reopen the connection on demand after it was closed.
//!
//! # Invariants
//! - The handle is single-owner; callers serialize access through `&mut self`.
//! - A reopened in-memory source starts from an empty, migrated database.

use super::{open_db, open_db_in_memory, DbResult};
use log::info;
use rusqlite::Connection;
use std::path::PathBuf;

/// Where a [`DbHandle`] opens its connection from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbSource {
    File(PathBuf),
    Memory,
}

/// Single live connection, opened on first use.
pub struct DbHandle {
    source: DbSource,
    conn: Option<Connection>,
}

impl DbHandle {
    /// Creates a closed handle; nothing is opened until [`DbHandle::connection`].
    pub fn new(source: DbSource) -> Self {
        Self { source, conn: None }
    }

    pub fn source(&self) -> &DbSource {
        &self.source
    }

    pub fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    /// Returns the live connection, opening it first when closed.
    pub fn connection(&mut self) -> DbResult<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => match &self.source {
                DbSource::File(path) => open_db(path)?,
                DbSource::Memory => open_db_in_memory()?,
            },
        };
        Ok(self.conn.insert(conn))
    }

    /// Closes the live connection. The next [`DbHandle::connection`] reopens it.
    pub fn close(&mut self) -> DbResult<()> {
        if let Some(conn) = self.conn.take() {
            conn.close().map_err(|(_, err)| err)?;
            info!("event=db_close module=db status=ok");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{DbHandle, DbSource};

    #[test]
    fn handle_opens_lazily_and_reopens_after_close() {
        let dir = tempfile::tempdir().unwrap();
        let mut handle = DbHandle::new(DbSource::File(dir.path().join("clinic.db")));
        assert!(!handle.is_open());

        handle
            .connection()
            .unwrap()
            .execute(
                "INSERT INTO kennels (kennel_id, kennel_name, kennel_capacity, kennel_status)
                 VALUES ('KN000001', 'Boarding Kennel', 4, 'Vacant');",
                [],
            )
            .unwrap();
        assert!(handle.is_open());

        handle.close().unwrap();
        assert!(!handle.is_open());

        let count: i64 = handle
            .connection()
            .unwrap()
            .query_row("SELECT COUNT(*) FROM kennels;", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }
}
