//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the record store contract every domain is persisted through.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes receive already validated fields; validation lives in
//!   the domain rule chains.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod codec;
pub mod record_store;

pub use record_store::{InsertOutcome, RecordStore, RepoError, RepoResult, SqliteRecordStore};
