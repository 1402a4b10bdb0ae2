//! Record lifecycle use-case service.
//!
//! # Responsibility
//! - Drive create/save/delete for one domain: rule chain, duplicate check,
//!   change detection and persistence, in that order.
//! - Translate store failures into caller-facing lifecycle errors.
//!
//! # Invariants
//! - Create and save run the same rule chain.
//! - A failed operation leaves the store untouched; nothing is retried.
//! - Save never writes when the candidate equals the stored record.
//! - Delete requires an explicit confirmation.

use super::change::{detect_change, Change};
use super::selection::Selection;
use crate::clock::{Clock, SystemClock};
use crate::model::domain::Domain;
use crate::model::ids::{IdGenerator, IdSource};
use crate::model::record::{DomainKind, Record, RecordId};
use crate::repo::{InsertOutcome, RecordStore, RepoError};
use crate::validate::{RuleContext, ValidationError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type LifecycleResult<T> = Result<T, LifecycleError>;

/// Caller-facing failure of a lifecycle operation.
#[derive(Debug)]
pub enum LifecycleError {
    /// Input failed the rule chain; correct it and retry.
    Validation(ValidationError),
    /// A record with the same business key already exists.
    Duplicate(&'static str),
    /// The targeted record no longer exists.
    NotFound { kind: DomainKind, id: RecordId },
    /// Save or delete was requested while nothing is selected.
    NoSelection,
    /// The record store call failed.
    Persistence(RepoError),
}

impl LifecycleError {
    /// One user-facing line for this failure.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(err) => err.message().to_string(),
            Self::Duplicate(message) => (*message).to_string(),
            Self::NotFound { .. } => "The selected record no longer exists.".to_string(),
            Self::NoSelection => "Please select a record first.".to_string(),
            Self::Persistence(_) => "An unexpected database error occurred.".to_string(),
        }
    }
}

impl Display for LifecycleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate(message) => f.write_str(message),
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
            Self::NoSelection => f.write_str("no record selected"),
            Self::Persistence(err) => write!(f, "{err}"),
        }
    }
}

impl Error for LifecycleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Persistence(err) => Some(err),
            Self::Duplicate(_) | Self::NotFound { .. } | Self::NoSelection => None,
        }
    }
}

impl From<ValidationError> for LifecycleError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for LifecycleError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { kind, id } => Self::NotFound { kind, id },
            other => Self::Persistence(other),
        }
    }
}

/// Result of a save that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome<F> {
    /// Candidate equals the stored record; nothing was written.
    Unchanged,
    Updated(Record<F>),
}

/// User answer to the delete prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(RecordId),
    /// The user declined; nothing was written.
    Cancelled,
}

/// Lifecycle service for domain `D` over store `S`.
pub struct RecordService<
    D: Domain,
    S: RecordStore<D>,
    C: Clock = SystemClock,
    I: IdSource = IdGenerator,
> {
    store: S,
    clock: C,
    ids: I,
    _domain: PhantomData<fn() -> D>,
}

impl<D: Domain, S: RecordStore<D>> RecordService<D, S> {
    /// Creates a service on the local wall clock and random id generator.
    pub fn new(store: S) -> Self {
        Self::with_parts(store, SystemClock, IdGenerator::new())
    }
}

impl<D: Domain, S: RecordStore<D>, C: Clock, I: IdSource> RecordService<D, S, C, I> {
    pub fn with_parts(store: S, clock: C, ids: I) -> Self {
        Self {
            store,
            clock,
            ids,
            _domain: PhantomData,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn rule_context(&self) -> RuleContext {
        RuleContext::new(self.clock.now())
    }

    /// Validates `draft` and inserts it as a new record.
    ///
    /// # Errors
    /// - [`LifecycleError::Validation`] when a rule fails.
    /// - [`LifecycleError::Duplicate`] when the business key is taken.
    /// - [`LifecycleError::Persistence`] when the store call fails.
    pub fn create(&mut self, draft: &D::Draft) -> LifecycleResult<Record<D::Fields>> {
        let domain = D::KIND;
        let mut fields = D::validate(draft, &self.rule_context())?;
        D::assign_new(&mut fields, &mut self.ids);
        let record = Record::new(self.ids.next_id(), fields);

        match self.store.insert_unique(&record) {
            Ok(InsertOutcome::Inserted) => {
                info!(
                    "event=record_create module=service status=ok domain={domain} id={}",
                    record.id
                );
                Ok(record)
            }
            Ok(InsertOutcome::Duplicate) => {
                info!("event=record_create module=service status=duplicate domain={domain}");
                Err(LifecycleError::Duplicate(D::DUPLICATE_MESSAGE))
            }
            Err(err) => {
                warn!(
                    "event=record_create module=service status=error domain={domain} error={err}"
                );
                Err(err.into())
            }
        }
    }

    /// Validates `draft` and writes it over the selected record if anything
    /// changed.
    ///
    /// Engine-assigned fields of the stored record are kept.
    pub fn save(
        &self,
        selection: &Selection,
        draft: &D::Draft,
    ) -> LifecycleResult<SaveOutcome<D::Fields>> {
        let domain = D::KIND;
        let id = selection.selected().ok_or(LifecycleError::NoSelection)?;
        let mut candidate = D::validate(draft, &self.rule_context())?;
        let stored = self
            .store
            .get(id)?
            .ok_or_else(|| LifecycleError::NotFound {
                kind: domain,
                id: id.clone(),
            })?;
        D::carry_immutable(&stored.fields, &mut candidate);

        match detect_change(&stored, candidate) {
            Change::Unchanged => {
                info!("event=record_save module=service status=unchanged domain={domain} id={id}");
                Ok(SaveOutcome::Unchanged)
            }
            Change::Changed(record) => {
                if let Err(err) = self.store.update(&record) {
                    warn!(
                        "event=record_save module=service status=error domain={domain} id={id} error={err}"
                    );
                    return Err(err.into());
                }
                info!("event=record_save module=service status=ok domain={domain} id={id}");
                Ok(SaveOutcome::Updated(record))
            }
        }
    }

    /// Deletes the selected record once the user confirmed.
    pub fn delete(
        &self,
        selection: &Selection,
        confirmation: Confirmation,
    ) -> LifecycleResult<DeleteOutcome> {
        let domain = D::KIND;
        let id = selection.selected().ok_or(LifecycleError::NoSelection)?;
        if confirmation == Confirmation::Declined {
            info!("event=record_delete module=service status=cancelled domain={domain} id={id}");
            return Ok(DeleteOutcome::Cancelled);
        }

        if let Err(err) = self.store.delete(id) {
            warn!(
                "event=record_delete module=service status=error domain={domain} id={id} error={err}"
            );
            return Err(err.into());
        }
        info!("event=record_delete module=service status=ok domain={domain} id={id}");
        Ok(DeleteOutcome::Deleted(id.clone()))
    }

    pub fn list(&self) -> LifecycleResult<Vec<Record<D::Fields>>> {
        Ok(self.store.list()?)
    }

    pub fn get(&self, id: &RecordId) -> LifecycleResult<Option<Record<D::Fields>>> {
        Ok(self.store.get(id)?)
    }

    pub fn count(&self) -> LifecycleResult<u64> {
        Ok(self.store.count()?)
    }
}
