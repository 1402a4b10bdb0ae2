//! List-and-detail view state for one domain.
//!
//! # Responsibility
//! - Own the cached rows, the selection state machine and the detail form.
//! - Apply lifecycle outcomes to the cache.
//!
//! # Invariants
//! - The cache changes only after the store acknowledged the write. A failed
//!   operation leaves rows, selection and form as they were.
//! - While the selection is `Idle` the form holds no record's values unless
//!   the user typed them.

use super::record_service::{
    Confirmation, DeleteOutcome, LifecycleResult, RecordService, SaveOutcome,
};
use super::selection::{Selection, SelectionChange};
use crate::clock::{Clock, SystemClock};
use crate::model::domain::Domain;
use crate::model::ids::{IdGenerator, IdSource};
use crate::model::record::{Record, RecordId};
use crate::repo::RecordStore;

pub struct ListView<
    D: Domain,
    S: RecordStore<D>,
    C: Clock = SystemClock,
    I: IdSource = IdGenerator,
> {
    service: RecordService<D, S, C, I>,
    rows: Vec<Record<D::Fields>>,
    selection: Selection,
    form: D::Draft,
}

impl<D: Domain, S: RecordStore<D>, C: Clock, I: IdSource> ListView<D, S, C, I> {
    /// Builds the view and fills the cache from the store.
    pub fn load(service: RecordService<D, S, C, I>) -> LifecycleResult<Self> {
        let rows = service.list()?;
        Ok(Self {
            service,
            rows,
            selection: Selection::Idle,
            form: D::Draft::default(),
        })
    }

    /// Reloads the cache, dropping a selection whose row disappeared.
    pub fn refresh(&mut self) -> LifecycleResult<()> {
        self.rows = self.service.list()?;
        let stale = self
            .selection
            .selected()
            .is_some_and(|id| self.position(id).is_none());
        if stale {
            self.clear();
        }
        Ok(())
    }

    pub fn rows(&self) -> &[Record<D::Fields>] {
        &self.rows
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn form(&self) -> &D::Draft {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut D::Draft {
        &mut self.form
    }

    pub fn service(&self) -> &RecordService<D, S, C, I> {
        &self.service
    }

    /// Row click with toggle-off semantics.
    pub fn click(&mut self, id: &RecordId) {
        let change = self.selection.click(id);
        self.apply(change);
    }

    /// Double click: selects `id` regardless of the prior state.
    pub fn activate(&mut self, id: &RecordId) {
        let change = self.selection.activate(id);
        self.apply(change);
    }

    /// "Clear fields" action.
    pub fn clear(&mut self) {
        let change = self.selection.clear();
        self.apply(change);
    }

    /// Creates a record from the current form.
    pub fn create(&mut self) -> LifecycleResult<RecordId> {
        let draft = self.form.clone();
        let record = self.service.create(&draft)?;
        let id = record.id.clone();
        self.rows.push(record);
        self.clear();
        Ok(id)
    }

    /// Saves the current form over the selected record.
    pub fn save(&mut self) -> LifecycleResult<SaveOutcome<D::Fields>> {
        let outcome = self.service.save(&self.selection, &self.form)?;
        if let SaveOutcome::Updated(record) = &outcome {
            if let Some(index) = self.position(&record.id) {
                self.rows[index] = record.clone();
            }
            self.form = D::to_draft(&record.fields);
        }
        Ok(outcome)
    }

    /// Deletes the selected record once confirmed.
    pub fn delete(&mut self, confirmation: Confirmation) -> LifecycleResult<DeleteOutcome> {
        let outcome = self.service.delete(&self.selection, confirmation)?;
        if let DeleteOutcome::Deleted(id) = &outcome {
            self.rows.retain(|row| &row.id != id);
            self.clear();
        }
        Ok(outcome)
    }

    fn position(&self, id: &RecordId) -> Option<usize> {
        self.rows.iter().position(|row| &row.id == id)
    }

    fn apply(&mut self, change: SelectionChange) {
        match change {
            SelectionChange::Populate(id) => match self.position(&id) {
                Some(index) => self.form = D::to_draft(&self.rows[index].fields),
                None => {
                    self.selection = Selection::Idle;
                    self.form = D::Draft::default();
                }
            },
            SelectionChange::Clear => self.form = D::Draft::default(),
        }
    }
}
