//! Per-list-view selection state machine.
//!
//! # Invariants
//! - Exactly one of `Idle` or `Selected(id)` holds at any time.
//! - Save and delete are enabled only while a record is selected.
//! - Switching between two rows never passes through `Idle`.

use crate::model::record::RecordId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    Selected(RecordId),
}

/// What the detail form should do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionChange {
    /// Populate the form from this record.
    Populate(RecordId),
    /// Clear the form.
    Clear,
}

impl Selection {
    /// Row click. Clicking the selected row again toggles back to `Idle`.
    pub fn click(&mut self, id: &RecordId) -> SelectionChange {
        if self.selected() == Some(id) {
            self.clear()
        } else {
            self.activate(id)
        }
    }

    /// Double activation always selects `id`, whatever the prior state.
    pub fn activate(&mut self, id: &RecordId) -> SelectionChange {
        *self = Self::Selected(id.clone());
        SelectionChange::Populate(id.clone())
    }

    /// Explicit "clear fields" or removal of the selected record.
    pub fn clear(&mut self) -> SelectionChange {
        *self = Self::Idle;
        SelectionChange::Clear
    }

    pub fn selected(&self) -> Option<&RecordId> {
        match self {
            Self::Idle => None,
            Self::Selected(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Whether save and delete actions are available.
    pub fn actions_enabled(&self) -> bool {
        !self.is_idle()
    }
}
