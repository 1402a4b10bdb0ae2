//! No-op write suppression for the save path.

use crate::model::record::Record;

/// Comparison of a freshly validated candidate against its stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change<F> {
    /// Every mutable field is equal; nothing should be written.
    Unchanged,
    /// Replacement record: the stored id with all candidate field values.
    Changed(Record<F>),
}

impl<F> Change<F> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Self::Unchanged)
    }
}

/// Compares `candidate` with `stored` field by field.
pub fn detect_change<F: PartialEq>(stored: &Record<F>, candidate: F) -> Change<F> {
    if stored.fields == candidate {
        Change::Unchanged
    } else {
        Change::Changed(Record::new(stored.id.clone(), candidate))
    }
}

#[cfg(test)]
mod tests {
    use super::{detect_change, Change};
    use crate::model::record::{Record, RecordId};

    #[test]
    fn equal_fields_are_unchanged() {
        let stored = Record::new(RecordId::new("AB123456"), ("Rex", 3));
        assert!(detect_change(&stored, ("Rex", 3)).is_unchanged());
    }

    #[test]
    fn any_difference_keeps_the_stored_id() {
        let stored = Record::new(RecordId::new("AB123456"), ("Rex", 3));
        assert_eq!(
            detect_change(&stored, ("Rex", 4)),
            Change::Changed(Record::new(RecordId::new("AB123456"), ("Rex", 4)))
        );
    }
}
