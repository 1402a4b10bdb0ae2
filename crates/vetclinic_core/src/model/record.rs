//! Record identity and the generic record envelope.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque record identifier, assigned once at creation.
///
/// Generated ids follow the `AA000000` shape (see [`crate::model::ids`]), but
/// ids read back from storage are accepted verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One persisted instance of a domain: immutable id plus mutable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record<F> {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: F,
}

impl<F> Record<F> {
    pub fn new(id: RecordId, fields: F) -> Self {
        Self { id, fields }
    }
}

/// The eight record kinds managed by the clinic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKind {
    Patient,
    Boarder,
    Appointment,
    Item,
    Kennel,
    Lab,
    Personnel,
    Transaction,
}

impl DomainKind {
    pub const ALL: [DomainKind; 8] = [
        Self::Patient,
        Self::Boarder,
        Self::Appointment,
        Self::Item,
        Self::Kennel,
        Self::Lab,
        Self::Personnel,
        Self::Transaction,
    ];

    /// Stable lowercase name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Boarder => "boarder",
            Self::Appointment => "appointment",
            Self::Item => "item",
            Self::Kennel => "kennel",
            Self::Lab => "lab",
            Self::Personnel => "personnel",
            Self::Transaction => "transaction",
        }
    }
}

impl Display for DomainKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
