//! Read-only notification digests across domains.
//!
//! # Responsibility
//! - Query every domain's "recent" and "needs attention" predicates.
//! - Render each domain's counts into fixed-template text.
//!
//! # Invariants
//! - Aggregation never writes.
//! - A failing predicate surfaces its error; counts are never defaulted.

use crate::clock::{Clock, DateWindow};
use crate::model::domain::{DigestTemplate, Domain};
use crate::model::record::DomainKind;
use crate::repo::{RecordStore, RepoResult, SqliteRecordStore};
use chrono::NaiveDate;
use serde::Serialize;

pub const NO_NEW_NOTIFICATIONS: &str = "No new notifications.";

/// Summary predicates one domain contributes to the dashboard.
pub trait DigestSource {
    fn kind(&self) -> DomainKind;
    fn template(&self) -> DigestTemplate;
    fn count_recent(&self, week: DateWindow) -> RepoResult<u64>;
    fn count_needing_attention(&self, today: NaiveDate) -> RepoResult<u64>;
}

impl<D: Domain> DigestSource for SqliteRecordStore<'_, D> {
    fn kind(&self) -> DomainKind {
        D::KIND
    }

    fn template(&self) -> DigestTemplate {
        D::DIGEST
    }

    fn count_recent(&self, week: DateWindow) -> RepoResult<u64> {
        RecordStore::<D>::count_recent(self, week)
    }

    fn count_needing_attention(&self, today: NaiveDate) -> RepoResult<u64> {
        RecordStore::<D>::count_needing_attention(self, today)
    }
}

/// One domain's rendered digest plus the counts behind it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainDigest {
    pub kind: DomainKind,
    pub recent: u64,
    pub needing_attention: u64,
    pub text: String,
}

/// Renders counts through a domain's clause phrases.
///
/// Only clauses whose phrase exists and whose count is non-zero are shown.
pub fn render_digest(template: DigestTemplate, recent: u64, needing_attention: u64) -> String {
    let clauses = [
        template.recent.map(|phrase| (recent, phrase)),
        template.attention.map(|phrase| (needing_attention, phrase)),
    ];
    let shown: Vec<(u64, &str)> = clauses
        .into_iter()
        .flatten()
        .filter(|(count, _)| *count > 0)
        .collect();

    match shown.as_slice() {
        [] => NO_NEW_NOTIFICATIONS.to_string(),
        [(count, phrase)] => format!("{count} {phrase}."),
        [(first, first_phrase), (second, second_phrase), ..] => {
            format!("You have {first} {first_phrase} and {second} {second_phrase}.")
        }
    }
}

/// Composes digests for a set of domains as of the injected clock's today.
pub struct NotificationAggregator<C: Clock> {
    clock: C,
}

impl<C: Clock> NotificationAggregator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    pub fn digest(&self, source: &dyn DigestSource) -> RepoResult<DomainDigest> {
        let today = self.clock.today();
        let template = source.template();
        // Predicates a domain does not define are never queried.
        let recent = match template.recent {
            Some(_) => source.count_recent(DateWindow::week_containing(today))?,
            None => 0,
        };
        let needing_attention = match template.attention {
            Some(_) => source.count_needing_attention(today)?,
            None => 0,
        };

        Ok(DomainDigest {
            kind: source.kind(),
            recent,
            needing_attention,
            text: render_digest(template, recent, needing_attention),
        })
    }

    /// Digests in `sources` order; stops at the first failing predicate.
    pub fn collect(&self, sources: &[&dyn DigestSource]) -> RepoResult<Vec<DomainDigest>> {
        sources.iter().map(|source| self.digest(*source)).collect()
    }
}
