//! Injectable wall clock and calendar windows.
//!
//! # Responsibility
//! - Give temporal business rules a single, replaceable source of "now".
//! - Compute the Sunday-through-Saturday week used by dashboard predicates.
//!
//! # Invariants
//! - [`DateWindow::week_containing`] always spans exactly seven days, Sunday
//!   to Saturday, both ends inclusive.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Source of the current local date and time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at one instant. Used by tests and replay tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// Calendar week (Sunday through Saturday) containing `date`.
    pub fn week_containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_sunday());
        let start = date - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// `[from, from + days]`.
    pub fn upcoming(from: NaiveDate, days: i64) -> Self {
        Self {
            start: from,
            end: from + Duration::days(days),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Short label such as `Oct 18 - Oct 24`.
    pub fn label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, DateWindow, FixedClock};
    use chrono::{Datelike, NaiveDate, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_runs_sunday_through_saturday() {
        // 2026-10-21 is a Wednesday.
        let week = DateWindow::week_containing(date(2026, 10, 21));
        assert_eq!(week.start, date(2026, 10, 18));
        assert_eq!(week.start.weekday(), Weekday::Sun);
        assert_eq!(week.end, date(2026, 10, 24));
        assert_eq!(week.end.weekday(), Weekday::Sat);
    }

    #[test]
    fn sunday_opens_its_own_week() {
        let week = DateWindow::week_containing(date(2026, 10, 18));
        assert_eq!(week.start, date(2026, 10, 18));
        assert!(week.contains(date(2026, 10, 18)));
        assert!(!week.contains(date(2026, 10, 17)));
    }

    #[test]
    fn label_uses_short_month_and_day() {
        let week = DateWindow::week_containing(date(2026, 10, 21));
        assert_eq!(week.label(), "Oct 18 - Oct 24");
    }

    #[test]
    fn fixed_clock_today_is_date_part() {
        let clock = FixedClock(date(2026, 10, 21).and_hms_opt(9, 30, 0).unwrap());
        assert_eq!(clock.today(), date(2026, 10, 21));
    }
}
