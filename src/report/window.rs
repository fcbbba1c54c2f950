//! Lookback window computation for the daily report.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// A half-open date interval `[since, until)` used to select revisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateWindow {
    /// Compute the report window for `today`.
    ///
    /// On Monday the lookback is 3 days so the window covers the weekend
    /// plus the prior Friday; on every other day it is 1 day. `until` is
    /// `today + 1`, which keeps all of today inside the half-open range.
    ///
    /// The Monday rule is a literal 7-day/Monday-start convention, not a
    /// holiday calendar.
    pub fn for_report(today: NaiveDate) -> Self {
        let lookback = if today.weekday() == Weekday::Mon { 3 } else { 1 };
        Self {
            since: today - Days::new(lookback),
            until: today + Days::new(1),
        }
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.since <= date && date < self.until
    }

    /// Width of the window in days.
    pub fn span_days(&self) -> i64 {
        (self.until - self.since).num_days()
    }
}
