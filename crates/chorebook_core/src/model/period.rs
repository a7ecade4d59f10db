//! Period calculator.
//!
//! # Responsibility
//! - Map a chore frequency and a reference date onto the current period.
//!
//! # Invariants
//! - `period_start(f, d) <= d` for every frequency and date.
//! - Every date inside one day/week/month yields the same start.
//! - Weeks are Monday-aligned.

use crate::model::chore::Frequency;
use chrono::{Datelike, Days, NaiveDate};

/// Returns the first date of the period containing `today`.
///
/// - `Daily`, `OneOff`: `today` itself.
/// - `Weekly`: the Monday on or before `today`.
/// - `Monthly`: the first day of `today`'s month.
pub fn period_start(frequency: Frequency, today: NaiveDate) -> NaiveDate {
    match frequency {
        Frequency::Daily | Frequency::OneOff => today,
        Frequency::Weekly => {
            let days_since_monday = u64::from(today.weekday().num_days_from_monday());
            today.checked_sub_days(Days::new(days_since_monday)).unwrap_or(today)
        }
        Frequency::Monthly => today.with_day(1).unwrap_or(today),
    }
}

/// Current completion window of one chore, `start..=end` where `end` is today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub frequency: Frequency,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Period {
    pub fn current(frequency: Frequency, today: NaiveDate) -> Self {
        Self {
            frequency,
            start: period_start(frequency, today),
            end: today,
        }
    }

    /// Whether a completion attributed to `date` counts for this period.
    ///
    /// Single-day frequencies match the start date exactly; the others
    /// accept any date in `start..=end`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        if self.frequency.is_single_day() {
            date == self.start
        } else {
            self.start <= date && date <= self.end
        }
    }
}
