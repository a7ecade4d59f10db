//! Wall-clock capability used by every date-sensitive decision.
//!
//! # Responsibility
//! - Provide "now" and "today" in the host's local calendar.
//! - Let tests pin the calendar deterministically.
//!
//! # Invariants
//! - `today()` is always the date part of `now()`.

use chrono::{Days, Local, NaiveDate, NaiveDateTime, NaiveTime};
use std::sync::{Arc, RwLock};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    /// Current local wall-clock timestamp.
    fn now(&self) -> NaiveDateTime;

    /// Current local calendar date.
    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

impl<T: Clock + ?Sized> Clock for &T {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

impl<T: Clock + ?Sized> Clock for Arc<T> {
    fn now(&self) -> NaiveDateTime {
        (**self).now()
    }
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: RwLock<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: RwLock::new(now),
        }
    }

    /// Pins the clock to 09:00 on `date`.
    pub fn at_date(date: NaiveDate) -> Self {
        Self::new(date.and_time(morning()))
    }

    pub fn set(&self, now: NaiveDateTime) {
        let mut guard = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = now;
    }

    /// Moves to 09:00 on `date`.
    pub fn set_date(&self, date: NaiveDate) {
        self.set(date.and_time(morning()));
    }

    /// Advances the clock by whole calendar days, keeping the time of day.
    pub fn advance_days(&self, days: u64) {
        let mut guard = self.now.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(next) = guard.checked_add_days(Days::new(days)) {
            *guard = next;
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.now.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn morning() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN)
}
