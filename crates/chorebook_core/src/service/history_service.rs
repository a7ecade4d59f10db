//! Completion history aggregation.
//!
//! # Responsibility
//! - Turn flat completion rows into per-day (and per-child) groups.
//! - Clamp the requested look-back window.
//!
//! # Invariants
//! - Window is `today - (days - 1) ..= today`, `days` clamped to `1..=365`.
//! - Days are newest first; children within a day are sorted by name.

use crate::clock::Clock;
use crate::model::child::ChildId;
use crate::model::chore::ChoreId;
use crate::repo::history_repo::{HistoryQuery, HistoryRepository, HistoryRow};
use crate::service::ServiceResult;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

pub const DEFAULT_HOUSEHOLD_DAYS: i64 = 7;
pub const DEFAULT_CHILD_DAYS: i64 = 30;
pub const MAX_HISTORY_DAYS: i64 = 365;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryChore {
    pub chore_id: ChoreId,
    pub title: String,
    #[serde(serialize_with = "crate::model::timestamp::serialize")]
    pub completed_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryChild {
    pub id: ChildId,
    pub name: String,
    pub chores: Vec<HistoryChore>,
}

/// One day of household history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    pub children: Vec<HistoryChild>,
}

/// One day of a single child's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChildHistoryDay {
    pub date: NaiveDate,
    pub chores: Vec<HistoryChore>,
}

pub struct HistoryService<R, C> {
    repo: R,
    clock: C,
}

impl<R: HistoryRepository, C: Clock> HistoryService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    /// Household history, optionally filtered to one child.
    pub fn household_history(
        &self,
        days: Option<i64>,
        child_id: Option<ChildId>,
    ) -> ServiceResult<Vec<HistoryDay>> {
        let query = self.window(days.unwrap_or(DEFAULT_HOUSEHOLD_DAYS), child_id);
        let rows = self.repo.list_completions(&query)?;
        Ok(group_household(rows))
    }

    pub fn child_history(
        &self,
        child_id: ChildId,
        days: Option<i64>,
    ) -> ServiceResult<Vec<ChildHistoryDay>> {
        let query = self.window(days.unwrap_or(DEFAULT_CHILD_DAYS), Some(child_id));
        let rows = self.repo.list_completions(&query)?;
        Ok(group_child(rows))
    }

    fn window(&self, days: i64, child_id: Option<ChildId>) -> HistoryQuery {
        let end = self.clock.today();
        let span = clamp_days(days) - 1;
        let start = end
            .checked_sub_days(Days::new(span.unsigned_abs()))
            .unwrap_or(end);
        HistoryQuery {
            start,
            end,
            child_id,
        }
    }
}

pub fn clamp_days(days: i64) -> i64 {
    days.clamp(1, MAX_HISTORY_DAYS)
}

fn to_history_chore(row: &HistoryRow) -> HistoryChore {
    HistoryChore {
        chore_id: row.chore_id,
        title: row.chore_title.clone(),
        completed_at: row.completed_at,
    }
}

/// Rows must arrive ordered by date desc, child name, completion time.
fn group_household(rows: Vec<HistoryRow>) -> Vec<HistoryDay> {
    let mut days: Vec<HistoryDay> = Vec::new();
    for row in &rows {
        if days.last().map(|day| day.date) != Some(row.date) {
            days.push(HistoryDay {
                date: row.date,
                children: Vec::new(),
            });
        }
        let Some(day) = days.last_mut() else {
            continue;
        };

        match day.children.iter_mut().find(|child| child.id == row.child_id) {
            Some(child) => child.chores.push(to_history_chore(row)),
            None => day.children.push(HistoryChild {
                id: row.child_id,
                name: row.child_name.clone(),
                chores: vec![to_history_chore(row)],
            }),
        }
    }

    for day in &mut days {
        day.children
            .sort_by(|left, right| left.name.cmp(&right.name).then(left.id.cmp(&right.id)));
    }
    days
}

fn group_child(rows: Vec<HistoryRow>) -> Vec<ChildHistoryDay> {
    let mut days: Vec<ChildHistoryDay> = Vec::new();
    for row in &rows {
        match days.last_mut() {
            Some(day) if day.date == row.date => day.chores.push(to_history_chore(row)),
            _ => days.push(ChildHistoryDay {
                date: row.date,
                chores: vec![to_history_chore(row)],
            }),
        }
    }
    days
}
