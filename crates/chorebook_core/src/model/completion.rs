//! Completion records.
//!
//! # Invariants
//! - `date` is the calendar day the completion counts for; `completed_at` is
//!   when the action happened.
//! - At most one row exists per `(chore_id, date)`.

use crate::model::chore::ChoreId;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

pub type CompletionId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Completion {
    pub id: CompletionId,
    pub chore_id: ChoreId,
    pub date: NaiveDate,
    #[serde(serialize_with = "crate::model::timestamp::serialize")]
    pub completed_at: NaiveDateTime,
}

/// Outcome of a mark-complete request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionOutcome {
    pub completion: Completion,
    /// `true` when an existing completion already covered the period.
    pub already_completed: bool,
}
