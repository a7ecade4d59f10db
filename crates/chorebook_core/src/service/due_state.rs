//! Due-state resolver.
//!
//! # Responsibility
//! - Compute each active chore's completion status for its current period.
//! - Mark and unmark chores for the current period.
//!
//! # Invariants
//! - One-off expiry runs before every due-state read.
//! - Listing order is frequency rank (daily, weekly, monthly, oneoff), then
//!   display order, then id.
//! - Mark-complete needs an active chore; mark-incomplete accepts inactive ones.

use crate::clock::Clock;
use crate::model::child::ChildId;
use crate::model::chore::{ChoreId, Frequency};
use crate::model::completion::CompletionOutcome;
use crate::model::period::Period;
use crate::repo::chore_repo::ChoreRepository;
use crate::service::ledger::CompletionLedger;
use crate::service::lifecycle::ChoreLifecycle;
use crate::service::{ServiceError, ServiceResult};
use chrono::NaiveDateTime;
use log::info;
use serde::Serialize;

/// Current-period view of one chore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoreDueState {
    pub id: ChoreId,
    pub title: String,
    pub frequency: Frequency,
    pub display_order: i64,
    pub completed: bool,
    #[serde(serialize_with = "crate::model::timestamp::serialize_option")]
    pub completed_at: Option<NaiveDateTime>,
}

pub struct DueStateResolver<'a, R: ?Sized, C: ?Sized> {
    repo: &'a R,
    clock: &'a C,
}

impl<'a, R, C> DueStateResolver<'a, R, C>
where
    R: ChoreRepository + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repo: &'a R, clock: &'a C) -> Self {
        Self { repo, clock }
    }

    /// Lists a child's active chores with their current-period status.
    ///
    /// An unknown child yields an empty list.
    pub fn due_state(&self, child_id: ChildId) -> ServiceResult<Vec<ChoreDueState>> {
        ChoreLifecycle::new(self.repo, self.clock).expire_one_off_chores()?;

        let today = self.clock.today();
        let ledger = CompletionLedger::new(self.repo);
        let mut chores = self.repo.list_active_chores_for_child(child_id)?;
        chores.sort_by_key(|chore| (chore.frequency.rank(), chore.display_order, chore.id));

        let mut states = Vec::with_capacity(chores.len());
        for chore in chores {
            let period = Period::current(chore.frequency, today);
            let completion = ledger.find_completion_in_window(chore.id, &period)?;
            states.push(ChoreDueState {
                id: chore.id,
                title: chore.title,
                frequency: chore.frequency,
                display_order: chore.display_order,
                completed: completion.is_some(),
                completed_at: completion.map(|completion| completion.completed_at),
            });
        }

        Ok(states)
    }

    /// Marks an active chore done for its current period. Idempotent.
    pub fn mark_complete(&self, chore_id: ChoreId) -> ServiceResult<CompletionOutcome> {
        let chore = self
            .repo
            .get_chore(chore_id)?
            .filter(|chore| chore.is_active)
            .ok_or(ServiceError::ChoreNotFound(chore_id))?;

        let now = self.clock.now();
        let period = Period::current(chore.frequency, now.date());
        let outcome = CompletionLedger::new(self.repo).record_completion(chore_id, &period, now)?;

        info!(
            "event=chore_complete module=due_state status=ok chore_id={chore_id} frequency={} period_start={} already_completed={}",
            chore.frequency, period.start, outcome.already_completed
        );
        Ok(outcome)
    }

    /// Clears the current period's completions of a chore, active or not.
    ///
    /// Returns the number of completion rows removed.
    pub fn mark_incomplete(&self, chore_id: ChoreId) -> ServiceResult<usize> {
        let chore = self
            .repo
            .get_chore(chore_id)?
            .ok_or(ServiceError::ChoreNotFound(chore_id))?;

        let period = Period::current(chore.frequency, self.clock.today());
        let removed = CompletionLedger::new(self.repo).clear_completions_in_window(chore_id, &period)?;

        info!(
            "event=chore_uncomplete module=due_state status=ok chore_id={chore_id} frequency={} period_start={} removed={removed}",
            chore.frequency, period.start
        );
        Ok(removed)
    }
}
