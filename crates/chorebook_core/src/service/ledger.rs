//! Completion ledger.
//!
//! # Responsibility
//! - Answer "is there a completion for this chore in this period?".
//! - Record and clear completions for the current period.
//!
//! # Invariants
//! - Only the ledger writes or deletes completion rows.
//! - At most one completion is recorded per chore per period; a second
//!   request returns the first completion untouched.
//! - Single-day frequencies only ever read or clear the exact start date.

use crate::model::chore::ChoreId;
use crate::model::completion::{Completion, CompletionOutcome};
use crate::model::period::Period;
use crate::repo::chore_repo::ChoreRepository;
use crate::repo::{RepoError, RepoResult};
use chrono::NaiveDateTime;
use log::{debug, warn};

pub struct CompletionLedger<'a, R: ?Sized> {
    repo: &'a R,
}

impl<'a, R: ChoreRepository + ?Sized> CompletionLedger<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Most recent completion counting for `period`.
    pub fn find_completion_in_window(
        &self,
        chore_id: ChoreId,
        period: &Period,
    ) -> RepoResult<Option<Completion>> {
        if period.frequency.is_single_day() {
            self.repo.find_completion(chore_id, period.start)
        } else {
            self.repo.find_completion_in_range(chore_id, period.start)
        }
    }

    /// Records a completion dated `period.end` unless one already covers the period.
    ///
    /// A unique-index violation on insert means another writer got there
    /// first; it is reported as the already-completed case.
    pub fn record_completion(
        &self,
        chore_id: ChoreId,
        period: &Period,
        now: NaiveDateTime,
    ) -> RepoResult<CompletionOutcome> {
        if let Some(existing) = self.find_completion_in_window(chore_id, period)? {
            debug!(
                "event=completion_record module=ledger status=ok chore_id={chore_id} already_completed=true"
            );
            return Ok(CompletionOutcome {
                completion: existing,
                already_completed: true,
            });
        }

        match self.repo.insert_completion(chore_id, period.end, now) {
            Ok(completion) => Ok(CompletionOutcome {
                completion,
                already_completed: false,
            }),
            Err(RepoError::DuplicateCompletion { chore_id, date }) => {
                warn!(
                    "event=completion_record module=ledger status=conflict chore_id={chore_id} date={date}"
                );
                match self.find_completion_in_window(chore_id, period)? {
                    Some(existing) => Ok(CompletionOutcome {
                        completion: existing,
                        already_completed: true,
                    }),
                    None => Err(RepoError::DuplicateCompletion { chore_id, date }),
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Deletes every completion counting for `period`; returns the number removed.
    pub fn clear_completions_in_window(&self, chore_id: ChoreId, period: &Period) -> RepoResult<usize> {
        if period.frequency.is_single_day() {
            self.repo.delete_completion(chore_id, period.start)
        } else {
            self.repo.delete_completions_in_range(chore_id, period.start)
        }
    }
}
