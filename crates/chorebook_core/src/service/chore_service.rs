//! Chore use-case service.
//!
//! # Responsibility
//! - Single entry point for chore lifecycle, due-state and completion calls.
//! - Own the repository and clock the borrowed components work against.

use crate::clock::Clock;
use crate::model::child::ChildId;
use crate::model::chore::{Chore, ChoreId, ChorePatch};
use crate::model::completion::CompletionOutcome;
use crate::repo::chore_repo::ChoreRepository;
use crate::repo::RepoResult;
use crate::service::due_state::{ChoreDueState, DueStateResolver};
use crate::service::lifecycle::ChoreLifecycle;
use crate::service::ServiceResult;

pub struct ChoreService<R, C> {
    repo: R,
    clock: C,
}

impl<R: ChoreRepository, C: Clock> ChoreService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn lifecycle(&self) -> ChoreLifecycle<'_, R, C> {
        ChoreLifecycle::new(&self.repo, &self.clock)
    }

    pub fn resolver(&self) -> DueStateResolver<'_, R, C> {
        DueStateResolver::new(&self.repo, &self.clock)
    }

    pub fn create_chore(&self, child_id: ChildId, title: &str, frequency: &str) -> ServiceResult<Chore> {
        self.lifecycle().create_chore(child_id, title, frequency)
    }

    pub fn update_chore(&self, chore_id: ChoreId, patch: &ChorePatch) -> ServiceResult<Chore> {
        self.lifecycle().update_chore(chore_id, patch)
    }

    pub fn delete_chore(&self, chore_id: ChoreId) -> ServiceResult<()> {
        self.lifecycle().delete_chore(chore_id)
    }

    pub fn expire_one_off_chores(&self) -> RepoResult<usize> {
        self.lifecycle().expire_one_off_chores()
    }

    pub fn due_state(&self, child_id: ChildId) -> ServiceResult<Vec<ChoreDueState>> {
        self.resolver().due_state(child_id)
    }

    pub fn mark_complete(&self, chore_id: ChoreId) -> ServiceResult<CompletionOutcome> {
        self.resolver().mark_complete(chore_id)
    }

    pub fn mark_incomplete(&self, chore_id: ChoreId) -> ServiceResult<usize> {
        self.resolver().mark_incomplete(chore_id)
    }
}
