//! Chore lifecycle manager.
//!
//! # Responsibility
//! - Create, update and soft-delete chores with input validation.
//! - Retire one-off chores whose single day has passed.
//!
//! # Invariants
//! - Chores are deactivated, never deleted, so history survives.
//! - A one-off chore is visible on its creation day only.
//! - New chores go to the end of their (child, frequency) group.

use crate::clock::Clock;
use crate::model::child::ChildId;
use crate::model::chore::{normalize_title, Chore, ChoreId, ChorePatch, Frequency, NewChore};
use crate::repo::chore_repo::ChoreRepository;
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};
use log::info;
use std::collections::BTreeSet;

pub struct ChoreLifecycle<'a, R: ?Sized, C: ?Sized> {
    repo: &'a R,
    clock: &'a C,
}

impl<'a, R, C> ChoreLifecycle<'a, R, C>
where
    R: ChoreRepository + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(repo: &'a R, clock: &'a C) -> Self {
        Self { repo, clock }
    }

    /// Creates an active chore for `child_id`.
    ///
    /// # Errors
    /// - `ChildNotFound` when the child does not exist.
    /// - `InvalidChore` for a blank title or unknown frequency name.
    pub fn create_chore(
        &self,
        child_id: ChildId,
        title: &str,
        frequency: &str,
    ) -> ServiceResult<Chore> {
        if !self.repo.child_exists(child_id)? {
            return Err(ServiceError::ChildNotFound(child_id));
        }

        let title = normalize_title(title)?;
        let frequency: Frequency = frequency.parse()?;
        let display_order = self.repo.next_display_order(child_id, frequency)?;

        let chore_id = self.repo.create_chore(&NewChore {
            child_id,
            title,
            frequency,
            display_order,
            created_at: self.clock.now(),
        })?;
        info!(
            "event=chore_create module=lifecycle status=ok chore_id={chore_id} child_id={child_id} frequency={frequency} display_order={display_order}"
        );

        self.load(chore_id)
    }

    /// Applies a partial update; unset fields keep their stored values.
    ///
    /// Inactive chores can be edited too.
    pub fn update_chore(&self, chore_id: ChoreId, patch: &ChorePatch) -> ServiceResult<Chore> {
        let mut chore = self.load(chore_id)?;

        chore.title = normalize_title(patch.title.as_deref().unwrap_or(&chore.title))?;
        if let Some(frequency) = patch.frequency.as_deref() {
            chore.frequency = frequency.parse()?;
        }
        if let Some(display_order) = patch.display_order {
            chore.display_order = display_order;
        }

        self.repo.update_chore(&chore)?;
        info!(
            "event=chore_update module=lifecycle status=ok chore_id={chore_id} frequency={}",
            chore.frequency
        );

        self.load(chore_id)
    }

    /// Soft-deletes a chore. Deleting an inactive chore succeeds.
    pub fn delete_chore(&self, chore_id: ChoreId) -> ServiceResult<()> {
        self.load(chore_id)?;
        self.repo.set_chore_active(chore_id, false)?;
        info!("event=chore_delete module=lifecycle status=ok chore_id={chore_id}");
        Ok(())
    }

    /// Deactivates every active one-off chore whose day is over.
    ///
    /// Two independent rules:
    /// 1. it has a completion dated before today;
    /// 2. it was created before today and has no completion on its creation day.
    ///
    /// Returns the number of chores deactivated.
    pub fn expire_one_off_chores(&self) -> RepoResult<usize> {
        let today = self.clock.today();

        let mut expired = BTreeSet::new();
        expired.extend(self.repo.list_chore_ids_with_completion_before(today)?);
        expired.extend(
            self.repo
                .list_chore_ids_created_before_without_same_day_completion(today)?,
        );

        for chore_id in &expired {
            self.repo.set_chore_active(*chore_id, false)?;
        }

        if !expired.is_empty() {
            info!(
                "event=oneoff_expire module=lifecycle status=ok today={today} expired_count={}",
                expired.len()
            );
        }
        Ok(expired.len())
    }

    fn load(&self, chore_id: ChoreId) -> ServiceResult<Chore> {
        self.repo
            .get_chore(chore_id)?
            .ok_or(ServiceError::ChoreNotFound(chore_id))
    }
}
