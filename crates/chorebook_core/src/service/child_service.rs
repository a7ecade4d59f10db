//! Child use-case service.

use crate::clock::Clock;
use crate::model::child::{normalize_name, Child, ChildId, ChildPatch};
use crate::repo::child_repo::ChildRepository;
use crate::service::{ServiceError, ServiceResult};
use log::info;

pub struct ChildService<R, C> {
    repo: R,
    clock: C,
}

impl<R: ChildRepository, C: Clock> ChildService<R, C> {
    pub fn new(repo: R, clock: C) -> Self {
        Self { repo, clock }
    }

    pub fn list_children(&self) -> ServiceResult<Vec<Child>> {
        Ok(self.repo.list_children()?)
    }

    /// Creates a child at the end of the display order.
    pub fn create_child(&self, name: &str) -> ServiceResult<Child> {
        let name = normalize_name(name)?;
        let display_order = self.repo.next_display_order()?;
        let child_id = self
            .repo
            .create_child(&name, display_order, self.clock.now())?;
        info!("event=child_create module=children status=ok child_id={child_id}");
        self.get_child(child_id)
    }

    pub fn get_child(&self, child_id: ChildId) -> ServiceResult<Child> {
        self.repo
            .get_child(child_id)?
            .ok_or(ServiceError::ChildNotFound(child_id))
    }

    pub fn update_child(&self, child_id: ChildId, patch: &ChildPatch) -> ServiceResult<Child> {
        let mut child = self.get_child(child_id)?;
        child.name = normalize_name(patch.name.as_deref().unwrap_or(&child.name))?;
        if let Some(display_order) = patch.display_order {
            child.display_order = display_order;
        }
        self.repo.update_child(&child)?;
        self.get_child(child_id)
    }

    /// Hard-deletes a child together with its chores and completions.
    pub fn delete_child(&self, child_id: ChildId) -> ServiceResult<()> {
        self.repo.delete_child(child_id)?;
        info!("event=child_delete module=children status=ok child_id={child_id}");
        Ok(())
    }
}
