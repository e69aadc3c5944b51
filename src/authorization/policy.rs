//! Decides who may attach skills to tasks and detach them.

use crate::authorization::{
    domain::{NewTaskSkill, TaskSkill, TaskSkillAction, TaskSkillTarget},
    ports::MembershipRepository,
};
use crate::task::{
    domain::{Task, UserId},
    ports::TaskReader,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Authorization policy for task-skill associations.
///
/// Access is granted to project contributors (and higher roles) and to the
/// task's author. Anything that cannot be resolved, including lookup
/// failures, denies.
pub struct TaskSkillPolicy<R, M>
where
    R: TaskReader,
    M: MembershipRepository,
{
    tasks: Arc<R>,
    memberships: Arc<M>,
}

impl<R, M> Clone for TaskSkillPolicy<R, M>
where
    R: TaskReader,
    M: MembershipRepository,
{
    fn clone(&self) -> Self {
        Self {
            tasks: Arc::clone(&self.tasks),
            memberships: Arc::clone(&self.memberships),
        }
    }
}

impl<R, M> TaskSkillPolicy<R, M>
where
    R: TaskReader,
    M: MembershipRepository,
{
    /// Creates a policy over the given lookups.
    #[must_use]
    pub const fn new(tasks: Arc<R>, memberships: Arc<M>) -> Self {
        Self { tasks, memberships }
    }

    /// Whether `user_id` may create `pending`.
    pub async fn can_create(&self, user_id: UserId, pending: &NewTaskSkill) -> bool {
        self.authorize(user_id, TaskSkillAction::Create, TaskSkillTarget::Pending(pending))
            .await
    }

    /// Whether `user_id` may delete `existing`.
    pub async fn can_delete(&self, user_id: UserId, existing: &TaskSkill) -> bool {
        self.authorize(user_id, TaskSkillAction::Delete, TaskSkillTarget::Existing(existing))
            .await
    }

    /// Whether `user_id` may perform `action` on `target`.
    pub async fn authorize(
        &self,
        user_id: UserId,
        action: TaskSkillAction,
        target: TaskSkillTarget<'_>,
    ) -> bool {
        let Some(task) = self.load_task(target).await else {
            debug!(%user_id, %action, "task-skill denied: task unresolved");
            return false;
        };

        if self.is_contributor(user_id, &task).await {
            debug!(%user_id, %action, task_id = %task.id(), "task-skill allowed by role");
            return true;
        }

        let is_author = task.user_id() == user_id;
        debug!(
            %user_id,
            %action,
            task_id = %task.id(),
            allowed = is_author,
            "task-skill decided by authorship"
        );
        is_author
    }

    async fn load_task(&self, target: TaskSkillTarget<'_>) -> Option<Task> {
        let task_id = target.task_id()?;
        match self.tasks.find_by_id(task_id).await {
            Ok(task) => task,
            Err(err) => {
                warn!(%task_id, error = %err, "task lookup failed during authorization");
                None
            }
        }
    }

    async fn is_contributor(&self, user_id: UserId, task: &Task) -> bool {
        match self
            .memberships
            .find_membership(task.project_id(), user_id)
            .await
        {
            Ok(membership) => membership.is_some_and(|m| m.role().is_contributor_or_higher()),
            Err(err) => {
                warn!(
                    %user_id,
                    project_id = %task.project_id(),
                    error = %err,
                    "membership lookup failed during authorization"
                );
                false
            }
        }
    }
}
