//! Task-skill associations and the targets an authorization check applies to.

use super::{SkillId, TaskSkillId};
use crate::task::domain::TaskId;
use std::fmt;

/// A persisted association between a task and a skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSkill {
    id: TaskSkillId,
    task_id: TaskId,
    skill_id: SkillId,
}

impl TaskSkill {
    /// Creates an association record.
    #[must_use]
    pub const fn new(id: TaskSkillId, task_id: TaskId, skill_id: SkillId) -> Self {
        Self {
            id,
            task_id,
            skill_id,
        }
    }

    /// Returns the association identifier.
    #[must_use]
    pub const fn id(&self) -> TaskSkillId {
        self.id
    }

    /// Returns the task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the skill.
    #[must_use]
    pub const fn skill_id(&self) -> SkillId {
        self.skill_id
    }
}

/// A proposed association that has not been validated or stored.
///
/// Both references are optional because the request may be incomplete.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTaskSkill {
    /// Task to attach the skill to.
    pub task_id: Option<TaskId>,
    /// Skill to attach.
    pub skill_id: Option<SkillId>,
}

impl NewTaskSkill {
    /// Creates a complete proposal.
    #[must_use]
    pub const fn new(task_id: TaskId, skill_id: SkillId) -> Self {
        Self {
            task_id: Some(task_id),
            skill_id: Some(skill_id),
        }
    }
}

/// The association an authorization decision concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSkillTarget<'a> {
    /// A proposed association.
    Pending(&'a NewTaskSkill),
    /// A stored association.
    Existing(&'a TaskSkill),
}

impl TaskSkillTarget<'_> {
    /// Returns the task the association refers to, if known.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        match self {
            Self::Pending(pending) => pending.task_id,
            Self::Existing(existing) => Some(existing.task_id),
        }
    }
}

/// Operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSkillAction {
    /// Attach a skill to a task.
    Create,
    /// Detach a skill from a task.
    Delete,
}

impl TaskSkillAction {
    /// Returns a stable name for logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for TaskSkillAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
