//! Domain types for task-skill authorization.

mod ids;
mod membership;
mod task_skill;

pub use ids::{SkillId, TaskSkillId};
pub use membership::{ParseProjectRoleError, ProjectMembership, ProjectRole};
pub use task_skill::{NewTaskSkill, TaskSkill, TaskSkillAction, TaskSkillTarget};
