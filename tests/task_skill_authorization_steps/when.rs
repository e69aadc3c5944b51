//! When steps for task-skill authorization scenarios.

use super::world::{AuthorizationWorld, run_async};
use rstest_bdd_macros::when;
use taskbridge::{
    authorization::domain::{NewTaskSkill, SkillId, TaskSkill, TaskSkillId},
    task::domain::TaskId,
};

fn scenario_task_id(world: &AuthorizationWorld) -> Result<TaskId, eyre::Report> {
    world
        .task
        .as_ref()
        .map(|task| task.id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

#[when(r#""{name}" asks to attach a skill to the task"#)]
fn attach_skill(world: &mut AuthorizationWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = world.user(&name);
    let proposal = NewTaskSkill::new(scenario_task_id(world)?, SkillId::new());
    world.decision = Some(run_async(world.policy().can_create(user_id, &proposal)));
    Ok(())
}

#[when(r#""{name}" asks to remove a skill from the task"#)]
fn remove_skill(world: &mut AuthorizationWorld, name: String) -> Result<(), eyre::Report> {
    let user_id = world.user(&name);
    let existing = TaskSkill::new(TaskSkillId::new(), scenario_task_id(world)?, SkillId::new());
    world.decision = Some(run_async(world.policy().can_delete(user_id, &existing)));
    Ok(())
}

#[when(r#""{name}" asks to attach a skill without naming a task"#)]
fn attach_skill_without_task(world: &mut AuthorizationWorld, name: String) {
    let user_id = world.user(&name);
    let proposal = NewTaskSkill {
        task_id: None,
        skill_id: Some(SkillId::new()),
    };
    world.decision = Some(run_async(world.policy().can_create(user_id, &proposal)));
}
