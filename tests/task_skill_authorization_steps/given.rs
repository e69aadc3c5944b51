//! Given steps for task-skill authorization scenarios.

use super::world::{AuthorizationWorld, run_async};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;
use taskbridge::{
    authorization::domain::{ProjectMembership, ProjectRole},
    task::domain::{Task, TaskAttributes},
};

#[given(r#"a project task authored by "{author}""#)]
fn project_task_authored_by(
    world: &mut AuthorizationWorld,
    author: String,
) -> Result<(), eyre::Report> {
    let author_id = world.user(&author);
    let draft = TaskAttributes::new()
        .with_title("Write the parser")
        .with_project(world.project_id)
        .with_user(author_id)
        .validate()
        .wrap_err("validate scenario task")?;
    let task = Task::new(draft, &DefaultClock);

    run_async(world.tasks.insert_task(task.clone()));
    world.task = Some(task);
    Ok(())
}

#[given(r#""{name}" has the "{role}" role in the project"#)]
fn member_with_role(
    world: &mut AuthorizationWorld,
    name: String,
    role: String,
) -> Result<(), eyre::Report> {
    let parsed = ProjectRole::try_from(role.as_str()).wrap_err("parse scenario role")?;
    let user_id = world.user(&name);
    world
        .memberships
        .insert(ProjectMembership::new(world.project_id, user_id, parsed))
        .wrap_err("store scenario membership")?;
    Ok(())
}
