//! In-memory integration tests for task-skill authorization.

use std::sync::Arc;

use super::helpers::Harness;
use taskbridge::authorization::{
    adapters::memory::InMemoryMembershipRepository,
    domain::{NewTaskSkill, ProjectMembership, ProjectRole, SkillId, TaskSkill, TaskSkillId},
    policy::TaskSkillPolicy,
};
use taskbridge::task::domain::{ProjectId, UserId};

#[tokio::test(flavor = "multi_thread")]
async fn policy_reads_tasks_written_by_the_sync_service() -> Result<(), eyre::Report> {
    let harness = Harness::new().await;
    let task = harness
        .service
        .create(harness.attributes("Pair on parser"))
        .await?;
    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let admin = UserId::new();
    memberships.insert(ProjectMembership::new(
        harness.project_id,
        admin,
        ProjectRole::Admin,
    ))?;
    let policy = TaskSkillPolicy::new(Arc::clone(&harness.store), memberships);

    let proposal = NewTaskSkill::new(task.id(), SkillId::new());
    let existing = TaskSkill::new(TaskSkillId::new(), task.id(), SkillId::new());

    assert!(policy.can_create(harness.author.id(), &proposal).await);
    assert!(policy.can_delete(admin, &existing).await);
    assert!(!policy.can_delete(UserId::new(), &existing).await);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn membership_in_another_project_grants_nothing() -> Result<(), eyre::Report> {
    let harness = Harness::new().await;
    let task = harness.service.create(harness.attributes("Scoped")).await?;
    let memberships = Arc::new(InMemoryMembershipRepository::new());
    let outsider = UserId::new();
    memberships.insert(ProjectMembership::new(
        ProjectId::new(),
        outsider,
        ProjectRole::Owner,
    ))?;
    let policy = TaskSkillPolicy::new(Arc::clone(&harness.store), memberships);

    let proposal = NewTaskSkill::new(task.id(), SkillId::new());
    assert!(!policy.can_create(outsider, &proposal).await);
    Ok(())
}
