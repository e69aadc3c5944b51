//! Project role lookups through the `PostgreSQL` membership repository.

use super::helpers::{BoxError, PgContext, pg_context};
use rstest::rstest;
use taskbridge::authorization::{domain::ProjectRole, ports::MembershipRepository};
use taskbridge::task::domain::{ProjectId, User, UserId};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_roles_are_returned_per_project(
    #[future] pg_context: Result<PgContext, BoxError>,
) -> Result<(), BoxError> {
    let ctx = pg_context.await?;
    let member = User::new(UserId::new(), "hubot");
    ctx.grant(&member, "admin").await?;

    let found = ctx
        .memberships
        .find_membership(ctx.project_id, member.id())
        .await?
        .ok_or("membership should be found")?;
    assert_eq!(found.role(), ProjectRole::Admin);

    let elsewhere = ctx
        .memberships
        .find_membership(ProjectId::new(), member.id())
        .await?;
    assert!(elsewhere.is_none());
    Ok(())
}
