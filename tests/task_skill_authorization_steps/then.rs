//! Then steps for task-skill authorization scenarios.

use super::world::AuthorizationWorld;
use rstest_bdd_macros::then;

fn decision(world: &AuthorizationWorld) -> Result<bool, eyre::Report> {
    world
        .decision
        .ok_or_else(|| eyre::eyre!("missing authorization decision in scenario world"))
}

#[then("the request is allowed")]
fn request_allowed(world: &AuthorizationWorld) -> Result<(), eyre::Report> {
    if !decision(world)? {
        return Err(eyre::eyre!("expected the request to be allowed"));
    }
    Ok(())
}

#[then("the request is denied")]
fn request_denied(world: &AuthorizationWorld) -> Result<(), eyre::Report> {
    if decision(world)? {
        return Err(eyre::eyre!("expected the request to be denied"));
    }
    Ok(())
}
