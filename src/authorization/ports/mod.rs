//! Port contracts for membership lookup.

mod membership;

pub use membership::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult};
