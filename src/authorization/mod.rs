//! Authorization of task-skill associations.
//!
//! A user may attach a skill to a task, or detach one, when they are at
//! least a contributor on the task's project or when they authored the task.
//! The context follows the same hexagonal layout as [`crate::task`]:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The decision itself in [`policy`]

pub mod adapters;
pub mod domain;
pub mod policy;
pub mod ports;
