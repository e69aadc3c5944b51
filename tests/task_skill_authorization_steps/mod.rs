//! Step definitions for task-skill authorization scenarios.

mod given;
mod then;
mod when;
pub mod world;
