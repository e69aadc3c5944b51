//! `TaskBridge`: project tasks mirrored to GitHub issues.
//!
//! This crate provides two independent pieces of a project-management
//! backend:
//!
//! - [`task`]: creating and updating tasks, mirroring each change to the
//!   task's GitHub issue inside the same database transaction
//! - [`authorization`]: deciding who may attach skills to tasks or detach them
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, APIs, etc.)
//!
//! [`config`] and [`telemetry`] carry the process-level settings shared by
//! binaries.

pub mod authorization;
pub mod config;
pub mod task;
pub mod telemetry;
