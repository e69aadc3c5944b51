//! `PostgreSQL` adapters for task synchronization persistence.

mod conversion;
mod models;
mod schema;
mod store;

pub use store::{PostgresTaskStore, PostgresTaskTransaction, TaskPgPool};
