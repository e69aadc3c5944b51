//! In-memory adapter implementations for testing.

mod store;

pub use store::{InMemoryTaskStore, InMemoryTaskTransaction};
