//! `PostgreSQL` membership repository.

mod repository;
mod schema;

pub use repository::PostgresMembershipRepository;
