//! `PostgreSQL` adapters for workflow persistence.

mod models;
mod schema;
mod store;

pub use store::{PostgresWorkflowStore, WorkflowPgPool};
