//! Task lifecycle workflow engine.
//!
//! Every mutation a task can undergo — create, update, delete, assign,
//! accept, reject, submit, approve, block — runs through an action
//! strategy that checks the status precondition, authorizes the actor,
//! validates temporal containment in the owning event's window, applies
//! the mutation, and appends an audit log entry with any evidence files,
//! all inside one store transaction. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Strategies, registry, and orchestration in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
