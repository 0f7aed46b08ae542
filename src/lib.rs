//! Runsheet: multi-tenant event/task-management backend core.
//!
//! This crate implements the task lifecycle workflow engine: a
//! strategy-dispatched state machine governing every mutation a task can
//! undergo, combining per-action authorization, temporal-containment
//! validation against the owning event window, and an append-only audit
//! trail with attached evidence files, all inside a single atomic unit of
//! work.
//!
//! # Architecture
//!
//! Runsheet follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, files)
//!
//! # Modules
//!
//! - [`workflow`]: The task lifecycle workflow engine

pub mod workflow;
