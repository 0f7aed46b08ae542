//! Domain model for the task lifecycle workflow engine.
//!
//! The domain keeps four concerns next to each other and free of
//! infrastructure: the task aggregate and its status machine, the action
//! kinds with their precondition table, the authorization guard, and the
//! temporal containment validator. Everything here is pure; persistence and
//! file storage live behind the ports.

mod action;
mod actor;
pub mod authorize;
mod error;
mod event;
mod ids;
mod log;
mod status;
mod task;
mod window;

pub use action::{ActionContext, ActionKind};
pub use actor::{ActorContext, Permission, UserRecord};
pub use error::{
    AuthorizationError, FileError, LookupError, ParseActionKindError, ParseStatusError,
    PersistenceError, StateError, ValidationError, WorkflowError,
};
pub use event::{EventRecord, EventWindow};
pub use ids::{EventId, EvidenceId, TaskId, TaskLogId, TenantId, UserId};
pub use log::{
    CostRecord, EvidenceRef, EvidenceUpload, NewTaskLogEntry, StoredEvidence, TaskLogEntry,
};
pub use status::TaskStatus;
pub use task::{NewTaskData, PersistedTaskData, Task, TaskName, TaskPatch};
pub use window::validate_and_mark_overrun;
