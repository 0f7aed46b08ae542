//! Error taxonomy for the workflow engine.
//!
//! Every failure is a typed value surfaced directly to the caller; nothing
//! is swallowed or retried inside the engine. Strategies check in a fixed
//! order — status precondition, authorization, temporal validation,
//! persistence, audit/attachment — so the first failing concern names the
//! error the caller sees.

use super::{ActionKind, EventId, Permission, TaskId, TaskLogId, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by temporal and input validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The task start time is not strictly before its end time.
    #[error("task start {starts_at} must be before task end {ends_at}")]
    InvalidTimeRange {
        /// Offending start time.
        starts_at: DateTime<Utc>,
        /// Offending end time.
        ends_at: DateTime<Utc>,
    },

    /// The task window lies outside the owning event window.
    #[error("task window is outside the event window of {event_id}")]
    OutsideEventWindow {
        /// The containing event.
        event_id: EventId,
    },

    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// An assignment action was invoked without an assignee.
    #[error("assignment requires an assignee")]
    MissingAssignee,
}

/// Errors raised by the authorization guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The actor is not the task's current assignee.
    #[error("user {actor} is not the assignee of task {task_id}")]
    NotOwner {
        /// The acting identity.
        actor: UserId,
        /// The task being acted on.
        task_id: TaskId,
    },

    /// The actor does not hold the permission the action requires.
    #[error("user {actor} lacks permission '{permission}'")]
    MissingPermission {
        /// The acting identity.
        actor: UserId,
        /// The missing capability.
        permission: Permission,
    },
}

/// Errors raised by status precondition checks.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// The task's current status does not permit the action.
    #[error("action {action} is not allowed while task {task_id} is {status}")]
    WrongStatusForAction {
        /// The attempted action.
        action: ActionKind,
        /// The task being acted on.
        task_id: TaskId,
        /// The task's current status.
        status: TaskStatus,
    },
}

/// Errors raised by the persistence layer.
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    /// A task update affected zero rows.
    #[error("update of task {0} affected no rows")]
    UpdateFailed(TaskId),

    /// A task deletion affected zero rows.
    #[error("deletion of task {0} affected no rows")]
    DeleteFailed(TaskId),

    /// A task assignment affected zero rows.
    #[error("assignment of task {0} affected no rows")]
    AssignmentFailed(TaskId),

    /// Backend storage failure.
    #[error("storage error: {0}")]
    Backend(Arc<dyn std::error::Error + Send + Sync>),
}

impl PersistenceError {
    /// Wraps a backend storage error.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Arc::new(err))
    }
}

/// Errors raised while storing or associating evidence files.
#[derive(Debug, Clone, Error)]
pub enum FileError {
    /// Evidence was attached to a log entry that does not exist.
    #[error("no audit log entry {log_id} to attach evidence to")]
    UploadContextMissing {
        /// The missing log entry.
        log_id: TaskLogId,
    },

    /// The evidence vault rejected the file bytes.
    #[error("evidence storage error: {0}")]
    Storage(Arc<dyn std::error::Error + Send + Sync>),
}

impl FileError {
    /// Wraps an evidence storage error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Arc::new(err))
    }
}

/// Errors raised while resolving the entities an action references.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The addressed event does not exist.
    #[error("event not found: {0}")]
    EventNotFound(EventId),

    /// The addressed task does not exist under the addressed event.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced assignee does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The referenced assignee belongs to a different tenant than the event.
    #[error("user {user_id} does not belong to the tenant of event {event_id}")]
    TenantMismatch {
        /// The addressed event.
        event_id: EventId,
        /// The offending user.
        user_id: UserId,
    },
}

/// Top-level error for workflow actions.
#[derive(Debug, Clone, Error)]
pub enum WorkflowError {
    /// Temporal or input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The actor is not allowed to perform the action.
    #[error(transparent)]
    Authorization(#[from] AuthorizationError),

    /// The task's status does not permit the action.
    #[error(transparent)]
    State(#[from] StateError),

    /// Persistence failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Evidence handling failed.
    #[error(transparent)]
    File(#[from] FileError),

    /// A referenced entity could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// No strategy is registered for the action kind. This is an engine
    /// configuration defect, not a user-facing failure.
    #[error("no strategy registered for action {0}")]
    UnregisteredAction(ActionKind),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseStatusError(pub String);

/// Error returned while parsing action kinds from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown action kind: {0}")]
pub struct ParseActionKindError(pub String);
