//! Task aggregate root.

use super::{
    ActionKind, CostRecord, EventId, StateError, TaskId, TaskStatus, TenantId, UserId,
    ValidationError,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated, non-empty task name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskName(String);

impl TaskName {
    /// Creates a validated task name.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTaskName`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyTaskName);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parameter object for creating a new task aggregate.
#[derive(Debug, Clone)]
pub struct NewTaskData {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Owning event; immutable after creation.
    pub event_id: EventId,
    /// Task name.
    pub name: TaskName,
    /// Optional description.
    pub description: Option<String>,
    /// Optional initial assignee.
    pub assignee_id: Option<UserId>,
    /// Task window start.
    pub starts_at: DateTime<Utc>,
    /// Task window end.
    pub ends_at: DateTime<Utc>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Initial status; defaults to [`TaskStatus::Pending`].
    pub status: Option<TaskStatus>,
    /// Creator identity.
    pub created_by: UserId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted tenant.
    pub tenant_id: TenantId,
    /// Persisted owning event.
    pub event_id: EventId,
    /// Persisted assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted name.
    pub name: TaskName,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted window start.
    pub starts_at: DateTime<Utc>,
    /// Persisted window end.
    pub ends_at: DateTime<Utc>,
    /// Persisted remark.
    pub remark: Option<String>,
    /// Persisted cost fields.
    pub cost: Option<CostRecord>,
    /// Persisted creator identity.
    pub created_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted last-update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// One unit of work inside an event.
///
/// All mutation goes through the action strategies; the aggregate's
/// mutators re-check the status-precondition table so an illegal
/// transition can never be applied, whichever path reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    tenant_id: TenantId,
    event_id: EventId,
    assignee_id: Option<UserId>,
    name: TaskName,
    description: Option<String>,
    status: TaskStatus,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    remark: Option<String>,
    cost: Option<CostRecord>,
    created_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task aggregate.
    #[must_use]
    pub fn create(data: NewTaskData, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            tenant_id: data.tenant_id,
            event_id: data.event_id,
            assignee_id: data.assignee_id,
            name: data.name,
            description: data.description,
            status: data.status.unwrap_or(TaskStatus::Pending),
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            remark: data.remark,
            cost: None,
            created_by: data.created_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            tenant_id: data.tenant_id,
            event_id: data.event_id,
            assignee_id: data.assignee_id,
            name: data.name,
            description: data.description,
            status: data.status,
            starts_at: data.starts_at,
            ends_at: data.ends_at,
            remark: data.remark,
            cost: data.cost,
            created_by: data.created_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning tenant.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the owning event.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the task name.
    #[must_use]
    pub const fn name(&self) -> &TaskName {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the current status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task window start.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the task window end.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Returns the remark, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Returns the recorded cost fields, if any.
    #[must_use]
    pub const fn cost(&self) -> Option<CostRecord> {
        self.cost
    }

    /// Returns the creator identity.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the last-update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Sets or replaces the assignee and resets the status to
    /// [`TaskStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] when the task is in a
    /// terminal status.
    pub fn assign_to(&mut self, assignee_id: UserId) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Assign)?;
        self.assignee_id = Some(assignee_id);
        self.status = TaskStatus::Pending;
        Ok(())
    }

    /// Moves an accepted task into [`TaskStatus::Progress`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] unless the task is
    /// [`TaskStatus::Pending`].
    pub fn accept(&mut self) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Accept)?;
        self.status = TaskStatus::Progress;
        Ok(())
    }

    /// Moves a pending task into [`TaskStatus::Rejected`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] unless the task is
    /// [`TaskStatus::Pending`].
    pub fn reject(&mut self) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Reject)?;
        self.status = TaskStatus::Rejected;
        Ok(())
    }

    /// Moves in-progress work into [`TaskStatus::PendingApproval`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] unless the task is
    /// [`TaskStatus::Progress`].
    pub fn submit_for_approval(&mut self) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Submit)?;
        self.status = TaskStatus::PendingApproval;
        Ok(())
    }

    /// Moves submitted work into [`TaskStatus::Completed`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] unless the task is
    /// [`TaskStatus::PendingApproval`].
    pub fn approve(&mut self) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Approve)?;
        self.status = TaskStatus::Completed;
        Ok(())
    }

    /// Moves in-progress work into [`TaskStatus::Blocked`].
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] unless the task is
    /// [`TaskStatus::Progress`].
    pub fn block(&mut self) -> Result<(), StateError> {
        self.ensure_permits(ActionKind::Block)?;
        self.status = TaskStatus::Blocked;
        Ok(())
    }

    /// Marks the task as overrunning its event window.
    ///
    /// Applied by the temporal validator as a side effect of a failed
    /// containment check; not reachable through a dedicated action.
    pub const fn mark_delayed(&mut self) {
        self.status = TaskStatus::Delayed;
    }

    /// Applies a field patch, returning whether the task window changed.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::WrongStatusForAction`] when the task is
    /// [`TaskStatus::Completed`].
    pub fn apply_update(&mut self, patch: TaskPatch) -> Result<bool, StateError> {
        self.ensure_permits(ActionKind::Update)?;
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(assignee_id) = patch.assignee_id {
            self.assignee_id = Some(assignee_id);
        }
        let mut times_changed = false;
        if let Some(starts_at) = patch.starts_at {
            times_changed |= starts_at != self.starts_at;
            self.starts_at = starts_at;
        }
        if let Some(ends_at) = patch.ends_at {
            times_changed |= ends_at != self.ends_at;
            self.ends_at = ends_at;
        }
        Ok(times_changed)
    }

    /// Records cost fields supplied with an action.
    pub const fn record_cost(&mut self, cost: CostRecord) {
        self.cost = Some(cost);
    }

    /// Refreshes the last-update timestamp.
    ///
    /// Maintained by store adapters when a mutation is written; strategies
    /// never touch it directly.
    pub(crate) const fn set_updated_at(&mut self, at: DateTime<Utc>) {
        self.updated_at = at;
    }

    fn ensure_permits(&self, action: ActionKind) -> Result<(), StateError> {
        if action.permits(self.status) {
            Ok(())
        } else {
            Err(StateError::WrongStatusForAction {
                action,
                task_id: self.id,
                status: self.status,
            })
        }
    }
}

/// Optional field patch applied by the update action.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    /// Replacement name.
    pub name: Option<TaskName>,
    /// Replacement description.
    pub description: Option<String>,
    /// Replacement window start.
    pub starts_at: Option<DateTime<Utc>>,
    /// Replacement window end.
    pub ends_at: Option<DateTime<Utc>>,
    /// Replacement assignee.
    pub assignee_id: Option<UserId>,
}
