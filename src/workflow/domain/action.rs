//! Action kinds and the per-call action context.

use super::{
    CostRecord, EventWindow, EvidenceUpload, ParseActionKindError, Permission, TaskStatus, UserId,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of operations a task can undergo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Create a new task inside an event.
    Create,
    /// Patch task fields.
    Update,
    /// Remove the task.
    Delete,
    /// Set or replace the assignee.
    Assign,
    /// Assignee accepts the task.
    Accept,
    /// Assignee rejects the task.
    Reject,
    /// Assignee submits finished work for approval.
    Submit,
    /// Event owner approves submitted work.
    Approve,
    /// Mark in-progress work as blocked.
    Block,
}

impl ActionKind {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Assign => "assign",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::Submit => "submit",
            Self::Approve => "approve",
            Self::Block => "block",
        }
    }

    /// Returns whether a task in `status` may undergo this action.
    ///
    /// This is the single source of the status-precondition table; every
    /// strategy consults it before touching the task.
    #[must_use]
    pub const fn permits(self, status: TaskStatus) -> bool {
        match self {
            Self::Create | Self::Delete => true,
            Self::Assign => !status.is_terminal(),
            Self::Update => !matches!(status, TaskStatus::Completed),
            Self::Accept | Self::Reject => matches!(status, TaskStatus::Pending),
            Self::Submit | Self::Block => matches!(status, TaskStatus::Progress),
            Self::Approve => matches!(status, TaskStatus::PendingApproval),
        }
    }

    /// Returns the permission the action requires, when it is
    /// permission-guarded rather than ownership-guarded.
    #[must_use]
    pub fn required_permission(self) -> Option<Permission> {
        match self {
            Self::Create => Some(Permission::create_task()),
            Self::Update => Some(Permission::update_task()),
            Self::Assign => Some(Permission::assign_task()),
            Self::Approve => Some(Permission::approve_task()),
            Self::Block => Some(Permission::block_task()),
            Self::Delete | Self::Accept | Self::Reject | Self::Submit => None,
        }
    }

    /// Returns whether the action is guarded by task ownership.
    #[must_use]
    pub const fn requires_ownership(self) -> bool {
        matches!(self, Self::Accept | Self::Reject | Self::Submit)
    }
}

impl TryFrom<&str> for ActionKind {
    type Error = ParseActionKindError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            "assign" => Ok(Self::Assign),
            "accept" => Ok(Self::Accept),
            "reject" => Ok(Self::Reject),
            "submit" => Ok(Self::Submit),
            "approve" => Ok(Self::Approve),
            "block" => Ok(Self::Block),
            _ => Err(ParseActionKindError(value.to_owned())),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-call inputs for one action, discarded once the action completes.
///
/// Carries the optional field patch, the free-text remark, cost fields,
/// evidence uploads, and the resolved window of the owning event.
#[derive(Debug, Clone)]
pub struct ActionContext {
    window: EventWindow,
    name: Option<String>,
    description: Option<String>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
    remark: Option<String>,
    cost: Option<CostRecord>,
    evidence: Vec<EvidenceUpload>,
}

impl ActionContext {
    /// Creates an empty context for the given event window.
    #[must_use]
    pub const fn new(window: EventWindow) -> Self {
        Self {
            window,
            name: None,
            description: None,
            starts_at: None,
            ends_at: None,
            assignee_id: None,
            remark: None,
            cost: None,
            evidence: Vec::new(),
        }
    }

    /// Sets the requested task name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the requested description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the requested task window.
    #[must_use]
    pub const fn with_times(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    /// Sets the requested assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the free-text remark recorded with the action.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Sets the cost fields recorded with the action.
    #[must_use]
    pub const fn with_cost(mut self, cost: CostRecord) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Adds evidence files to upload with the action.
    #[must_use]
    pub fn with_evidence(mut self, files: impl IntoIterator<Item = EvidenceUpload>) -> Self {
        self.evidence.extend(files);
        self
    }

    /// Returns the resolved event window.
    #[must_use]
    pub const fn window(&self) -> &EventWindow {
        &self.window
    }

    /// Returns the requested name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the requested description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the requested start time, if any.
    #[must_use]
    pub const fn starts_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at
    }

    /// Returns the requested end time, if any.
    #[must_use]
    pub const fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.ends_at
    }

    /// Returns the requested assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the remark, if any.
    #[must_use]
    pub fn remark(&self) -> Option<&str> {
        self.remark.as_deref()
    }

    /// Returns the cost fields, if any.
    #[must_use]
    pub const fn cost(&self) -> Option<CostRecord> {
        self.cost
    }

    /// Returns the evidence uploads.
    #[must_use]
    pub fn evidence(&self) -> &[EvidenceUpload] {
        &self.evidence
    }
}
