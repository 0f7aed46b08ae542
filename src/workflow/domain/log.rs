//! Append-only audit log entries and evidence file types.
//!
//! One log entry is written per successfully committed action, including
//! destructive ones, so the history of a task survives the task itself.
//! Evidence files attach to the log entry produced by an action, never to
//! the task directly, so the trail shows which action produced which file.

use super::{ActionKind, EvidenceId, TaskId, TaskLogId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Optional cost figures recorded with an action.
///
/// Money is held in integer cents and labour in whole minutes; the engine
/// performs no arithmetic on either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostRecord {
    money_cents: Option<i64>,
    labour_minutes: Option<i64>,
}

impl CostRecord {
    /// Creates an empty cost record.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            money_cents: None,
            labour_minutes: None,
        }
    }

    /// Sets the monetary cost in cents.
    #[must_use]
    pub const fn with_money_cents(mut self, cents: i64) -> Self {
        self.money_cents = Some(cents);
        self
    }

    /// Sets the labour cost in minutes.
    #[must_use]
    pub const fn with_labour_minutes(mut self, minutes: i64) -> Self {
        self.labour_minutes = Some(minutes);
        self
    }

    /// Returns the monetary cost in cents, if recorded.
    #[must_use]
    pub const fn money_cents(&self) -> Option<i64> {
        self.money_cents
    }

    /// Returns the labour cost in minutes, if recorded.
    #[must_use]
    pub const fn labour_minutes(&self) -> Option<i64> {
        self.labour_minutes
    }
}

impl Default for CostRecord {
    fn default() -> Self {
        Self::new()
    }
}

/// An evidence file handed to the engine for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUpload {
    file_name: String,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

impl EvidenceUpload {
    /// Creates an upload from a file name and its raw bytes.
    #[must_use]
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Sets the declared content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Returns the file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the declared content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the raw file bytes.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Outcome of writing evidence bytes into a vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEvidence {
    /// Locator of the stored bytes inside the vault.
    pub locator: String,
    /// SHA-256 checksum of the stored bytes, lowercase hex.
    pub sha256: String,
    /// Stored size in bytes.
    pub size_bytes: u64,
}

/// Reference to an evidence file attached to an audit log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceRef {
    id: EvidenceId,
    log_id: TaskLogId,
    file_name: String,
    content_type: Option<String>,
    size_bytes: u64,
    sha256: String,
    locator: String,
}

impl EvidenceRef {
    /// Creates an evidence reference for a stored file.
    #[must_use]
    pub fn new(
        id: EvidenceId,
        log_id: TaskLogId,
        upload: &EvidenceUpload,
        stored: StoredEvidence,
    ) -> Self {
        Self {
            id,
            log_id,
            file_name: upload.file_name().to_owned(),
            content_type: upload.content_type().map(ToOwned::to_owned),
            size_bytes: stored.size_bytes,
            sha256: stored.sha256,
            locator: stored.locator,
        }
    }

    /// Reconstructs an evidence reference from persisted storage.
    #[must_use]
    pub fn from_persisted(
        id: EvidenceId,
        log_id: TaskLogId,
        file_name: impl Into<String>,
        content_type: Option<String>,
        stored: StoredEvidence,
    ) -> Self {
        Self {
            id,
            log_id,
            file_name: file_name.into(),
            content_type,
            size_bytes: stored.size_bytes,
            sha256: stored.sha256,
            locator: stored.locator,
        }
    }

    /// Returns the evidence identifier.
    #[must_use]
    pub const fn id(&self) -> EvidenceId {
        self.id
    }

    /// Returns the log entry the file is attached to.
    #[must_use]
    pub const fn log_id(&self) -> TaskLogId {
        self.log_id
    }

    /// Returns the original file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the declared content type, if any.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the stored size in bytes.
    #[must_use]
    pub const fn size_bytes(&self) -> u64 {
        self.size_bytes
    }

    /// Returns the SHA-256 checksum of the stored bytes.
    #[must_use]
    pub fn sha256(&self) -> &str {
        &self.sha256
    }

    /// Returns the vault locator of the stored bytes.
    #[must_use]
    pub fn locator(&self) -> &str {
        &self.locator
    }
}

/// Fields of an audit log entry prior to persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskLogEntry {
    /// The task the entry belongs to.
    pub task_id: TaskId,
    /// The assignee at the time of the action, if any.
    pub target_user_id: Option<UserId>,
    /// The action performed.
    pub action: ActionKind,
    /// Free-text remark supplied with the action.
    pub remark: Option<String>,
    /// Cost fields supplied with the action.
    pub cost: Option<CostRecord>,
    /// The actor who performed the action.
    pub recorded_by: UserId,
}

/// Immutable audit record of one committed action.
///
/// Entries form an append-only sequence per task ordered by creation time;
/// they are never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskLogEntry {
    id: TaskLogId,
    task_id: TaskId,
    target_user_id: Option<UserId>,
    action: ActionKind,
    remark: Option<String>,
    cost: Option<CostRecord>,
    recorded_by: UserId,
    recorded_at: DateTime<Utc>,
    evidence: Vec<EvidenceRef>,
}

impl TaskLogEntry {
    /// Materializes a persisted entry from its new-entry fields.
    #[must_use]
    pub fn from_new(
        id: TaskLogId,
        entry: NewTaskLogEntry,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            task_id: entry.task_id,
            target_user_id: entry.target_user_id,
            action: entry.action,
            remark: entry.remark,
            cost: entry.cost,
            recorded_by: entry.recorded_by,
            recorded_at,
            evidence: Vec::new(),
        }
    }

    /// Returns a copy with the given evidence references attached.
    #[must_use]
    pub fn with_evidence(mut self, evidence: impl IntoIterator<Item = EvidenceRef>) -> Self {
        self.evidence = evidence.into_iter().collect();
        self
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> TaskLogId {
        self.id
    }

    /// Returns the task the entry belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the assignee at the time of the action, if any.
    #[must_use]
    pub const fn target_user_id(&self) -> Option<UserId> {
        self.target_user_id
    }

    /// Returns the recorded action.
    #[must_use]
    pub const fn action(&self) -> ActionKind {
        self.action
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

    /// Returns the actor who performed the action.
    #[must_use]
    pub const fn recorded_by(&self) -> UserId {
        self.recorded_by
    }

    /// Returns the entry creation time.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Returns the attached evidence references.
    #[must_use]
    pub fn evidence(&self) -> &[EvidenceRef] {
        &self.evidence
    }
}
