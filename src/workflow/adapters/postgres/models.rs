//! Diesel row models for workflow persistence.

use super::schema::{task_log_files, task_logs, workflow_tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = workflow_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning tenant.
    pub tenant_id: uuid::Uuid,
    /// Owning event.
    pub event_id: uuid::Uuid,
    /// Current assignee, if any.
    pub assignee_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Task window start.
    pub starts_at: DateTime<Utc>,
    /// Task window end.
    pub ends_at: DateTime<Utc>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional monetary cost in cents.
    pub money_cost_cents: Option<i64>,
    /// Optional labour cost in minutes.
    pub labour_cost_minutes: Option<i64>,
    /// Creator identity.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = workflow_tasks)]
pub struct NewTaskRow {
    /// Internal task identifier.
    pub id: uuid::Uuid,
    /// Owning tenant.
    pub tenant_id: uuid::Uuid,
    /// Owning event.
    pub event_id: uuid::Uuid,
    /// Current assignee, if any.
    pub assignee_id: Option<uuid::Uuid>,
    /// Task name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Lifecycle status.
    pub status: String,
    /// Task window start.
    pub starts_at: DateTime<Utc>,
    /// Task window end.
    pub ends_at: DateTime<Utc>,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional monetary cost in cents.
    pub money_cost_cents: Option<i64>,
    /// Optional labour cost in minutes.
    pub labour_cost_minutes: Option<i64>,
    /// Creator identity.
    pub created_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for audit log entries.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_logs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLogRow {
    /// Log entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Assignee at the time of the action, if any.
    pub target_user_id: Option<uuid::Uuid>,
    /// Recorded action kind.
    pub action: String,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional monetary cost in cents.
    pub money_cost_cents: Option<i64>,
    /// Optional labour cost in minutes.
    pub labour_cost_minutes: Option<i64>,
    /// Actor who performed the action.
    pub recorded_by: uuid::Uuid,
    /// Entry creation timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Insert model for audit log entries.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_logs)]
pub struct NewTaskLogRow {
    /// Log entry identifier.
    pub id: uuid::Uuid,
    /// Task the entry belongs to.
    pub task_id: uuid::Uuid,
    /// Assignee at the time of the action, if any.
    pub target_user_id: Option<uuid::Uuid>,
    /// Recorded action kind.
    pub action: String,
    /// Optional free-text remark.
    pub remark: Option<String>,
    /// Optional monetary cost in cents.
    pub money_cost_cents: Option<i64>,
    /// Optional labour cost in minutes.
    pub labour_cost_minutes: Option<i64>,
    /// Actor who performed the action.
    pub recorded_by: uuid::Uuid,
    /// Entry creation timestamp.
    pub recorded_at: DateTime<Utc>,
}

/// Query result row for evidence file references.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = task_log_files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskLogFileRow {
    /// Evidence identifier.
    pub id: uuid::Uuid,
    /// Log entry the file is attached to.
    pub log_id: uuid::Uuid,
    /// Original file name.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Stored size in bytes.
    pub size_bytes: i64,
    /// SHA-256 checksum of the stored bytes.
    pub sha256: String,
    /// Vault locator of the stored bytes.
    pub locator: String,
}

/// Insert model for evidence file references.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = task_log_files)]
pub struct NewTaskLogFileRow {
    /// Evidence identifier.
    pub id: uuid::Uuid,
    /// Log entry the file is attached to.
    pub log_id: uuid::Uuid,
    /// Original file name.
    pub file_name: String,
    /// Declared content type, if any.
    pub content_type: Option<String>,
    /// Stored size in bytes.
    pub size_bytes: i64,
    /// SHA-256 checksum of the stored bytes.
    pub sha256: String,
    /// Vault locator of the stored bytes.
    pub locator: String,
}
