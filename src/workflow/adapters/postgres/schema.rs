//! Diesel schema for workflow persistence.

diesel::table! {
    /// Task records owned by an event.
    workflow_tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning tenant.
        tenant_id -> Uuid,
        /// Owning event.
        event_id -> Uuid,
        /// Current assignee, if any.
        assignee_id -> Nullable<Uuid>,
        /// Task name.
        #[max_length = 255]
        name -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Task window start.
        starts_at -> Timestamptz,
        /// Task window end.
        ends_at -> Timestamptz,
        /// Optional free-text remark.
        remark -> Nullable<Text>,
        /// Optional monetary cost in cents.
        money_cost_cents -> Nullable<Int8>,
        /// Optional labour cost in minutes.
        labour_cost_minutes -> Nullable<Int8>,
        /// Creator identity.
        created_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only audit log entries.
    ///
    /// Deliberately carries no foreign key to `workflow_tasks`: entries
    /// survive task deletion.
    task_logs (id) {
        /// Log entry identifier.
        id -> Uuid,
        /// Task the entry belongs to.
        task_id -> Uuid,
        /// Assignee at the time of the action, if any.
        target_user_id -> Nullable<Uuid>,
        /// Recorded action kind.
        #[max_length = 50]
        action -> Varchar,
        /// Optional free-text remark.
        remark -> Nullable<Text>,
        /// Optional monetary cost in cents.
        money_cost_cents -> Nullable<Int8>,
        /// Optional labour cost in minutes.
        labour_cost_minutes -> Nullable<Int8>,
        /// Actor who performed the action.
        recorded_by -> Uuid,
        /// Entry creation timestamp.
        recorded_at -> Timestamptz,
    }
}

diesel::table! {
    /// Evidence file references attached to audit log entries.
    task_log_files (id) {
        /// Evidence identifier.
        id -> Uuid,
        /// Log entry the file is attached to.
        log_id -> Uuid,
        /// Original file name.
        #[max_length = 255]
        file_name -> Varchar,
        /// Declared content type, if any.
        #[max_length = 255]
        content_type -> Nullable<Varchar>,
        /// Stored size in bytes.
        size_bytes -> Int8,
        /// SHA-256 checksum of the stored bytes, lowercase hex.
        #[max_length = 64]
        sha256 -> Varchar,
        /// Vault locator of the stored bytes.
        locator -> Text,
    }
}

diesel::joinable!(task_log_files -> task_logs (log_id));
diesel::allow_tables_to_appear_in_same_query!(workflow_tasks, task_logs, task_log_files);
