//! Transactional store port for the workflow engine.
//!
//! One action is one [`WorkflowStore::execute`] call: the store opens a
//! transaction, hands the operation a [`WorkflowTxn`] surface, and commits
//! only when the operation returns `Ok`. Task mutation, audit log
//! insertion, and evidence association are therefore atomic; a failure at
//! any step leaves the persisted task as it was before the call began.

use crate::workflow::domain::{
    EvidenceRef, EvidenceUpload, FileError, NewTaskLogEntry, PersistenceError, Task, TaskId,
    TaskLogEntry, TaskLogId, WorkflowError,
};
use async_trait::async_trait;

/// Result of a committed action: the task after mutation and the audit log
/// entry the action wrote, with its attached evidence.
///
/// For deletions the task is the final snapshot taken before removal.
#[derive(Debug, Clone)]
pub struct ActionOutcome {
    /// The task after the action's mutation.
    pub task: Task,
    /// The audit log entry recorded for the action.
    pub log: TaskLogEntry,
}

/// A workflow operation executed inside one transaction.
pub type WorkflowOp =
    Box<dyn FnOnce(&mut dyn WorkflowTxn) -> Result<ActionOutcome, WorkflowError> + Send>;

/// Transaction-scoped persistence surface handed to strategies.
///
/// `update_task` and `delete_task` report rows affected so strategies can
/// map a zero-row write to the appropriate typed failure.
pub trait WorkflowTxn {
    /// Loads a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    fn find_task(&mut self, id: TaskId) -> Result<Option<Task>, PersistenceError>;

    /// Inserts a new task row.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    fn insert_task(&mut self, task: &Task) -> Result<(), PersistenceError>;

    /// Writes the task's current state, refreshing its last-update
    /// timestamp, and returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    fn update_task(&mut self, task: &mut Task) -> Result<u64, PersistenceError>;

    /// Deletes the task row and returns the number of rows affected.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    fn delete_task(&mut self, id: TaskId) -> Result<u64, PersistenceError>;

    /// Appends an audit log entry and returns it with its assigned
    /// identifier and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    fn insert_log(&mut self, entry: NewTaskLogEntry) -> Result<TaskLogEntry, PersistenceError>;

    /// Stores evidence files and associates them with an existing log
    /// entry.
    ///
    /// # Errors
    ///
    /// Returns [`FileError::UploadContextMissing`] when the log entry does
    /// not exist, or [`FileError::Storage`] when the bytes cannot be
    /// written.
    fn attach_evidence(
        &mut self,
        task_id: TaskId,
        log_id: TaskLogId,
        files: &[EvidenceUpload],
    ) -> Result<Vec<EvidenceRef>, FileError>;
}

/// Atomic execution of workflow operations plus the engine's read paths.
#[async_trait]
pub trait WorkflowStore: Send + Sync {
    /// Runs the operation inside one transaction, committing on `Ok` and
    /// rolling back on `Err`.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged, or a persistence error
    /// when the transaction itself cannot be run.
    async fn execute(&self, op: WorkflowOp) -> Result<ActionOutcome, WorkflowError>;

    /// Loads a task outside any action.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    async fn load_task(&self, id: TaskId) -> Result<Option<Task>, PersistenceError>;

    /// Returns a task's audit log entries ordered by creation time, oldest
    /// first, with their attached evidence.
    ///
    /// Entries survive task deletion; history remains readable afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    async fn task_history(&self, id: TaskId) -> Result<Vec<TaskLogEntry>, PersistenceError>;
}
