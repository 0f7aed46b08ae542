//! In-memory workflow store for tests and local development.
//!
//! Transactions are simulated with a snapshot of the whole state taken
//! under the write lock: the operation runs against the live state and a
//! failure restores the snapshot, so callers observe the same
//! commit-or-rollback contract the database-backed store provides.

use crate::workflow::domain::{
    EvidenceId, EvidenceRef, EvidenceUpload, FileError, NewTaskLogEntry, PersistenceError, Task,
    TaskId, TaskLogEntry, TaskLogId, WorkflowError,
};
use crate::workflow::ports::{
    ActionOutcome, EvidenceVault, WorkflowOp, WorkflowStore, WorkflowTxn,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Default)]
struct StoreState {
    tasks: HashMap<TaskId, Task>,
    logs: Vec<TaskLogEntry>,
}

/// Thread-safe in-memory workflow store.
#[derive(Clone)]
pub struct InMemoryWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<StoreState>>,
    vault: Arc<dyn EvidenceVault>,
    clock: Arc<C>,
}

impl<C> InMemoryWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty store writing evidence bytes into the given vault.
    #[must_use]
    pub fn new(vault: Arc<dyn EvidenceVault>, clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(StoreState::default())),
            vault,
            clock,
        }
    }
}

fn poisoned<T>(err: std::sync::PoisonError<T>) -> PersistenceError {
    PersistenceError::backend(std::io::Error::other(err.to_string()))
}

struct InMemoryTxn<'a> {
    state: &'a mut StoreState,
    vault: &'a dyn EvidenceVault,
    now: DateTime<Utc>,
}

impl WorkflowTxn for InMemoryTxn<'_> {
    fn find_task(&mut self, id: TaskId) -> Result<Option<Task>, PersistenceError> {
        Ok(self.state.tasks.get(&id).cloned())
    }

    fn insert_task(&mut self, task: &Task) -> Result<(), PersistenceError> {
        self.state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn update_task(&mut self, task: &mut Task) -> Result<u64, PersistenceError> {
        match self.state.tasks.get_mut(&task.id()) {
            Some(existing) => {
                task.set_updated_at(self.now);
                *existing = task.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn delete_task(&mut self, id: TaskId) -> Result<u64, PersistenceError> {
        Ok(u64::from(self.state.tasks.remove(&id).is_some()))
    }

    fn insert_log(&mut self, entry: NewTaskLogEntry) -> Result<TaskLogEntry, PersistenceError> {
        let log = TaskLogEntry::from_new(TaskLogId::new(), entry, self.now);
        self.state.logs.push(log.clone());
        Ok(log)
    }

    fn attach_evidence(
        &mut self,
        task_id: TaskId,
        log_id: TaskLogId,
        files: &[EvidenceUpload],
    ) -> Result<Vec<EvidenceRef>, FileError> {
        let Some(log) = self.state.logs.iter_mut().find(|log| log.id() == log_id) else {
            return Err(FileError::UploadContextMissing { log_id });
        };

        let mut refs = Vec::with_capacity(files.len());
        for upload in files {
            let evidence_id = EvidenceId::new();
            let stored = self
                .vault
                .store_file(task_id, log_id, evidence_id, upload)?;
            refs.push(EvidenceRef::new(evidence_id, log_id, upload, stored));
        }
        *log = log.clone().with_evidence(refs.clone());
        Ok(refs)
    }
}

#[async_trait]
impl<C> WorkflowStore for InMemoryWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    async fn execute(&self, op: WorkflowOp) -> Result<ActionOutcome, WorkflowError> {
        let now = self.clock.utc();
        let mut state = self.state.write().map_err(|err| {
            WorkflowError::Persistence(poisoned(err))
        })?;
        let snapshot = (*state).clone();

        let mut txn = InMemoryTxn {
            state: &mut state,
            vault: self.vault.as_ref(),
            now,
        };
        match op(&mut txn) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                *state = snapshot;
                Err(err)
            }
        }
    }

    async fn load_task(&self, id: TaskId) -> Result<Option<Task>, PersistenceError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn task_history(&self, id: TaskId) -> Result<Vec<TaskLogEntry>, PersistenceError> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .logs
            .iter()
            .filter(|log| log.task_id() == id)
            .cloned()
            .collect())
    }
}
