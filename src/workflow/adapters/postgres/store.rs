//! `PostgreSQL` workflow store.
//!
//! Each action's operation runs inside one diesel transaction on a
//! blocking thread; concurrent actions against the same task serialize on
//! the task row's lock. Evidence bytes go to the configured vault, the
//! reference rows stay in the transaction.

use super::models::{
    NewTaskLogFileRow, NewTaskLogRow, NewTaskRow, TaskLogFileRow, TaskLogRow, TaskRow,
};
use super::schema::{task_log_files, task_logs, workflow_tasks};
use crate::workflow::domain::{
    ActionKind, CostRecord, EventId, EvidenceId, EvidenceRef, EvidenceUpload, FileError,
    NewTaskLogEntry, PersistedTaskData, PersistenceError, StoredEvidence, Task, TaskId,
    TaskLogEntry, TaskLogId, TaskName, TaskStatus, TenantId, UserId, WorkflowError,
};
use crate::workflow::ports::{
    ActionOutcome, EvidenceVault, WorkflowOp, WorkflowStore, WorkflowTxn,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::Clock;
use std::collections::HashMap;
use std::sync::Arc;

/// `PostgreSQL` connection pool type used by workflow adapters.
pub type WorkflowPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed workflow store.
#[derive(Clone)]
pub struct PostgresWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    pool: WorkflowPgPool,
    vault: Arc<dyn EvidenceVault>,
    clock: Arc<C>,
}

impl<C> PostgresWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    /// Creates a store from a connection pool and an evidence vault.
    #[must_use]
    pub const fn new(pool: WorkflowPgPool, vault: Arc<dyn EvidenceVault>, clock: Arc<C>) -> Self {
        Self { pool, vault, clock }
    }

    async fn run_blocking<F, T>(&self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, PersistenceError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(PersistenceError::backend)?;
            f(&mut connection)
        })
        .await
        .map_err(PersistenceError::backend)?
    }
}

impl From<diesel::result::Error> for WorkflowError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Persistence(PersistenceError::backend(err))
    }
}

struct PgWorkflowTxn<'a> {
    conn: &'a mut PgConnection,
    vault: &'a dyn EvidenceVault,
    now: DateTime<Utc>,
}

impl WorkflowTxn for PgWorkflowTxn<'_> {
    fn find_task(&mut self, id: TaskId) -> Result<Option<Task>, PersistenceError> {
        let row = workflow_tasks::table
            .find(id.into_inner())
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.conn)
            .optional()
            .map_err(PersistenceError::backend)?;
        row.map(row_to_task).transpose()
    }

    fn insert_task(&mut self, task: &Task) -> Result<(), PersistenceError> {
        diesel::insert_into(workflow_tasks::table)
            .values(to_new_row(task))
            .execute(self.conn)
            .map_err(PersistenceError::backend)?;
        Ok(())
    }

    fn update_task(&mut self, task: &mut Task) -> Result<u64, PersistenceError> {
        task.set_updated_at(self.now);
        let rows = diesel::update(workflow_tasks::table.find(task.id().into_inner()))
            .set((
                workflow_tasks::assignee_id.eq(task.assignee_id().map(UserId::into_inner)),
                workflow_tasks::name.eq(task.name().as_str()),
                workflow_tasks::description.eq(task.description()),
                workflow_tasks::status.eq(task.status().as_str()),
                workflow_tasks::starts_at.eq(task.starts_at()),
                workflow_tasks::ends_at.eq(task.ends_at()),
                workflow_tasks::remark.eq(task.remark()),
                workflow_tasks::money_cost_cents
                    .eq(task.cost().and_then(|cost| cost.money_cents())),
                workflow_tasks::labour_cost_minutes
                    .eq(task.cost().and_then(|cost| cost.labour_minutes())),
                workflow_tasks::updated_at.eq(task.updated_at()),
            ))
            .execute(self.conn)
            .map_err(PersistenceError::backend)?;
        Ok(rows as u64)
    }

    fn delete_task(&mut self, id: TaskId) -> Result<u64, PersistenceError> {
        let rows = diesel::delete(workflow_tasks::table.find(id.into_inner()))
            .execute(self.conn)
            .map_err(PersistenceError::backend)?;
        Ok(rows as u64)
    }

    fn insert_log(&mut self, entry: NewTaskLogEntry) -> Result<TaskLogEntry, PersistenceError> {
        let log_id = TaskLogId::new();
        diesel::insert_into(task_logs::table)
            .values(to_new_log_row(log_id, &entry, self.now))
            .execute(self.conn)
            .map_err(PersistenceError::backend)?;
        Ok(TaskLogEntry::from_new(log_id, entry, self.now))
    }

    fn attach_evidence(
        &mut self,
        task_id: TaskId,
        log_id: TaskLogId,
        files: &[EvidenceUpload],
    ) -> Result<Vec<EvidenceRef>, FileError> {
        let present: bool = diesel::select(diesel::dsl::exists(
            task_logs::table.filter(task_logs::id.eq(log_id.into_inner())),
        ))
        .get_result(self.conn)
        .map_err(FileError::storage)?;
        if !present {
            return Err(FileError::UploadContextMissing { log_id });
        }

        let mut refs = Vec::with_capacity(files.len());
        for upload in files {
            let evidence_id = EvidenceId::new();
            let stored = self.vault.store_file(task_id, log_id, evidence_id, upload)?;
            let evidence = EvidenceRef::new(evidence_id, log_id, upload, stored);
            diesel::insert_into(task_log_files::table)
                .values(to_new_file_row(&evidence)?)
                .execute(self.conn)
                .map_err(FileError::storage)?;
            refs.push(evidence);
        }
        Ok(refs)
    }
}

#[async_trait]
impl<C> WorkflowStore for PostgresWorkflowStore<C>
where
    C: Clock + Send + Sync,
{
    async fn execute(&self, op: WorkflowOp) -> Result<ActionOutcome, WorkflowError> {
        let pool = self.pool.clone();
        let vault = Arc::clone(&self.vault);
        let now = self.clock.utc();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool
                .get()
                .map_err(|err| WorkflowError::Persistence(PersistenceError::backend(err)))?;
            connection.transaction(|conn| {
                let mut txn = PgWorkflowTxn {
                    conn,
                    vault: vault.as_ref(),
                    now,
                };
                op(&mut txn)
            })
        })
        .await
        .map_err(|err| WorkflowError::Persistence(PersistenceError::backend(err)))?
    }

    async fn load_task(&self, id: TaskId) -> Result<Option<Task>, PersistenceError> {
        self.run_blocking(move |connection| {
            let row = workflow_tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(PersistenceError::backend)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn task_history(&self, id: TaskId) -> Result<Vec<TaskLogEntry>, PersistenceError> {
        self.run_blocking(move |connection| {
            let log_rows = task_logs::table
                .filter(task_logs::task_id.eq(id.into_inner()))
                .order(task_logs::recorded_at.asc())
                .select(TaskLogRow::as_select())
                .load::<TaskLogRow>(connection)
                .map_err(PersistenceError::backend)?;

            let log_ids: Vec<uuid::Uuid> = log_rows.iter().map(|row| row.id).collect();
            let file_rows = task_log_files::table
                .filter(task_log_files::log_id.eq_any(log_ids))
                .select(TaskLogFileRow::as_select())
                .load::<TaskLogFileRow>(connection)
                .map_err(PersistenceError::backend)?;

            let mut files_by_log: HashMap<uuid::Uuid, Vec<EvidenceRef>> = HashMap::new();
            for row in file_rows {
                let log_uuid = row.log_id;
                files_by_log
                    .entry(log_uuid)
                    .or_default()
                    .push(file_row_to_ref(row)?);
            }

            log_rows
                .into_iter()
                .map(|row| {
                    let refs = files_by_log.remove(&row.id).unwrap_or_default();
                    Ok(log_row_to_entry(row)?.with_evidence(refs))
                })
                .collect()
        })
        .await
    }
}

fn cost_from_columns(money_cents: Option<i64>, labour_minutes: Option<i64>) -> Option<CostRecord> {
    if money_cents.is_none() && labour_minutes.is_none() {
        return None;
    }
    let mut cost = CostRecord::new();
    if let Some(cents) = money_cents {
        cost = cost.with_money_cents(cents);
    }
    if let Some(minutes) = labour_minutes {
        cost = cost.with_labour_minutes(minutes);
    }
    Some(cost)
}

fn row_to_task(row: TaskRow) -> Result<Task, PersistenceError> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(PersistenceError::backend)?;
    let name = TaskName::new(row.name).map_err(PersistenceError::backend)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        tenant_id: TenantId::from_uuid(row.tenant_id),
        event_id: EventId::from_uuid(row.event_id),
        assignee_id: row.assignee_id.map(UserId::from_uuid),
        name,
        description: row.description,
        status,
        starts_at: row.starts_at,
        ends_at: row.ends_at,
        remark: row.remark,
        cost: cost_from_columns(row.money_cost_cents, row.labour_cost_minutes),
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        tenant_id: task.tenant_id().into_inner(),
        event_id: task.event_id().into_inner(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        name: task.name().as_str().to_owned(),
        description: task.description().map(ToOwned::to_owned),
        status: task.status().as_str().to_owned(),
        starts_at: task.starts_at(),
        ends_at: task.ends_at(),
        remark: task.remark().map(ToOwned::to_owned),
        money_cost_cents: task.cost().and_then(|cost| cost.money_cents()),
        labour_cost_minutes: task.cost().and_then(|cost| cost.labour_minutes()),
        created_by: task.created_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_new_log_row(
    log_id: TaskLogId,
    entry: &NewTaskLogEntry,
    recorded_at: DateTime<Utc>,
) -> NewTaskLogRow {
    NewTaskLogRow {
        id: log_id.into_inner(),
        task_id: entry.task_id.into_inner(),
        target_user_id: entry.target_user_id.map(UserId::into_inner),
        action: entry.action.as_str().to_owned(),
        remark: entry.remark.clone(),
        money_cost_cents: entry.cost.and_then(|cost| cost.money_cents()),
        labour_cost_minutes: entry.cost.and_then(|cost| cost.labour_minutes()),
        recorded_by: entry.recorded_by.into_inner(),
        recorded_at,
    }
}

fn log_row_to_entry(row: TaskLogRow) -> Result<TaskLogEntry, PersistenceError> {
    let action =
        ActionKind::try_from(row.action.as_str()).map_err(PersistenceError::backend)?;
    let entry = NewTaskLogEntry {
        task_id: TaskId::from_uuid(row.task_id),
        target_user_id: row.target_user_id.map(UserId::from_uuid),
        action,
        remark: row.remark,
        cost: cost_from_columns(row.money_cost_cents, row.labour_cost_minutes),
        recorded_by: UserId::from_uuid(row.recorded_by),
    };
    Ok(TaskLogEntry::from_new(
        TaskLogId::from_uuid(row.id),
        entry,
        row.recorded_at,
    ))
}

fn to_new_file_row(evidence: &EvidenceRef) -> Result<NewTaskLogFileRow, FileError> {
    let size_bytes = i64::try_from(evidence.size_bytes()).map_err(FileError::storage)?;
    Ok(NewTaskLogFileRow {
        id: evidence.id().into_inner(),
        log_id: evidence.log_id().into_inner(),
        file_name: evidence.file_name().to_owned(),
        content_type: evidence.content_type().map(ToOwned::to_owned),
        size_bytes,
        sha256: evidence.sha256().to_owned(),
        locator: evidence.locator().to_owned(),
    })
}

fn file_row_to_ref(row: TaskLogFileRow) -> Result<EvidenceRef, PersistenceError> {
    let size_bytes = u64::try_from(row.size_bytes).map_err(PersistenceError::backend)?;
    Ok(EvidenceRef::from_persisted(
        EvidenceId::from_uuid(row.id),
        TaskLogId::from_uuid(row.log_id),
        row.file_name,
        row.content_type,
        StoredEvidence {
            locator: row.locator,
            sha256: row.sha256,
            size_bytes,
        },
    ))
}
