//! Workflow orchestration service.
//!
//! The orchestrator resolves everything an action references — the owning
//! event, a requested assignee, tenant consistency between the two —
//! before any strategy runs, builds the per-call [`ActionContext`], and
//! executes the strategy inside one store transaction. Strategies
//! therefore only ever see already-valid references.

use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, CostRecord, EventId, EventRecord, EvidenceUpload,
    LookupError, NewTaskData, Task, TaskId, TaskLogEntry, TaskName, TaskStatus, UserId,
    UserRecord, WorkflowError,
};
use crate::workflow::ports::{
    ActionOutcome, EventDirectory, UserDirectory, WorkflowOp, WorkflowStore,
};
use crate::workflow::services::registry::TaskActionRegistry;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Request payload for creating a task.
#[derive(Debug, Clone)]
pub struct CreateTaskRequest {
    event_id: EventId,
    name: String,
    description: Option<String>,
    assignee_id: Option<UserId>,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
    remark: Option<String>,
    status: Option<TaskStatus>,
    evidence: Vec<EvidenceUpload>,
}

impl CreateTaskRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(
        event_id: EventId,
        name: impl Into<String>,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            name: name.into(),
            description: None,
            assignee_id: None,
            starts_at,
            ends_at,
            remark: None,
            status: None,
            evidence: Vec::new(),
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the free-text remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Sets an explicit initial status instead of the pending default.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Adds evidence files recorded with the creation.
    #[must_use]
    pub fn with_evidence(mut self, files: impl IntoIterator<Item = EvidenceUpload>) -> Self {
        self.evidence.extend(files);
        self
    }
}

/// Request payload for patching task fields.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskRequest {
    name: Option<String>,
    description: Option<String>,
    starts_at: Option<DateTime<Utc>>,
    ends_at: Option<DateTime<Utc>>,
    assignee_id: Option<UserId>,
    remark: Option<String>,
    evidence: Vec<EvidenceUpload>,
}

impl UpdateTaskRequest {
    /// Creates an empty patch request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a replacement name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets a replacement description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets a replacement task window.
    #[must_use]
    pub const fn with_times(mut self, starts_at: DateTime<Utc>, ends_at: DateTime<Utc>) -> Self {
        self.starts_at = Some(starts_at);
        self.ends_at = Some(ends_at);
        self
    }

    /// Sets a replacement assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the free-text remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Adds evidence files recorded with the update.
    #[must_use]
    pub fn with_evidence(mut self, files: impl IntoIterator<Item = EvidenceUpload>) -> Self {
        self.evidence.extend(files);
        self
    }
}

/// Request payload for assigning a task.
#[derive(Debug, Clone)]
pub struct AssignTaskRequest {
    assignee_id: UserId,
    remark: Option<String>,
    evidence: Vec<EvidenceUpload>,
}

impl AssignTaskRequest {
    /// Creates a request assigning the task to the given user.
    #[must_use]
    pub const fn new(assignee_id: UserId) -> Self {
        Self {
            assignee_id,
            remark: None,
            evidence: Vec::new(),
        }
    }

    /// Sets the free-text remark.
    #[must_use]
    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Adds evidence files recorded with the assignment.
    #[must_use]
    pub fn with_evidence(mut self, files: impl IntoIterator<Item = EvidenceUpload>) -> Self {
        self.evidence.extend(files);
        self
    }
}

/// Request payload for the remaining lifecycle actions (accept, reject,
/// submit, approve, block, delete).
#[derive(Debug, Clone, Default)]
pub struct TaskActionRequest {
    remark: Option<String>,
    cost: Option<CostRecord>,
    evidence: Vec<EvidenceUpload>,
}

impl TaskActionRequest {
    /// Creates an empty action request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text remark.
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

    /// Adds evidence files recorded with the action.
    #[must_use]
    pub fn with_evidence(mut self, files: impl IntoIterator<Item = EvidenceUpload>) -> Self {
        self.evidence.extend(files);
        self
    }
}

/// Read view of a task enriched with its resolved event and assignee.
#[derive(Debug, Clone)]
pub struct TaskView {
    task: Task,
    event: EventRecord,
    assignee: Option<UserRecord>,
}

impl TaskView {
    /// Returns the task.
    #[must_use]
    pub const fn task(&self) -> &Task {
        &self.task
    }

    /// Returns the owning event.
    #[must_use]
    pub const fn event(&self) -> &EventRecord {
        &self.event
    }

    /// Returns the resolved assignee, if the task has one on record.
    #[must_use]
    pub const fn assignee(&self) -> Option<&UserRecord> {
        self.assignee.as_ref()
    }
}

/// The task an action addresses: a fresh aggregate for creation, or an
/// existing row to load inside the transaction.
enum ActionSubject {
    New(Task),
    Existing { event_id: EventId, task_id: TaskId },
}

/// Workflow orchestration service.
#[derive(Clone)]
pub struct TaskWorkflowService<E, U, S, C>
where
    E: EventDirectory,
    U: UserDirectory,
    S: WorkflowStore,
    C: Clock + Send + Sync,
{
    events: Arc<E>,
    users: Arc<U>,
    store: Arc<S>,
    registry: TaskActionRegistry,
    clock: Arc<C>,
}

impl<E, U, S, C> TaskWorkflowService<E, U, S, C>
where
    E: EventDirectory,
    U: UserDirectory,
    S: WorkflowStore,
    C: Clock + Send + Sync,
{
    /// Creates a service with the built-in strategy registry.
    #[must_use]
    pub fn new(events: Arc<E>, users: Arc<U>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self::with_registry(events, users, store, clock, TaskActionRegistry::default())
    }

    /// Creates a service with an explicit strategy registry.
    #[must_use]
    pub const fn with_registry(
        events: Arc<E>,
        users: Arc<U>,
        store: Arc<S>,
        clock: Arc<C>,
        registry: TaskActionRegistry,
    ) -> Self {
        Self {
            events,
            users,
            store,
            registry,
            clock,
        }
    }

    /// Creates a task inside an event.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, validation,
    /// authorization, or persistence fails.
    pub async fn create_task(
        &self,
        actor: &ActorContext,
        request: CreateTaskRequest,
    ) -> Result<TaskView, WorkflowError> {
        let event = self.resolve_event(request.event_id).await?;
        if let Some(assignee_id) = request.assignee_id {
            self.resolve_assignee(&event, assignee_id).await?;
        }

        let name = TaskName::new(request.name)?;
        let task = Task::create(
            NewTaskData {
                tenant_id: event.tenant_id(),
                event_id: event.id(),
                name,
                description: request.description,
                assignee_id: request.assignee_id,
                starts_at: request.starts_at,
                ends_at: request.ends_at,
                remark: request.remark.clone(),
                status: request.status,
                created_by: actor.actor_id(),
            },
            &*self.clock,
        );

        let mut ctx = ActionContext::new(event.window()).with_evidence(request.evidence);
        if let Some(remark) = request.remark {
            ctx = ctx.with_remark(remark);
        }

        let outcome = self
            .dispatch(ActionKind::Create, ActionSubject::New(task), actor, ctx)
            .await?;
        self.view_for(event, outcome.task).await
    }

    /// Patches task fields.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, validation,
    /// authorization, or persistence fails.
    pub async fn update_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> Result<TaskView, WorkflowError> {
        let event = self.resolve_event(event_id).await?;
        if let Some(assignee_id) = request.assignee_id {
            self.resolve_assignee(&event, assignee_id).await?;
        }

        let mut ctx = ActionContext::new(event.window()).with_evidence(request.evidence);
        if let Some(name) = request.name {
            ctx = ctx.with_name(name);
        }
        if let Some(description) = request.description {
            ctx = ctx.with_description(description);
        }
        if let (Some(starts_at), Some(ends_at)) = (request.starts_at, request.ends_at) {
            ctx = ctx.with_times(starts_at, ends_at);
        }
        if let Some(assignee_id) = request.assignee_id {
            ctx = ctx.with_assignee(assignee_id);
        }
        if let Some(remark) = request.remark {
            ctx = ctx.with_remark(remark);
        }

        let outcome = self
            .dispatch(
                ActionKind::Update,
                ActionSubject::Existing { event_id, task_id },
                actor,
                ctx,
            )
            .await?;
        self.view_for(event, outcome.task).await
    }

    /// Deletes a task, keeping its audit history.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution or persistence fails.
    pub async fn delete_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<(), WorkflowError> {
        let event = self.resolve_event(event_id).await?;
        let ctx = Self::plain_context(&event, request);
        self.dispatch(
            ActionKind::Delete,
            ActionSubject::Existing { event_id, task_id },
            actor,
            ctx,
        )
        .await?;
        Ok(())
    }

    /// Assigns or reassigns a task, resetting it to pending.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, validation,
    /// authorization, or persistence fails.
    pub async fn assign_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: AssignTaskRequest,
    ) -> Result<TaskView, WorkflowError> {
        let event = self.resolve_event(event_id).await?;
        self.resolve_assignee(&event, request.assignee_id).await?;

        let mut ctx = ActionContext::new(event.window())
            .with_assignee(request.assignee_id)
            .with_evidence(request.evidence);
        if let Some(remark) = request.remark {
            ctx = ctx.with_remark(remark);
        }

        let outcome = self
            .dispatch(
                ActionKind::Assign,
                ActionSubject::Existing { event_id, task_id },
                actor,
                ctx,
            )
            .await?;
        self.view_for(event, outcome.task).await
    }

    /// Accepts a pending task as its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, authorization, or
    /// persistence fails.
    pub async fn accept_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        self.run_lifecycle_action(ActionKind::Accept, actor, event_id, task_id, request)
            .await
    }

    /// Rejects a pending task as its assignee.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, authorization, or
    /// persistence fails.
    pub async fn reject_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        self.run_lifecycle_action(ActionKind::Reject, actor, event_id, task_id, request)
            .await
    }

    /// Submits in-progress work for approval.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, validation,
    /// authorization, or persistence fails.
    pub async fn submit_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        self.run_lifecycle_action(ActionKind::Submit, actor, event_id, task_id, request)
            .await
    }

    /// Approves submitted work as the event owner.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, authorization, or
    /// persistence fails.
    pub async fn approve_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        self.run_lifecycle_action(ActionKind::Approve, actor, event_id, task_id, request)
            .await
    }

    /// Marks in-progress work as blocked.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError`] when resolution, validation,
    /// authorization, or persistence fails.
    pub async fn block_task(
        &self,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        self.run_lifecycle_action(ActionKind::Block, actor, event_id, task_id, request)
            .await
    }

    /// Reads a task with its resolved event and assignee.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Lookup`] when the event or task does not
    /// exist, or [`WorkflowError::Persistence`] when the store fails.
    pub async fn get_task(
        &self,
        event_id: EventId,
        task_id: TaskId,
    ) -> Result<TaskView, WorkflowError> {
        let event = self.resolve_event(event_id).await?;
        let task = self
            .store
            .load_task(task_id)
            .await?
            .filter(|task| task.event_id() == event_id)
            .ok_or(LookupError::TaskNotFound(task_id))?;
        self.view_for(event, task).await
    }

    /// Reads a task's audit log, oldest entry first.
    ///
    /// History survives task deletion.
    ///
    /// # Errors
    ///
    /// Returns [`WorkflowError::Persistence`] when the store fails.
    pub async fn task_history(&self, task_id: TaskId) -> Result<Vec<TaskLogEntry>, WorkflowError> {
        Ok(self.store.task_history(task_id).await?)
    }

    async fn run_lifecycle_action(
        &self,
        kind: ActionKind,
        actor: &ActorContext,
        event_id: EventId,
        task_id: TaskId,
        request: TaskActionRequest,
    ) -> Result<TaskView, WorkflowError> {
        let event = self.resolve_event(event_id).await?;
        let ctx = Self::plain_context(&event, request);
        let outcome = self
            .dispatch(
                kind,
                ActionSubject::Existing { event_id, task_id },
                actor,
                ctx,
            )
            .await?;
        self.view_for(event, outcome.task).await
    }

    fn plain_context(event: &EventRecord, request: TaskActionRequest) -> ActionContext {
        let mut ctx = ActionContext::new(event.window()).with_evidence(request.evidence);
        if let Some(remark) = request.remark {
            ctx = ctx.with_remark(remark);
        }
        if let Some(cost) = request.cost {
            ctx = ctx.with_cost(cost);
        }
        ctx
    }

    async fn dispatch(
        &self,
        kind: ActionKind,
        subject: ActionSubject,
        actor: &ActorContext,
        ctx: ActionContext,
    ) -> Result<ActionOutcome, WorkflowError> {
        let strategy = self
            .registry
            .get(kind)
            .ok_or(WorkflowError::UnregisteredAction(kind))?;
        tracing::debug!(action = %kind, actor = %actor.actor_id(), "dispatching task action");

        let acting = actor.clone();
        let op: WorkflowOp = Box::new(move |txn| {
            let task = match subject {
                ActionSubject::New(task) => task,
                ActionSubject::Existing { event_id, task_id } => txn
                    .find_task(task_id)?
                    .filter(|task| task.event_id() == event_id)
                    .ok_or(LookupError::TaskNotFound(task_id))?,
            };
            strategy.execute(task, &acting, &ctx, txn)
        });

        let outcome = self.store.execute(op).await?;
        tracing::info!(
            action = %kind,
            task = %outcome.task.id(),
            status = %outcome.task.status(),
            "task action committed"
        );
        Ok(outcome)
    }

    async fn resolve_event(&self, event_id: EventId) -> Result<EventRecord, WorkflowError> {
        self.events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| LookupError::EventNotFound(event_id).into())
    }

    async fn resolve_assignee(
        &self,
        event: &EventRecord,
        assignee_id: UserId,
    ) -> Result<UserRecord, WorkflowError> {
        let user = self
            .users
            .find_by_id(assignee_id)
            .await?
            .ok_or(LookupError::UserNotFound(assignee_id))?;
        if user.tenant_id() != event.tenant_id() {
            return Err(LookupError::TenantMismatch {
                event_id: event.id(),
                user_id: assignee_id,
            }
            .into());
        }
        Ok(user)
    }

    async fn view_for(&self, event: EventRecord, task: Task) -> Result<TaskView, WorkflowError> {
        let assignee = match task.assignee_id() {
            Some(assignee_id) => self.users.find_by_id(assignee_id).await?,
            None => None,
        };
        Ok(TaskView {
            task,
            event,
            assignee,
        })
    }
}
