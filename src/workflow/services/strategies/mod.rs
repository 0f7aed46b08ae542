//! Action strategies: one per action kind.
//!
//! Every strategy follows the same skeleton in a fixed fail-fast order:
//! status precondition, authorization, temporal validation where times are
//! relevant, field mutation, persistence, one audit log entry, evidence
//! attachment. A failure at any step aborts the surrounding transaction, so
//! a rejected action leaves no partial writes behind.

mod accept;
mod approve;
mod assign;
mod block;
mod create;
mod delete;
mod reject;
mod submit;
mod update;

pub use accept::AcceptTaskStrategy;
pub use approve::ApproveTaskStrategy;
pub use assign::AssignTaskStrategy;
pub use block::BlockTaskStrategy;
pub use create::CreateTaskStrategy;
pub use delete::DeleteTaskStrategy;
pub use reject::RejectTaskStrategy;
pub use submit::SubmitTaskStrategy;
pub use update::UpdateTaskStrategy;

use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, AuthorizationError, NewTaskLogEntry, StateError,
    Task, TaskLogEntry, WorkflowError, authorize,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// One action kind's precondition, effect, and side effects.
///
/// `execute` receives the task to act on (for creation, a freshly built,
/// not yet persisted aggregate), the explicit acting identity, the per-call
/// context, and the transaction surface to write through.
pub trait TaskActionStrategy: Send + Sync {
    /// The action kind this strategy implements.
    fn kind(&self) -> ActionKind;

    /// Executes the action inside the caller's transaction.
    ///
    /// # Errors
    ///
    /// Returns a typed [`WorkflowError`] naming the first failing concern;
    /// the caller rolls the transaction back.
    fn execute(
        &self,
        task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError>;
}

/// Checks the status-precondition table for the given action.
pub(crate) fn ensure_permitted(task: &Task, action: ActionKind) -> Result<(), StateError> {
    if action.permits(task.status()) {
        Ok(())
    } else {
        Err(StateError::WrongStatusForAction {
            action,
            task_id: task.id(),
            status: task.status(),
        })
    }
}

/// Checks the action's named permission when it is permission-guarded.
pub(crate) fn require_action_permission(
    actor: &ActorContext,
    action: ActionKind,
) -> Result<(), AuthorizationError> {
    action
        .required_permission()
        .map_or(Ok(()), |permission| {
            authorize::require_permission(actor, &permission)
        })
}

/// Writes the action's audit log entry and attaches any evidence files.
///
/// The log row is inserted first so evidence can reference its id — the
/// explicit two-step sequence the attachment contract requires.
pub(crate) fn record_action(
    task: &Task,
    actor: &ActorContext,
    ctx: &ActionContext,
    action: ActionKind,
    txn: &mut dyn WorkflowTxn,
) -> Result<TaskLogEntry, WorkflowError> {
    let entry = NewTaskLogEntry {
        task_id: task.id(),
        target_user_id: task.assignee_id(),
        action,
        remark: ctx.remark().map(ToOwned::to_owned),
        cost: ctx.cost(),
        recorded_by: actor.actor_id(),
    };
    let log = txn.insert_log(entry)?;
    if ctx.evidence().is_empty() {
        return Ok(log);
    }
    let refs = txn.attach_evidence(task.id(), log.id(), ctx.evidence())?;
    Ok(log.with_evidence(refs))
}
