//! Task deletion.

use super::{TaskActionStrategy, record_action};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, WorkflowError,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Removes the task row and records a terminal log entry.
///
/// Deletion is allowed from any status and carries no guard of its own
/// beyond what the caller enforced. The log entry outlives the task so the
/// history stays readable.
pub struct DeleteTaskStrategy;

impl TaskActionStrategy for DeleteTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Delete
    }

    fn execute(
        &self,
        task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        let rows = txn.delete_task(task.id())?;
        if rows == 0 {
            return Err(PersistenceError::DeleteFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Delete, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
