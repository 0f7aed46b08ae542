//! Task rejection by its assignee.

use super::{TaskActionStrategy, ensure_permitted, record_action};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, WorkflowError, authorize,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Moves a pending task into the rejected terminal status when its
/// assignee declines it. The rejection reason travels in the remark.
pub struct RejectTaskStrategy;

impl TaskActionStrategy for RejectTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Reject
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Reject)?;
        authorize::require_owner(&task, actor)?;
        task.reject()?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Reject, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
