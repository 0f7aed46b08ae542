//! Blocking in-progress work.

use super::{TaskActionStrategy, ensure_permitted, record_action, require_action_permission};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, WorkflowError,
    validate_and_mark_overrun,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Marks in-progress work as blocked.
///
/// Evidence files describing the blocker travel with the action and land
/// on the block log entry.
pub struct BlockTaskStrategy;

impl TaskActionStrategy for BlockTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Block
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Block)?;
        require_action_permission(actor, ActionKind::Block)?;
        validate_and_mark_overrun(&mut task, ctx.window())?;
        task.block()?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Block, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
