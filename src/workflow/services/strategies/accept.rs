//! Task acceptance by its assignee.

use super::{TaskActionStrategy, ensure_permitted, record_action};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, WorkflowError, authorize,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Moves a pending task into progress when its assignee accepts it.
pub struct AcceptTaskStrategy;

impl TaskActionStrategy for AcceptTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Accept
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Accept)?;
        authorize::require_owner(&task, actor)?;
        task.accept()?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Accept, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
