//! Work approval by the event owner.

use super::{TaskActionStrategy, ensure_permitted, record_action, require_action_permission};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, Permission, PersistenceError, Task, WorkflowError,
    authorize,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Moves submitted work into the completed terminal status.
///
/// Approval is doubly guarded: the actor needs the approval permission and
/// must be the creator of the owning event.
pub struct ApproveTaskStrategy;

impl TaskActionStrategy for ApproveTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Approve
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Approve)?;
        require_action_permission(actor, ActionKind::Approve)?;
        authorize::require_event_creator(ctx.window(), actor, &Permission::approve_task())?;
        if let Some(cost) = ctx.cost() {
            task.record_cost(cost);
        }
        task.approve()?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Approve, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
