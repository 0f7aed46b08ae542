//! Work submission for approval.

use super::{TaskActionStrategy, ensure_permitted, record_action};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, WorkflowError, authorize,
    validate_and_mark_overrun,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Moves in-progress work into pending approval.
///
/// Submission accepts evidence files documenting the finished work and may
/// record the cost the assignee incurred.
pub struct SubmitTaskStrategy;

impl TaskActionStrategy for SubmitTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Submit
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Submit)?;
        authorize::require_owner(&task, actor)?;
        validate_and_mark_overrun(&mut task, ctx.window())?;
        if let Some(cost) = ctx.cost() {
            task.record_cost(cost);
        }
        task.submit_for_approval()?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Submit, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
