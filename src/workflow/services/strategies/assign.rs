//! Task assignment.

use super::{TaskActionStrategy, ensure_permitted, record_action, require_action_permission};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, ValidationError,
    WorkflowError, validate_and_mark_overrun,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Sets or replaces the assignee, resetting the status to pending.
///
/// Reassignment always restarts the acceptance cycle, whatever progress
/// the previous assignee had made.
pub struct AssignTaskStrategy;

impl TaskActionStrategy for AssignTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Assign
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Assign)?;
        require_action_permission(actor, ActionKind::Assign)?;
        let assignee_id = ctx
            .assignee_id()
            .ok_or(ValidationError::MissingAssignee)?;
        validate_and_mark_overrun(&mut task, ctx.window())?;
        task.assign_to(assignee_id)?;

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::AssignmentFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Assign, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
