//! Task creation.

use super::{TaskActionStrategy, record_action, require_action_permission};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, Task, WorkflowError, validate_and_mark_overrun,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Persists a freshly built task after permission and window checks.
///
/// Creation has no status precondition; the aggregate arrives with its
/// requested initial status already set.
pub struct CreateTaskStrategy;

impl TaskActionStrategy for CreateTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Create
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        require_action_permission(actor, ActionKind::Create)?;
        validate_and_mark_overrun(&mut task, ctx.window())?;
        txn.insert_task(&task)?;
        let log = record_action(&task, actor, ctx, ActionKind::Create, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
