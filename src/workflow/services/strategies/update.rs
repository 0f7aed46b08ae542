//! Task field updates.

use super::{TaskActionStrategy, ensure_permitted, record_action, require_action_permission};
use crate::workflow::domain::{
    ActionContext, ActionKind, ActorContext, PersistenceError, Task, TaskName, TaskPatch,
    WorkflowError, validate_and_mark_overrun,
};
use crate::workflow::ports::{ActionOutcome, WorkflowTxn};

/// Patches any supplied subset of name, description, window, and assignee.
///
/// Completed tasks cannot be updated. The event window is re-validated
/// only when the patch changed the task's times.
pub struct UpdateTaskStrategy;

impl TaskActionStrategy for UpdateTaskStrategy {
    fn kind(&self) -> ActionKind {
        ActionKind::Update
    }

    fn execute(
        &self,
        mut task: Task,
        actor: &ActorContext,
        ctx: &ActionContext,
        txn: &mut dyn WorkflowTxn,
    ) -> Result<ActionOutcome, WorkflowError> {
        ensure_permitted(&task, ActionKind::Update)?;
        require_action_permission(actor, ActionKind::Update)?;

        let patch = TaskPatch {
            name: ctx.name().map(TaskName::new).transpose()?,
            description: ctx.description().map(ToOwned::to_owned),
            starts_at: ctx.starts_at(),
            ends_at: ctx.ends_at(),
            assignee_id: ctx.assignee_id(),
        };
        let times_changed = task.apply_update(patch)?;
        if times_changed {
            validate_and_mark_overrun(&mut task, ctx.window())?;
        }

        let rows = txn.update_task(&mut task)?;
        if rows == 0 {
            return Err(PersistenceError::UpdateFailed(task.id()).into());
        }
        let log = record_action(&task, actor, ctx, ActionKind::Update, txn)?;
        Ok(ActionOutcome { task, log })
    }
}
