//! Authorization guard for task actions.
//!
//! Two guard modes exist. Ownership-guarded actions (accept, reject,
//! submit) require the actor to be the task's current assignee.
//! Permission-guarded actions require a named capability; approval
//! additionally requires the actor to be the event creator.

use super::{ActorContext, AuthorizationError, EventWindow, Permission, Task};

/// Requires the actor to be the task's current assignee.
///
/// # Errors
///
/// Returns [`AuthorizationError::NotOwner`] when the task is unassigned or
/// assigned to someone else.
pub fn require_owner(task: &Task, actor: &ActorContext) -> Result<(), AuthorizationError> {
    if task.assignee_id() == Some(actor.actor_id()) {
        Ok(())
    } else {
        Err(AuthorizationError::NotOwner {
            actor: actor.actor_id(),
            task_id: task.id(),
        })
    }
}

/// Requires the actor to hold the given permission.
///
/// # Errors
///
/// Returns [`AuthorizationError::MissingPermission`] when the permission is
/// not held.
pub fn require_permission(
    actor: &ActorContext,
    permission: &Permission,
) -> Result<(), AuthorizationError> {
    if actor.holds(permission) {
        Ok(())
    } else {
        Err(AuthorizationError::MissingPermission {
            actor: actor.actor_id(),
            permission: permission.clone(),
        })
    }
}

/// Requires the actor to be the creator of the owning event.
///
/// The mismatch surfaces as [`AuthorizationError::MissingPermission`] on
/// the given permission, matching how approval failures are reported.
///
/// # Errors
///
/// Returns [`AuthorizationError::MissingPermission`] when the actor is not
/// the event creator.
pub fn require_event_creator(
    window: &EventWindow,
    actor: &ActorContext,
    permission: &Permission,
) -> Result<(), AuthorizationError> {
    if window.created_by() == actor.actor_id() {
        Ok(())
    } else {
        Err(AuthorizationError::MissingPermission {
            actor: actor.actor_id(),
            permission: permission.clone(),
        })
    }
}
