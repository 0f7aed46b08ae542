//! Then steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, run_async};
use rstest_bdd_macros::then;
use runsheet::workflow::domain::{
    ActionKind, AuthorizationError, StateError, TaskStatus, ValidationError, WorkflowError,
};

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &TaskWorkflowWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;

    let view = world
        .task_view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let reloaded = run_async(
        world
            .service
            .get_task(world.event()?.id(), view.task().id()),
    )
    .map_err(|err| eyre::eyre!("reload task: {err}"))?;

    if reloaded.task().status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            reloaded.task().status().as_str()
        ));
    }
    Ok(())
}

#[then(r#"the task history records a "{action}" action"#)]
fn history_records_action(world: &TaskWorkflowWorld, action: String) -> Result<(), eyre::Report> {
    let expected = ActionKind::try_from(action.as_str())
        .map_err(|err| eyre::eyre!("invalid expected action in scenario: {err}"))?;

    let view = world
        .task_view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;
    let history = run_async(world.service.task_history(view.task().id()))
        .map_err(|err| eyre::eyre!("load history: {err}"))?;

    if !history.iter().any(|entry| entry.action() == expected) {
        return Err(eyre::eyre!(
            "no {} entry found in {} history entries",
            expected.as_str(),
            history.len()
        ));
    }
    Ok(())
}

#[then(r#"the task is assigned to "{name}""#)]
fn task_assigned_to(world: &TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let person = world
        .people
        .get(&name)
        .ok_or_else(|| eyre::eyre!("unknown person {name} in scenario world"))?;
    let view = world
        .task_view
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    if view.task().assignee_id() != Some(person.id()) {
        return Err(eyre::eyre!("task is not assigned to {name}"));
    }
    Ok(())
}

#[then("the action fails because the actor is not the assignee")]
fn action_fails_not_owner(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failed action in scenario world"))?;

    if !matches!(
        error,
        WorkflowError::Authorization(AuthorizationError::NotOwner { .. })
    ) {
        return Err(eyre::eyre!("expected NotOwner error, got {error:?}"));
    }
    Ok(())
}

#[then("the action fails because the task status does not permit it")]
fn action_fails_wrong_status(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failed action in scenario world"))?;

    if !matches!(
        error,
        WorkflowError::State(StateError::WrongStatusForAction { .. })
    ) {
        return Err(eyre::eyre!("expected WrongStatusForAction error, got {error:?}"));
    }
    Ok(())
}

#[then("the action fails because the task window is outside the event window")]
fn action_fails_outside_window(world: &TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let error = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected a failed action in scenario world"))?;

    if !matches!(
        error,
        WorkflowError::Validation(ValidationError::OutsideEventWindow { .. })
    ) {
        return Err(eyre::eyre!("expected OutsideEventWindow error, got {error:?}"));
    }
    Ok(())
}
