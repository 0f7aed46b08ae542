//! When steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, hour, run_async};
use rstest_bdd_macros::when;
use runsheet::workflow::domain::{ActorContext, TaskId, WorkflowError};
use runsheet::workflow::services::{
    AssignTaskRequest, CreateTaskRequest, TaskActionRequest, TaskView,
};

fn current_task_id(world: &TaskWorkflowWorld) -> Result<TaskId, eyre::Report> {
    world
        .task_view
        .as_ref()
        .map(|view| view.task().id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
}

fn record_outcome(world: &mut TaskWorkflowWorld, result: Result<TaskView, WorkflowError>) {
    match result {
        Ok(view) => {
            world.task_view = Some(view);
            world.last_error = None;
        }
        Err(err) => world.last_error = Some(err),
    }
}

#[when(r#""{name}" accepts the task"#)]
fn person_accepts(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.person_actor(&name)?;
    let event_id = world.event()?.id();
    let task_id = current_task_id(world)?;

    let result = run_async(world.service.accept_task(
        &actor,
        event_id,
        task_id,
        TaskActionRequest::new(),
    ));
    record_outcome(world, result);
    Ok(())
}

#[when(r#""{name}" submits the task"#)]
fn person_submits(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world
        .register_person(&name)
        .map(|person| ActorContext::new(person.id()))?;
    let event_id = world.event()?.id();
    let task_id = current_task_id(world)?;

    let result = run_async(world.service.submit_task(
        &actor,
        event_id,
        task_id,
        TaskActionRequest::new(),
    ));
    record_outcome(world, result);
    Ok(())
}

#[when("the event owner approves the task")]
fn owner_approves(world: &mut TaskWorkflowWorld) -> Result<(), eyre::Report> {
    let actor = world.owner_actor()?;
    let event_id = world.event()?.id();
    let task_id = current_task_id(world)?;

    let result = run_async(world.service.approve_task(
        &actor,
        event_id,
        task_id,
        TaskActionRequest::new(),
    ));
    record_outcome(world, result);
    Ok(())
}

#[when(r#"the event owner reassigns the task to "{name}""#)]
fn owner_reassigns(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let replacement = world.register_person(&name)?;
    let actor = world.owner_actor()?;
    let event_id = world.event()?.id();
    let task_id = current_task_id(world)?;

    let result = run_async(world.service.assign_task(
        &actor,
        event_id,
        task_id,
        AssignTaskRequest::new(replacement.id()),
    ));
    record_outcome(world, result);
    Ok(())
}

#[when("the event owner creates a task scheduled from hour {start:u32} to hour {end:u32}")]
fn owner_creates_task(
    world: &mut TaskWorkflowWorld,
    start: u32,
    end: u32,
) -> Result<(), eyre::Report> {
    let actor = world.owner_actor()?;
    let event_id = world.event()?.id();

    let request = CreateTaskRequest::new(event_id, "Overnight teardown", hour(start), hour(end));
    let result = run_async(world.service.create_task(&actor, request));
    record_outcome(world, result);
    Ok(())
}
