//! Given steps for task workflow BDD scenarios.

use super::world::{TaskWorkflowWorld, hour, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use runsheet::workflow::domain::{EventId, EventRecord, TenantId, UserId};
use runsheet::workflow::services::{CreateTaskRequest, TaskActionRequest};

#[given("an event running from hour {start:u32} to hour {end:u32}")]
fn event_with_window(
    world: &mut TaskWorkflowWorld,
    start: u32,
    end: u32,
) -> Result<(), eyre::Report> {
    let event = EventRecord::new(
        EventId::new(),
        TenantId::new(),
        "Harbour Lights Festival",
        UserId::new(),
        hour(start),
        hour(end),
    );
    world
        .events
        .insert(event.clone())
        .map_err(|err| eyre::eyre!("seed event: {err}"))?;
    world.event = Some(event);
    Ok(())
}

#[given(r#"a task scheduled from hour {start:u32} to hour {end:u32} assigned to "{name}""#)]
fn task_assigned_to(
    world: &mut TaskWorkflowWorld,
    start: u32,
    end: u32,
    name: String,
) -> Result<(), eyre::Report> {
    let assignee = world.register_person(&name)?;
    let event_id = world.event()?.id();
    let owner = world.owner_actor()?;

    let request = CreateTaskRequest::new(event_id, "Rig the main stage", hour(start), hour(end))
        .with_assignee(assignee.id());
    let view = run_async(world.service.create_task(&owner, request))
        .wrap_err("create task in scenario setup")?;
    world.task_view = Some(view);
    Ok(())
}

#[given(r#""{name}" has accepted the task"#)]
fn person_has_accepted(world: &mut TaskWorkflowWorld, name: String) -> Result<(), eyre::Report> {
    let actor = world.person_actor(&name)?;
    let event_id = world.event()?.id();
    let task_id = world
        .task_view
        .as_ref()
        .map(|view| view.task().id())
        .ok_or_else(|| eyre::eyre!("missing task in scenario world"))?;

    let view = run_async(world.service.accept_task(
        &actor,
        event_id,
        task_id,
        TaskActionRequest::new(),
    ))
    .wrap_err("accept task in scenario setup")?;
    world.task_view = Some(view);
    Ok(())
}
