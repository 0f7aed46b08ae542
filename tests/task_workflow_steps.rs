//! Behaviour tests for the task lifecycle workflow.

#[path = "task_workflow_steps/mod.rs"]
mod task_workflow_steps_defs;

use rstest_bdd_macros::scenario;
use task_workflow_steps_defs::world::{TaskWorkflowWorld, world};

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Assignee accepts a pending task"
)]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_accepts_pending_task(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "A bystander cannot submit another assignee's work"
)]
#[tokio::test(flavor = "multi_thread")]
async fn bystander_cannot_submit(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Approval requires submitted work"
)]
#[tokio::test(flavor = "multi_thread")]
async fn approval_requires_submitted_work(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "Reassignment restarts the acceptance cycle"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reassignment_restarts_acceptance(world: TaskWorkflowWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/task_workflow.feature",
    name = "A task window overrunning the event is rejected"
)]
#[tokio::test(flavor = "multi_thread")]
async fn overrunning_task_window_rejected(world: TaskWorkflowWorld) {
    let _ = world;
}
