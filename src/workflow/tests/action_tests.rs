//! Unit tests for the action precondition table and guard selection.

use crate::workflow::domain::{ActionKind, ParseActionKindError, Permission, TaskStatus};
use rstest::rstest;

const ALL_STATUSES: [TaskStatus; 7] = [
    TaskStatus::Pending,
    TaskStatus::Progress,
    TaskStatus::PendingApproval,
    TaskStatus::Completed,
    TaskStatus::Blocked,
    TaskStatus::Rejected,
    TaskStatus::Delayed,
];

const ALL_ACTIONS: [ActionKind; 9] = [
    ActionKind::Create,
    ActionKind::Update,
    ActionKind::Delete,
    ActionKind::Assign,
    ActionKind::Accept,
    ActionKind::Reject,
    ActionKind::Submit,
    ActionKind::Approve,
    ActionKind::Block,
];

#[rstest]
#[case(ActionKind::Create, &ALL_STATUSES)]
#[case(ActionKind::Delete, &ALL_STATUSES)]
#[case(
    ActionKind::Assign,
    &[
        TaskStatus::Pending,
        TaskStatus::Progress,
        TaskStatus::PendingApproval,
        TaskStatus::Blocked,
        TaskStatus::Delayed,
    ]
)]
#[case(
    ActionKind::Update,
    &[
        TaskStatus::Pending,
        TaskStatus::Progress,
        TaskStatus::PendingApproval,
        TaskStatus::Blocked,
        TaskStatus::Rejected,
        TaskStatus::Delayed,
    ]
)]
#[case(ActionKind::Accept, &[TaskStatus::Pending])]
#[case(ActionKind::Reject, &[TaskStatus::Pending])]
#[case(ActionKind::Submit, &[TaskStatus::Progress])]
#[case(ActionKind::Block, &[TaskStatus::Progress])]
#[case(ActionKind::Approve, &[TaskStatus::PendingApproval])]
fn permits_matches_transition_table(#[case] action: ActionKind, #[case] allowed: &[TaskStatus]) {
    for status in ALL_STATUSES {
        assert_eq!(
            action.permits(status),
            allowed.contains(&status),
            "action {action} with status {status}"
        );
    }
}

#[rstest]
#[case(ActionKind::Create, Some("create-task"))]
#[case(ActionKind::Update, Some("update-task"))]
#[case(ActionKind::Assign, Some("assign-task"))]
#[case(ActionKind::Approve, Some("approve-task"))]
#[case(ActionKind::Block, Some("block-task"))]
#[case(ActionKind::Delete, None)]
#[case(ActionKind::Accept, None)]
#[case(ActionKind::Reject, None)]
#[case(ActionKind::Submit, None)]
fn required_permission_matches_guard_mode(
    #[case] action: ActionKind,
    #[case] expected: Option<&str>,
) {
    assert_eq!(
        action.required_permission(),
        expected.map(Permission::new)
    );
}

#[rstest]
fn ownership_guard_covers_exactly_the_assignee_actions() {
    for action in ALL_ACTIONS {
        let expected = matches!(
            action,
            ActionKind::Accept | ActionKind::Reject | ActionKind::Submit
        );
        assert_eq!(action.requires_ownership(), expected, "action {action}");
    }
}

#[rstest]
fn as_str_round_trips_through_try_from() {
    for action in ALL_ACTIONS {
        assert_eq!(ActionKind::try_from(action.as_str()), Ok(action));
    }
}

#[rstest]
fn try_from_rejects_unknown_action() {
    assert_eq!(
        ActionKind::try_from("archive"),
        Err(ParseActionKindError("archive".to_owned()))
    );
}

#[rstest]
fn serde_representation_matches_storage_form() {
    for action in ALL_ACTIONS {
        assert_eq!(
            serde_json::to_value(action).expect("action should serialize"),
            serde_json::Value::String(action.as_str().to_owned())
        );
    }
}
