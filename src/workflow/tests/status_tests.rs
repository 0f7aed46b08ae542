//! Unit tests for task status parsing and terminality.

use crate::workflow::domain::{ParseStatusError, TaskStatus};
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

#[rstest]
fn as_str_round_trips_through_try_from() {
    for status in ALL_STATUSES {
        assert_eq!(TaskStatus::try_from(status.as_str()), Ok(status));
    }
}

#[rstest]
#[case("Pending", TaskStatus::Pending)]
#[case(" pending_approval ", TaskStatus::PendingApproval)]
#[case("PROGRESS", TaskStatus::Progress)]
fn try_from_normalizes_case_and_whitespace(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw), Ok(expected));
}

#[rstest]
fn try_from_rejects_unknown_status() {
    assert_eq!(
        TaskStatus::try_from("paused"),
        Err(ParseStatusError("paused".to_owned()))
    );
}

#[rstest]
fn serde_representation_matches_storage_form() {
    for status in ALL_STATUSES {
        assert_eq!(
            serde_json::to_value(status).expect("status should serialize"),
            serde_json::Value::String(status.as_str().to_owned())
        );
    }
}

#[rstest]
#[case(TaskStatus::Pending, false)]
#[case(TaskStatus::Progress, false)]
#[case(TaskStatus::PendingApproval, false)]
#[case(TaskStatus::Completed, true)]
#[case(TaskStatus::Blocked, false)]
#[case(TaskStatus::Rejected, true)]
#[case(TaskStatus::Delayed, false)]
fn is_terminal_returns_expected(#[case] status: TaskStatus, #[case] expected: bool) {
    assert_eq!(status.is_terminal(), expected);
}
