//! Task lifecycle status values.

use super::ParseStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
///
/// `Pending` is the entry status produced by task creation and by
/// (re)assignment. `Completed` and `Rejected` are terminal; `Delayed` is a
/// marker applied by temporal validation when a task window overruns its
/// event window, not a status reachable through a dedicated action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is waiting for its assignee to accept or reject it.
    Pending,
    /// Task has been accepted and is being worked on.
    Progress,
    /// Task work has been submitted and awaits approval.
    PendingApproval,
    /// Task has been approved and closed.
    Completed,
    /// Task work is blocked.
    Blocked,
    /// Task was rejected by its assignee.
    Rejected,
    /// Task window overruns the owning event window.
    Delayed,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Progress => "progress",
            Self::PendingApproval => "pending_approval",
            Self::Completed => "completed",
            Self::Blocked => "blocked",
            Self::Rejected => "rejected",
            Self::Delayed => "delayed",
        }
    }

    /// Returns whether the status ends the normal lifecycle.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Rejected)
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "progress" => Ok(Self::Progress),
            "pending_approval" => Ok(Self::PendingApproval),
            "completed" => Ok(Self::Completed),
            "blocked" => Ok(Self::Blocked),
            "rejected" => Ok(Self::Rejected),
            "delayed" => Ok(Self::Delayed),
            _ => Err(ParseStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
