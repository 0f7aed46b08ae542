//! Temporal containment validation of a task window against its event
//! window.

use super::{EventWindow, Task, ValidationError};

/// Validates that the task window is well-formed and contained in the
/// event window, marking the task delayed when it overruns the event end.
///
/// The check order is fixed:
///
/// 1. `starts_at >= ends_at` fails with
///    [`ValidationError::InvalidTimeRange`]; the task is untouched.
/// 2. `starts_at` before the event start fails with
///    [`ValidationError::OutsideEventWindow`]; the task is untouched.
/// 3. `ends_at` after the event end **sets the task status to delayed**,
///    then fails with [`ValidationError::OutsideEventWindow`]. The caller
///    holds a mutated aggregate even though the call failed; the
///    surrounding transaction is expected to roll back, so the persisted
///    row keeps its prior status.
///
/// # Errors
///
/// Returns the first failing check as described above.
pub fn validate_and_mark_overrun(
    task: &mut Task,
    window: &EventWindow,
) -> Result<(), ValidationError> {
    let starts_at = task.starts_at();
    let ends_at = task.ends_at();

    if starts_at >= ends_at {
        return Err(ValidationError::InvalidTimeRange { starts_at, ends_at });
    }
    if starts_at < window.starts_at() {
        return Err(ValidationError::OutsideEventWindow {
            event_id: window.event_id(),
        });
    }
    if ends_at > window.ends_at() {
        task.mark_delayed();
        return Err(ValidationError::OutsideEventWindow {
            event_id: window.event_id(),
        });
    }
    Ok(())
}
