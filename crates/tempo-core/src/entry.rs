//! Raw time-tracking entries logged against projects.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{EntryId, MemberId, ProjectId, TaskId};

/// A single logged block of work.
///
/// Entries come in two states: completed (the timer was stopped and
/// `duration_minutes` is set) and running (`is_running` with no duration yet).
/// Only completed entries contribute to aggregated hour totals; a running
/// timer is visible in listings but never counted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for this entry.
    pub id: EntryId,
    /// The member who logged the time.
    pub user_id: MemberId,
    /// The project the time was logged against.
    pub project_id: ProjectId,
    /// The task within the project, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<TaskId>,
    /// When the work started.
    pub start_time: DateTime<Utc>,
    /// When the work ended, if the timer has been stopped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// Logged duration in minutes. `None` while the timer is running.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<f64>,
    /// Whether the timer is still running.
    #[serde(default)]
    pub is_running: bool,
}

impl TimeEntry {
    /// Whether this entry has a recorded duration and may be aggregated.
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.duration_minutes.is_some()
    }
}
