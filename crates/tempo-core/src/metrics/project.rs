//! Per-project aggregation from raw time entries.

use std::collections::HashSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::entry::TimeEntry;
use crate::metrics::{ratio, round2};
use crate::project::Project;
use crate::types::{Progress, ProjectId};

/// A rule-triggered risk flag on a project.
///
/// Rules are evaluated independently (a project can carry several flags) in
/// a fixed order, so downstream lists are deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bottleneck {
    /// Fewer than one completed entry per active day.
    LowVelocity,
    /// One person carrying a substantial project alone.
    SinglePointOfFailure,
    /// Heavy logged effort against a mostly-incomplete project.
    HighEffortLowCompletion,
}

impl Bottleneck {
    /// Human-readable description shown on dashboards.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::LowVelocity => "Low task completion velocity",
            Self::SinglePointOfFailure => "Single point of failure",
            Self::HighEffortLowCompletion => "High effort, low completion",
        }
    }
}

impl fmt::Display for Bottleneck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for Bottleneck {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.message())
    }
}

/// Aggregated activity and risk flags for a single project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectMetrics {
    /// The project's identifier.
    pub project_id: ProjectId,
    /// The project's display name.
    pub project_name: String,
    /// Total completed hours logged against the project, two decimals.
    pub total_hours: f64,
    /// Distinct members who logged ANY time against the project, running
    /// timers included. Headcount, not effort.
    pub members_count: usize,
    /// The store's completion percentage, passed through untouched.
    pub completion_rate: Progress,
    /// Completed entries per active day, two decimals.
    pub average_velocity: f64,
    /// Risk flags, in rule order.
    pub bottlenecks: Vec<Bottleneck>,
}

/// Aggregates a project's entries into [`ProjectMetrics`].
///
/// Hour totals and velocity consider completed entries only; the member
/// headcount deliberately counts anyone who logged any entry, so a project
/// with one person's running timer still shows a member.
#[expect(
    clippy::cast_precision_loss,
    reason = "entry and day counts are far below f64 precision limits"
)]
#[must_use]
pub fn calculate_project_metrics(project: &Project, entries: &[TimeEntry]) -> ProjectMetrics {
    let project_entries: Vec<&TimeEntry> = entries
        .iter()
        .filter(|e| e.project_id == project.id)
        .collect();
    let completed: Vec<(&TimeEntry, f64)> = project_entries
        .iter()
        .filter_map(|e| e.duration_minutes.map(|minutes| (*e, minutes)))
        .collect();

    let total_minutes: f64 = completed.iter().map(|(_, minutes)| minutes).sum();
    let total_hours = round2(total_minutes / 60.0);

    let members: HashSet<_> = project_entries.iter().map(|e| &e.user_id).collect();
    let members_count = members.len();

    let unique_days: HashSet<_> = completed
        .iter()
        .map(|(entry, _)| entry.start_time.date_naive())
        .collect();
    let average_velocity = round2(ratio(completed.len() as f64, unique_days.len() as f64));

    let completion_rate = project.progress;

    let mut bottlenecks = Vec::new();
    if average_velocity < 1.0 {
        bottlenecks.push(Bottleneck::LowVelocity);
    }
    if members_count < 2 && total_hours > 40.0 {
        bottlenecks.push(Bottleneck::SinglePointOfFailure);
    }
    if completion_rate.value() < 50 && total_hours > 80.0 {
        bottlenecks.push(Bottleneck::HighEffortLowCompletion);
    }

    ProjectMetrics {
        project_id: project.id.clone(),
        project_name: project.name.clone(),
        total_hours,
        members_count,
        completion_rate,
        average_velocity,
        bottlenecks,
    }
}
