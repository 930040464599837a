//! Per-member aggregation from raw time entries.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::entry::TimeEntry;
use crate::member::TeamMember;
use crate::metrics::{ratio, round2, round_pct};
use crate::project::Project;
use crate::types::ProjectId;

/// Hours per working day used as the capacity baseline.
const BASELINE_DAY_HOURS: f64 = 8.0;

/// One member's share of time in a single project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectShare {
    /// Project display name, or "Unknown Project" when the entry references
    /// a project the store no longer lists.
    pub project_name: String,
    /// Hours logged in this project, rounded to two decimals.
    pub hours: f64,
    /// Share of the member's total logged minutes, rounded to a whole percent.
    pub percentage: u8,
}

/// Aggregated activity for a single team member.
///
/// Recomputed from scratch on every call; holds no identity beyond its
/// content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberMetrics {
    /// The member these metrics describe.
    pub member: TeamMember,
    /// Total logged hours, rounded to two decimals.
    pub hours_worked: f64,
    /// Number of completed entries. An entry-count throughput proxy, not
    /// verified task completion.
    pub tasks_completed: usize,
    /// Mean minutes per completed entry, unrounded. 0 with no entries.
    pub average_task_time: f64,
    /// Average daily hours against an 8-hour day, as a capped percentage.
    pub productivity: u8,
    /// Logged hours against theoretical capacity (active days x 8h), capped.
    pub utilization: u8,
    /// Per-project breakdown, sorted by hours descending.
    pub project_distribution: Vec<ProjectShare>,
}

/// Aggregates one member's completed entries into [`MemberMetrics`].
///
/// Entries belonging to other members and entries without a recorded
/// duration are ignored. A member with no completed entries yields all-zero
/// metrics and an empty distribution.
#[expect(
    clippy::cast_precision_loss,
    reason = "entry and day counts are far below f64 precision limits"
)]
#[must_use]
pub fn calculate_member_metrics(
    member: &TeamMember,
    entries: &[TimeEntry],
    projects: &[Project],
) -> MemberMetrics {
    let completed: Vec<(&TimeEntry, f64)> = entries
        .iter()
        .filter(|e| e.user_id == member.id)
        .filter_map(|e| e.duration_minutes.map(|minutes| (e, minutes)))
        .collect();

    let total_minutes: f64 = completed.iter().map(|(_, minutes)| minutes).sum();
    let hours_worked = round2(total_minutes / 60.0);

    let mut minutes_by_project: HashMap<&ProjectId, f64> = HashMap::new();
    for (entry, minutes) in &completed {
        *minutes_by_project.entry(&entry.project_id).or_insert(0.0) += minutes;
    }

    let mut project_distribution: Vec<ProjectShare> = minutes_by_project
        .into_iter()
        .map(|(project_id, minutes)| {
            let project_name = projects
                .iter()
                .find(|p| p.id == *project_id)
                .map_or_else(|| "Unknown Project".to_string(), |p| p.name.clone());
            ProjectShare {
                project_name,
                hours: round2(minutes / 60.0),
                percentage: round_pct(ratio(minutes, total_minutes) * 100.0),
            }
        })
        .collect();
    project_distribution.sort_by(|a, b| b.hours.total_cmp(&a.hours));

    let unique_days: HashSet<_> = completed
        .iter()
        .map(|(entry, _)| entry.start_time.date_naive())
        .collect();
    let unique_days = unique_days.len();

    let average_hours_per_day = ratio(hours_worked, unique_days as f64);
    let productivity = round_pct(
        (ratio(average_hours_per_day, BASELINE_DAY_HOURS) * 100.0).min(100.0),
    );
    let utilization = round_pct(
        (ratio(hours_worked, unique_days as f64 * BASELINE_DAY_HOURS) * 100.0).min(100.0),
    );

    MemberMetrics {
        member: member.clone(),
        hours_worked,
        tasks_completed: completed.len(),
        average_task_time: ratio(total_minutes, completed.len() as f64),
        productivity,
        utilization,
        project_distribution,
    }
}
