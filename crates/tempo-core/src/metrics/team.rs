//! Team-wide rollup of member and project metrics.

use serde::Serialize;

use crate::metrics::member::MemberMetrics;
use crate::metrics::project::ProjectMetrics;
use crate::metrics::{ratio, round2, round_pct};

/// A single team-level summary record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamPerformanceMetrics {
    /// Sum of member hours, two decimals.
    pub total_hours: f64,
    /// Mean member productivity, whole percent. 0 with no members.
    pub average_productivity: u8,
    /// Sum of member completed-entry counts.
    pub completed_tasks: usize,
    /// Projects still short of 100% completion.
    pub ongoing_tasks: usize,
    /// Total bottleneck flags across all projects.
    pub overdue_items: usize,
    /// Mean member utilization, whole percent. 0 with no members.
    pub efficiency: u8,
}

/// Rolls member and project metrics up into [`TeamPerformanceMetrics`].
#[expect(
    clippy::cast_precision_loss,
    reason = "member counts are far below f64 precision limits"
)]
#[must_use]
pub fn calculate_team_performance(
    member_metrics: &[MemberMetrics],
    project_metrics: &[ProjectMetrics],
) -> TeamPerformanceMetrics {
    let total_hours = round2(member_metrics.iter().map(|m| m.hours_worked).sum());

    let member_count = member_metrics.len() as f64;
    let productivity_sum: f64 = member_metrics
        .iter()
        .map(|m| f64::from(m.productivity))
        .sum();
    let utilization_sum: f64 = member_metrics
        .iter()
        .map(|m| f64::from(m.utilization))
        .sum();

    TeamPerformanceMetrics {
        total_hours,
        average_productivity: round_pct(ratio(productivity_sum, member_count)),
        completed_tasks: member_metrics.iter().map(|m| m.tasks_completed).sum(),
        ongoing_tasks: project_metrics
            .iter()
            .filter(|p| !p.completion_rate.is_complete())
            .count(),
        overdue_items: project_metrics.iter().map(|p| p.bottlenecks.len()).sum(),
        efficiency: round_pct(ratio(utilization_sum, member_count)),
    }
}
