//! One-call wiring of the full metrics pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entry::TimeEntry;
use crate::member::TeamMember;
use crate::metrics::{
    MemberMetrics, ProductivityTrend, ProjectMetrics, TeamInsights, TeamPerformanceMetrics,
    calculate_member_metrics, calculate_productivity_trends, calculate_project_metrics,
    calculate_team_performance, generate_team_insights,
};
use crate::project::Project;

/// Everything the team view needs, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamDashboard {
    /// Per-member metrics, in directory order.
    pub member_metrics: Vec<MemberMetrics>,
    /// Per-project metrics, in store order.
    pub project_metrics: Vec<ProjectMetrics>,
    /// Daily activity over the requested trailing window.
    pub trends: Vec<ProductivityTrend>,
    /// Team-wide rollup.
    pub performance: TeamPerformanceMetrics,
    /// Derived findings and recommendations.
    pub insights: TeamInsights,
}

/// Runs all five calculators over already-fetched inputs.
///
/// Pure and synchronous: callers own fetching (and re-fetching) the inputs
/// and simply recompute the whole dashboard whenever they change.
#[must_use]
pub fn compute_team_dashboard(
    members: &[TeamMember],
    projects: &[Project],
    entries: &[TimeEntry],
    trend_days: u32,
    now: DateTime<Utc>,
) -> TeamDashboard {
    tracing::debug!(
        members = members.len(),
        projects = projects.len(),
        entries = entries.len(),
        trend_days,
        "computing team dashboard"
    );

    let member_metrics: Vec<MemberMetrics> = members
        .iter()
        .map(|member| calculate_member_metrics(member, entries, projects))
        .collect();
    let project_metrics: Vec<ProjectMetrics> = projects
        .iter()
        .map(|project| calculate_project_metrics(project, entries))
        .collect();
    let trends = calculate_productivity_trends(entries, trend_days, now);

    let performance = calculate_team_performance(&member_metrics, &project_metrics);
    let insights = generate_team_insights(&member_metrics, &project_metrics, &trends);

    TeamDashboard {
        member_metrics,
        project_metrics,
        trends,
        performance,
        insights,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    use crate::types::{EntryId, MemberId, Progress, ProjectId};

    fn fixture() -> (Vec<TeamMember>, Vec<Project>, Vec<TimeEntry>, DateTime<Utc>) {
        let members = vec![
            TeamMember {
                id: MemberId::new("user-1").unwrap(),
                name: "Ada".to_string(),
                email: "ada@example.com".to_string(),
                avatar_url: None,
                role: "engineer".to_string(),
            },
            TeamMember {
                id: MemberId::new("user-2").unwrap(),
                name: "Grace".to_string(),
                email: "grace@example.com".to_string(),
                avatar_url: None,
                role: "engineer".to_string(),
            },
        ];
        let projects = vec![Project {
            id: ProjectId::new("proj-1").unwrap(),
            name: "Alpha".to_string(),
            progress: Progress::clamped(40),
            tasks: vec![],
        }];
        let now = Utc.with_ymd_and_hms(2025, 3, 15, 18, 0, 0).unwrap();
        let entries = vec![
            TimeEntry {
                id: EntryId::new("e1").unwrap(),
                user_id: MemberId::new("user-1").unwrap(),
                project_id: ProjectId::new("proj-1").unwrap(),
                task_id: None,
                start_time: Utc.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap(),
                end_time: None,
                duration_minutes: Some(420.0),
                is_running: false,
            },
            TimeEntry {
                id: EntryId::new("e2").unwrap(),
                user_id: MemberId::new("user-2").unwrap(),
                project_id: ProjectId::new("proj-1").unwrap(),
                task_id: None,
                start_time: Utc.with_ymd_and_hms(2025, 3, 15, 10, 0, 0).unwrap(),
                end_time: None,
                duration_minutes: None,
                is_running: true,
            },
        ];
        (members, projects, entries, now)
    }

    #[test]
    fn dashboard_wires_all_outputs_together() {
        let (members, projects, entries, now) = fixture();
        let dashboard = compute_team_dashboard(&members, &projects, &entries, 7, now);

        assert_eq!(dashboard.member_metrics.len(), 2);
        assert_eq!(dashboard.project_metrics.len(), 1);
        assert_eq!(dashboard.trends.len(), 7);
        assert_eq!(dashboard.performance.completed_tasks, 1);
        assert_eq!(
            dashboard.insights.productivity_trends.len(),
            dashboard.trends.len()
        );
    }

    #[test]
    fn dashboard_is_deterministic() {
        let (members, projects, entries, now) = fixture();
        let first = compute_team_dashboard(&members, &projects, &entries, 14, now);
        let second = compute_team_dashboard(&members, &projects, &entries, 14, now);
        assert_eq!(first, second);
    }
}
