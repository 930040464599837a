//! Qualitative insights derived from the computed metrics.

use std::cmp::Reverse;

use serde::Serialize;

use crate::metrics::member::MemberMetrics;
use crate::metrics::project::ProjectMetrics;
use crate::metrics::ratio;
use crate::metrics::trends::ProductivityTrend;

/// Productivity floor for the top-performer list.
const TOP_PRODUCTIVITY: u8 = 70;
/// Utilization floor for the top-performer list.
const TOP_UTILIZATION: u8 = 60;
/// Utilization ceiling for the underutilized list.
const UNDERUTILIZED_BELOW: u8 = 40;
/// Mean daily hours below which the team is flagged as off target.
const TARGET_DAILY_HOURS: f64 = 6.0;

/// Derived findings and recommendations for the team view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamInsights {
    /// Up to three members with both high productivity and high utilization,
    /// strongest first.
    pub top_performers: Vec<MemberMetrics>,
    /// Up to three active members with low utilization, lowest first.
    pub underutilized_members: Vec<MemberMetrics>,
    /// Up to five projects showing risk patterns, most-flagged first.
    pub bottleneck_projects: Vec<ProjectMetrics>,
    /// The daily series the recommendations were derived from.
    pub productivity_trends: Vec<ProductivityTrend>,
    /// Recommendation sentences, in a fixed order, each at most once.
    pub recommendations: Vec<String>,
}

/// Derives [`TeamInsights`] from the three calculator outputs.
///
/// `trends` is expected in chronological order (as produced by
/// [`calculate_productivity_trends`](crate::metrics::calculate_productivity_trends));
/// the below-target check averages the most recent week of it.
#[expect(
    clippy::cast_precision_loss,
    reason = "trend window lengths are far below f64 precision limits"
)]
#[must_use]
pub fn generate_team_insights(
    member_metrics: &[MemberMetrics],
    project_metrics: &[ProjectMetrics],
    trends: &[ProductivityTrend],
) -> TeamInsights {
    let mut top_performers: Vec<MemberMetrics> = member_metrics
        .iter()
        .filter(|m| m.productivity > TOP_PRODUCTIVITY && m.utilization > TOP_UTILIZATION)
        .cloned()
        .collect();
    top_performers.sort_by_key(|m| Reverse(u16::from(m.productivity) + u16::from(m.utilization)));
    top_performers.truncate(3);

    let mut underutilized_members: Vec<MemberMetrics> = member_metrics
        .iter()
        .filter(|m| m.utilization < UNDERUTILIZED_BELOW && m.hours_worked > 0.0)
        .cloned()
        .collect();
    underutilized_members.sort_by_key(|m| m.utilization);
    underutilized_members.truncate(3);

    let mut bottleneck_projects: Vec<ProjectMetrics> = project_metrics
        .iter()
        .filter(|p| {
            !p.bottlenecks.is_empty()
                || (p.total_hours > 40.0 && p.completion_rate.value() < 50)
        })
        .cloned()
        .collect();
    bottleneck_projects.sort_by_key(|p| Reverse(p.bottlenecks.len()));
    bottleneck_projects.truncate(5);

    let mut recommendations = Vec::new();
    if !underutilized_members.is_empty() {
        recommendations.push(format!(
            "{} team members are underutilized. Consider redistributing workload.",
            underutilized_members.len()
        ));
    }
    if !bottleneck_projects.is_empty() {
        recommendations.push(format!(
            "{} projects showing bottlenecks. Review resource allocation.",
            bottleneck_projects.len()
        ));
    }
    let recent_week = &trends[trends.len().saturating_sub(7)..];
    if !recent_week.is_empty() {
        let mean_hours = ratio(
            recent_week.iter().map(|t| t.hours).sum(),
            recent_week.len() as f64,
        );
        if mean_hours < TARGET_DAILY_HOURS {
            recommendations.push(
                "Team productivity below target. Consider checking for blockers or workload issues."
                    .to_string(),
            );
        }
    }
    if !top_performers.is_empty() {
        let names: Vec<&str> = top_performers
            .iter()
            .map(|m| m.member.name.as_str())
            .collect();
        recommendations.push(format!("Recognize top performers: {}", names.join(", ")));
    }

    TeamInsights {
        top_performers,
        underutilized_members,
        bottleneck_projects,
        productivity_trends: trends.to_vec(),
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::NaiveDate;

    use crate::member::TeamMember;
    use crate::metrics::project::Bottleneck;
    use crate::types::{MemberId, Progress, ProjectId};

    fn member_metrics(name: &str, hours: f64, productivity: u8, utilization: u8) -> MemberMetrics {
        MemberMetrics {
            member: TeamMember {
                id: MemberId::new(name).unwrap(),
                name: name.to_string(),
                email: format!("{name}@example.com"),
                avatar_url: None,
                role: "engineer".to_string(),
            },
            hours_worked: hours,
            tasks_completed: 0,
            average_task_time: 0.0,
            productivity,
            utilization,
            project_distribution: vec![],
        }
    }

    fn project_metrics(id: &str, hours: f64, progress: i64, bottlenecks: Vec<Bottleneck>) -> ProjectMetrics {
        ProjectMetrics {
            project_id: ProjectId::new(id).unwrap(),
            project_name: format!("project {id}"),
            total_hours: hours,
            members_count: 1,
            completion_rate: Progress::clamped(progress),
            average_velocity: 1.0,
            bottlenecks,
        }
    }

    fn trend_week(hours: f64) -> Vec<ProductivityTrend> {
        (1..=7)
            .map(|day| ProductivityTrend {
                date: NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
                hours,
                tasks_completed: 1,
                efficiency: hours,
            })
            .collect()
    }

    #[test]
    fn top_performers_require_both_thresholds() {
        let members = vec![
            member_metrics("ada", 40.0, 90, 80),
            member_metrics("grace", 40.0, 90, 50), // utilization too low
            member_metrics("alan", 40.0, 60, 80),  // productivity too low
        ];
        let insights = generate_team_insights(&members, &[], &[]);

        assert_eq!(insights.top_performers.len(), 1);
        assert_eq!(insights.top_performers[0].member.name, "ada");
    }

    #[test]
    fn top_performers_sorted_by_combined_score_and_capped_at_three() {
        let members = vec![
            member_metrics("a", 40.0, 75, 65),
            member_metrics("b", 40.0, 95, 90),
            member_metrics("c", 40.0, 80, 70),
            member_metrics("d", 40.0, 85, 80),
        ];
        let insights = generate_team_insights(&members, &[], &[]);

        let names: Vec<&str> = insights
            .top_performers
            .iter()
            .map(|m| m.member.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "d", "c"]);
    }

    #[test]
    fn underutilized_excludes_members_with_no_hours() {
        let members = vec![
            member_metrics("idle", 0.0, 0, 0),
            member_metrics("light", 2.0, 10, 25),
        ];
        let insights = generate_team_insights(&members, &[], &[]);

        assert_eq!(insights.underutilized_members.len(), 1);
        assert_eq!(insights.underutilized_members[0].member.name, "light");
    }

    #[test]
    fn underutilized_sorted_lowest_first() {
        let members = vec![
            member_metrics("a", 3.0, 20, 35),
            member_metrics("b", 2.0, 10, 15),
            member_metrics("c", 1.0, 15, 25),
        ];
        let insights = generate_team_insights(&members, &[], &[]);

        let names: Vec<&str> = insights
            .underutilized_members
            .iter()
            .map(|m| m.member.name.as_str())
            .collect();
        assert_eq!(names, vec!["b", "c", "a"]);
    }

    #[test]
    fn bottleneck_projects_include_unflagged_heavy_incomplete_work() {
        let projects = vec![
            project_metrics("flagged", 10.0, 90, vec![Bottleneck::LowVelocity]),
            project_metrics("heavy", 60.0, 30, vec![]),
            project_metrics("fine", 60.0, 80, vec![]),
        ];
        let insights = generate_team_insights(&[], &projects, &[]);

        let ids: Vec<&str> = insights
            .bottleneck_projects
            .iter()
            .map(|p| p.project_id.as_str())
            .collect();
        assert_eq!(ids, vec!["flagged", "heavy"]);
    }

    #[test]
    fn low_weekly_average_emits_below_target_recommendation() {
        let insights = generate_team_insights(&[], &[], &trend_week(5.0));

        assert_eq!(
            insights.recommendations,
            vec![
                "Team productivity below target. Consider checking for blockers or workload issues."
                    .to_string()
            ]
        );
    }

    #[test]
    fn healthy_weekly_average_emits_no_trend_recommendation() {
        let insights = generate_team_insights(&[], &[], &trend_week(7.0));
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn empty_trends_emit_no_trend_recommendation() {
        let insights = generate_team_insights(&[], &[], &[]);
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn weekly_average_uses_only_the_last_seven_rows() {
        // 23 idle days followed by a strong week: the idle tail must not
        // drag the average below target.
        let mut trends: Vec<ProductivityTrend> = (1..=23)
            .map(|day| ProductivityTrend {
                date: NaiveDate::from_ymd_opt(2025, 2, day).unwrap(),
                hours: 0.0,
                tasks_completed: 0,
                efficiency: 0.0,
            })
            .collect();
        trends.extend(trend_week(8.0));

        let insights = generate_team_insights(&[], &[], &trends);
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn recommendations_follow_fixed_order() {
        let members = vec![
            member_metrics("star", 40.0, 90, 80),
            member_metrics("light", 2.0, 10, 20),
        ];
        let projects = vec![project_metrics("stuck", 90.0, 20, vec![Bottleneck::LowVelocity])];
        let insights = generate_team_insights(&members, &projects, &trend_week(2.0));

        assert_eq!(
            insights.recommendations,
            vec![
                "1 team members are underutilized. Consider redistributing workload.".to_string(),
                "1 projects showing bottlenecks. Review resource allocation.".to_string(),
                "Team productivity below target. Consider checking for blockers or workload issues."
                    .to_string(),
                "Recognize top performers: star".to_string(),
            ]
        );
    }

    #[test]
    fn no_top_performers_omits_recognition() {
        let members = vec![member_metrics("steady", 40.0, 65, 55)];
        let insights = generate_team_insights(&members, &[], &trend_week(7.0));

        assert!(insights.top_performers.is_empty());
        assert!(
            insights
                .recommendations
                .iter()
                .all(|r| !r.starts_with("Recognize"))
        );
    }

    #[test]
    fn trends_are_carried_through() {
        let trends = trend_week(6.5);
        let insights = generate_team_insights(&[], &[], &trends);
        assert_eq!(insights.productivity_trends, trends);
    }
}
