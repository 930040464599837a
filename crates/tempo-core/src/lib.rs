//! Core domain logic for team time analytics.
//!
//! This crate contains the fundamental types and logic for:
//! - Domain records: time entries, team members, projects and tasks
//! - The metrics pipeline: per-member, per-project, daily-trend, and
//!   team-wide aggregation plus derived insights
//! - Dashboard assembly: one call wiring all five calculators together

pub mod dashboard;
pub mod entry;
pub mod member;
pub mod metrics;
pub mod project;
pub mod types;

pub use dashboard::{TeamDashboard, compute_team_dashboard};
pub use entry::TimeEntry;
pub use member::TeamMember;
pub use metrics::{
    Bottleneck, DEFAULT_TREND_DAYS, MemberMetrics, ProductivityTrend, ProjectMetrics, ProjectShare,
    TeamInsights, TeamPerformanceMetrics, calculate_member_metrics, calculate_productivity_trends,
    calculate_project_metrics, calculate_team_performance, generate_team_insights,
};
pub use project::{Project, Task};
pub use types::{EntryId, MemberId, Progress, ProjectId, TaskId, ValidationError};
