//! Insights command deriving findings and recommendations.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::Utc;

use tempo_core::{TeamInsights, compute_team_dashboard};
use tempo_db::Database;

/// Runs the insights command over the full entry history.
pub fn run(db: &Database, trend_days: u32, json: bool) -> Result<()> {
    let now = Utc::now();
    let members = db.list_members()?;
    let projects = db.list_projects()?;
    let entries = db.list_entries()?;

    let dashboard = compute_team_dashboard(&members, &projects, &entries, trend_days, now);

    if json {
        println!("{}", serde_json::to_string_pretty(&dashboard.insights)?);
    } else {
        print!("{}", format_insights(&dashboard.insights));
    }
    Ok(())
}

/// Formats insights for human-readable output.
pub fn format_insights(insights: &TeamInsights) -> String {
    let mut output = String::new();

    writeln!(output, "TEAM INSIGHTS").unwrap();

    writeln!(output).unwrap();
    writeln!(output, "TOP PERFORMERS").unwrap();
    writeln!(output, "──────────────").unwrap();
    if insights.top_performers.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for (rank, metrics) in insights.top_performers.iter().enumerate() {
        writeln!(
            output,
            "{}. {:<22}  prod {:>3}%  util {:>3}%",
            rank + 1,
            metrics.member.name,
            metrics.productivity,
            metrics.utilization
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "UNDERUTILIZED").unwrap();
    writeln!(output, "─────────────").unwrap();
    if insights.underutilized_members.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for metrics in &insights.underutilized_members {
        writeln!(
            output,
            "{:<22}  util {:>3}%",
            metrics.member.name, metrics.utilization
        )
        .unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "BOTTLENECK PROJECTS").unwrap();
    writeln!(output, "───────────────────").unwrap();
    if insights.bottleneck_projects.is_empty() {
        writeln!(output, "(none)").unwrap();
    }
    for metrics in &insights.bottleneck_projects {
        writeln!(output, "{}", metrics.project_name).unwrap();
        for bottleneck in &metrics.bottlenecks {
            writeln!(output, "  - {bottleneck}").unwrap();
        }
    }

    writeln!(output).unwrap();
    writeln!(output, "RECOMMENDATIONS").unwrap();
    writeln!(output, "───────────────").unwrap();
    if insights.recommendations.is_empty() {
        writeln!(output, "No recommendations - team metrics look healthy.").unwrap();
    }
    for recommendation in &insights.recommendations {
        writeln!(output, "- {recommendation}").unwrap();
    }

    output
}
