//! Report command for aggregating a period into team metrics.
//!
//! This module implements `tempo report` with various period options
//! (--week, --last-week, --day, --last-day) and output formats
//! (human-readable, JSON).

use std::fmt::Write;

use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::Serialize;

use tempo_core::{
    MemberMetrics, ProjectMetrics, TeamPerformanceMetrics, calculate_member_metrics,
    calculate_project_metrics, calculate_team_performance,
};
use tempo_db::Database;

/// Report period type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Week,
    LastWeek,
    Day,
    LastDay,
}

/// Period type for JSON output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Week,
    Day,
}

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub generated_at: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub period_type: PeriodType,
    pub timezone: String,
    pub members: Vec<MemberMetrics>,
    pub projects: Vec<ProjectMetrics>,
    pub team: TeamPerformanceMetrics,
}

// ========== Period Date Calculation ==========

impl Period {
    /// Half-open `[start, end)` bounds for this period relative to `today`,
    /// anchored to local midnights and expressed in UTC. Weeks run Monday to
    /// Monday.
    #[must_use]
    pub fn bounds(self, today: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        let week = Duration::days(7);
        let day = Duration::days(1);
        let (first, next) = match self {
            Self::Week => (monday, monday + week),
            Self::LastWeek => (monday - week, monday),
            Self::Day => (today, today + day),
            Self::LastDay => (today - day, today),
        };
        (local_midnight(first), local_midnight(next))
    }

    const fn kind(self) -> PeriodType {
        match self {
            Self::Week | Self::LastWeek => PeriodType::Week,
            Self::Day | Self::LastDay => PeriodType::Day,
        }
    }
}

/// First instant of a local calendar day, in UTC.
///
/// A DST fall-back makes midnight ambiguous; the earlier instant wins. A
/// spring-forward can remove midnight entirely, in which case 01:00 local
/// stands in for it.
fn local_midnight(date: NaiveDate) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => dt.with_timezone(&Utc),
        LocalResult::None => Local
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map_or_else(
                || Utc.from_utc_datetime(&midnight),
                |dt| dt.with_timezone(&Utc),
            ),
    }
}

// ========== Hours Formatting ==========

/// Formats fractional hours as a duration string.
/// Returns "Xh Ym" if >= 1 hour, "Xm" if < 1 hour.
/// Non-positive values are treated as 0m.
#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded before casting, hour totals are small"
)]
pub fn format_hours(hours: f64) -> String {
    if hours <= 0.0 {
        return "0m".to_string();
    }
    let total_minutes = (hours * 60.0).round() as i64;
    let h = total_minutes / 60;
    let m = total_minutes % 60;

    if h >= 1 {
        format!("{h}h {m}m")
    } else {
        format!("{m}m")
    }
}

// ========== Progress Bar ==========

/// Generates a 10-character progress bar.
/// Values <5% of max get a single block for visibility.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "ratio is clamped to the bar width before casting"
)]
pub fn progress_bar(value: f64, max: f64) -> String {
    if max <= 0.0 {
        return "░░░░░░░░░░".to_string();
    }

    let ratio = value / max;
    let filled = if ratio < 0.05 && value > 0.0 {
        1 // Minimum 1 for visibility
    } else {
        (ratio * 10.0).round().clamp(0.0, 10.0) as usize
    };

    let empty = 10 - filled;
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

// ========== Report Generation ==========

/// Generates report data from the database.
pub fn generate_report_data(
    db: &Database,
    period: Period,
    generated_at: DateTime<Utc>,
) -> Result<ReportData> {
    let today = Local::now().date_naive();
    let (period_start, period_end) = period.bounds(today);
    let period_type = period.kind();

    let timezone = iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string());

    let members = db.list_members()?;
    let projects = db.list_projects()?;
    let entries = db.list_entries_in_range(period_start, period_end)?;

    let member_metrics: Vec<MemberMetrics> = members
        .iter()
        .map(|member| calculate_member_metrics(member, &entries, &projects))
        .collect();
    let project_metrics: Vec<ProjectMetrics> = projects
        .iter()
        .map(|project| calculate_project_metrics(project, &entries))
        .collect();
    let team = calculate_team_performance(&member_metrics, &project_metrics);

    Ok(ReportData {
        generated_at,
        period_start,
        period_end,
        period_type,
        timezone,
        members: member_metrics,
        projects: project_metrics,
        team,
    })
}

/// Header line for the covered period, in local time.
fn period_heading(data: &ReportData) -> String {
    let start = data.period_start.with_timezone(&Local).date_naive();
    match data.period_type {
        PeriodType::Week => format!("Week of {}", start.format("%b %-d, %Y")),
        PeriodType::Day => start.format("%A, %b %-d, %Y").to_string(),
    }
}

/// Truncate a display name by characters, not bytes.
fn truncate_name(name: &str, width: usize) -> String {
    if name.chars().count() > width {
        format!("{}...", name.chars().take(width - 3).collect::<String>())
    } else {
        name.to_string()
    }
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let mut output = String::new();

    writeln!(output, "TEAM REPORT: {}", period_heading(data)).unwrap();

    let active_members: Vec<&MemberMetrics> = data
        .members
        .iter()
        .filter(|m| m.hours_worked > 0.0)
        .collect();

    if active_members.is_empty() {
        let period_word = match data.period_type {
            PeriodType::Week => "week",
            PeriodType::Day => "day",
        };
        writeln!(output).unwrap();
        writeln!(output, "No time entries recorded this {period_word}.").unwrap();
        writeln!(output).unwrap();
        writeln!(output, "Hint: Run 'tempo log' to record time.").unwrap();
        return output;
    }

    // MEMBERS section, busiest first, bars scaled to the busiest member
    let mut sorted_members = active_members;
    sorted_members.sort_by(|a, b| b.hours_worked.total_cmp(&a.hours_worked));
    let max_hours = sorted_members.first().map_or(0.0, |m| m.hours_worked);

    writeln!(output).unwrap();
    writeln!(output, "MEMBERS").unwrap();
    writeln!(output, "───────").unwrap();
    for metrics in &sorted_members {
        let name = truncate_name(&metrics.member.name, 22);
        let hours = format_hours(metrics.hours_worked);
        let bar = progress_bar(metrics.hours_worked, max_hours);
        writeln!(
            output,
            "{:<22}  {:>7}  prod {:>3}%  util {:>3}%  {}",
            name, hours, metrics.productivity, metrics.utilization, bar
        )
        .unwrap();
    }

    // PROJECTS section, heaviest first, risk flags indented below each row
    let active_projects: Vec<&ProjectMetrics> = {
        let mut projects: Vec<&ProjectMetrics> = data
            .projects
            .iter()
            .filter(|p| p.total_hours > 0.0)
            .collect();
        projects.sort_by(|a, b| b.total_hours.total_cmp(&a.total_hours));
        projects
    };

    if !active_projects.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "PROJECTS").unwrap();
        writeln!(output, "────────").unwrap();
        for metrics in &active_projects {
            let name = truncate_name(&metrics.project_name, 22);
            let hours = format_hours(metrics.total_hours);
            let members_word = if metrics.members_count == 1 {
                "member"
            } else {
                "members"
            };
            let done = metrics.completion_rate.to_string();
            writeln!(
                output,
                "{:<22}  {:>7}  {} {}  {:>4} done",
                name, hours, metrics.members_count, members_word, done
            )
            .unwrap();
            for bottleneck in &metrics.bottlenecks {
                writeln!(output, "  - {bottleneck}").unwrap();
            }
        }
    }

    // SUMMARY section
    writeln!(output).unwrap();
    writeln!(output, "SUMMARY").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(
        output,
        "Total hours:      {}",
        format_hours(data.team.total_hours)
    )
    .unwrap();
    writeln!(output, "Entries logged:   {}", data.team.completed_tasks).unwrap();
    writeln!(
        output,
        "Avg productivity: {}%",
        data.team.average_productivity
    )
    .unwrap();
    writeln!(output, "Efficiency:       {}%", data.team.efficiency).unwrap();
    writeln!(output, "Ongoing projects: {}", data.team.ongoing_tasks).unwrap();
    writeln!(output, "Risk flags:       {}", data.team.overdue_items).unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub generated_at: String,
    pub timezone: &'a str,
    pub period: JsonPeriod,
    pub members: &'a [MemberMetrics],
    pub projects: &'a [ProjectMetrics],
    pub team: &'a TeamPerformanceMetrics,
}

#[derive(Debug, Serialize)]
pub struct JsonPeriod {
    pub start: String,
    pub end: String,
    #[serde(rename = "type")]
    pub period_type: PeriodType,
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let local_start = data.period_start.with_timezone(&Local);
    let local_end = data.period_end.with_timezone(&Local);

    // period_end is the first instant of the following period; the inclusive
    // end date shown is one day earlier
    let end_date = (local_end.date_naive() - Duration::days(1))
        .format("%Y-%m-%d")
        .to_string();

    let report = JsonReport {
        generated_at: data.generated_at.to_rfc3339(),
        timezone: &data.timezone,
        period: JsonPeriod {
            start: local_start.date_naive().format("%Y-%m-%d").to_string(),
            end: end_date,
            period_type: data.period_type,
        },
        members: &data.members,
        projects: &data.projects,
        team: &data.team,
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run(db: &Database, period: Period, json: bool) -> Result<()> {
    let generated_at = Utc::now();
    let data = generate_report_data(db, period, generated_at)?;

    if json {
        let output = format_report_json(&data)?;
        println!("{output}");
    } else {
        let output = format_report(&data);
        print!("{output}");
    }

    Ok(())
}
