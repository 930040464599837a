//! Trends command for the daily productivity series.

use std::fmt::Write as _;

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;

use tempo_core::{ProductivityTrend, calculate_productivity_trends};
use tempo_db::Database;

use super::report::{format_hours, progress_bar};

/// Runs the trends command.
pub fn run(db: &Database, days: u32, json: bool) -> Result<()> {
    let now = Utc::now();
    let entries = db.list_entries()?;
    let trends = calculate_productivity_trends(&entries, days, now);

    if json {
        println!("{}", format_trends_json(&trends)?);
    } else {
        print!("{}", format_trends(&trends));
    }
    Ok(())
}

/// Formats the daily series as a table, bars scaled to the busiest day.
pub fn format_trends(trends: &[ProductivityTrend]) -> String {
    let mut output = String::new();

    writeln!(output, "PRODUCTIVITY (last {} days)", trends.len()).unwrap();
    writeln!(output).unwrap();

    if trends.is_empty() {
        writeln!(output, "(empty window)").unwrap();
        return output;
    }

    let max_hours = trends.iter().map(|t| t.hours).fold(0.0_f64, f64::max);

    writeln!(
        output,
        "{:<12}  {:>7}  {:>7}  {:>6}",
        "Date", "Hours", "Entries", "Eff"
    )
    .unwrap();
    writeln!(output, "────────────  ───────  ───────  ──────").unwrap();
    for trend in trends {
        let date = trend.date.to_string();
        let hours = format_hours(trend.hours);
        let efficiency = format!("{:.2}", trend.efficiency);
        let bar = progress_bar(trend.hours, max_hours);
        writeln!(
            output,
            "{:<12}  {:>7}  {:>7}  {:>6}  {}",
            date, hours, trend.tasks_completed, efficiency, bar
        )
        .unwrap();
    }

    let total_hours: f64 = trends.iter().map(|t| t.hours).sum();
    let total_entries: usize = trends.iter().map(|t| t.tasks_completed).sum();
    writeln!(output).unwrap();
    writeln!(
        output,
        "Total: {} across {} entries",
        format_hours(total_hours),
        total_entries
    )
    .unwrap();

    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonTrends<'a> {
    period: JsonPeriod,
    trends: &'a [ProductivityTrend],
}

#[derive(Debug, Serialize)]
struct JsonPeriod {
    start: String,
    end: String,
}

fn format_trends_json(trends: &[ProductivityTrend]) -> Result<String> {
    let start = trends
        .first()
        .map(|t| t.date.to_string())
        .unwrap_or_default();
    let end = trends
        .last()
        .map(|t| t.date.to_string())
        .unwrap_or_default();

    let json_trends = JsonTrends {
        period: JsonPeriod { start, end },
        trends,
    };

    Ok(serde_json::to_string_pretty(&json_trends)?)
}
