//! Daily productivity series over a trailing window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::entry::TimeEntry;
use crate::metrics::{ratio, round2};

/// Default trailing window length in days.
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Aggregated activity for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductivityTrend {
    /// The UTC calendar day this row describes.
    pub date: NaiveDate,
    /// Completed hours started on this day, two decimals.
    pub hours: f64,
    /// Completed entries started on this day.
    pub tasks_completed: usize,
    /// Hours per completed entry, two decimals. 0 on idle days.
    pub efficiency: f64,
}

/// Buckets completed entries into one row per UTC calendar day.
///
/// The window is midnight-aligned: exactly `days` consecutive days ending at
/// `now`'s date inclusive, oldest first. Idle days are emitted as all-zero
/// rows so the series never skips a day. `days == 0` yields an empty series.
///
/// `now` is a parameter rather than the wall clock so that callers control
/// the reference point and results stay reproducible.
#[must_use]
pub fn calculate_productivity_trends(
    entries: &[TimeEntry],
    days: u32,
    now: DateTime<Utc>,
) -> Vec<ProductivityTrend> {
    let mut by_day: HashMap<NaiveDate, (f64, usize)> = HashMap::new();
    for entry in entries {
        if let Some(minutes) = entry.duration_minutes {
            let bucket = by_day.entry(entry.start_time.date_naive()).or_insert((0.0, 0));
            bucket.0 += minutes;
            bucket.1 += 1;
        }
    }

    let today = now.date_naive();
    (0..days)
        .map(|i| {
            let date = today - Duration::days(i64::from(days - 1 - i));
            let (minutes, tasks_completed) = by_day.get(&date).copied().unwrap_or((0.0, 0));
            let hours = round2(minutes / 60.0);
            #[expect(
                clippy::cast_precision_loss,
                reason = "daily entry counts are far below f64 precision limits"
            )]
            let efficiency = round2(ratio(hours, tasks_completed as f64));
            ProductivityTrend {
                date,
                hours,
                tasks_completed,
                efficiency,
            }
        })
        .collect()
}
