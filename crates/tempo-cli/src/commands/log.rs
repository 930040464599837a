//! Log command for recording completed time entries.

use anyhow::{Context, Result, ensure};
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use tempo_core::{EntryId, MemberId, ProjectId, TaskId, TimeEntry};
use tempo_db::Database;

/// Records a completed entry and returns it.
///
/// With no `--at` timestamp the entry is backdated so that it ends now.
#[expect(
    clippy::cast_possible_truncation,
    reason = "durations are bounded well below i64 milliseconds"
)]
pub fn run(
    db: &mut Database,
    member: &str,
    project: &str,
    task: Option<&str>,
    minutes: f64,
    at: Option<&str>,
) -> Result<TimeEntry> {
    ensure!(
        minutes > 0.0 && minutes.is_finite(),
        "minutes must be a positive number"
    );

    let span = Duration::milliseconds((minutes * 60_000.0) as i64);
    let start_time = match at {
        Some(raw) => parse_start(raw)?,
        None => Utc::now() - span,
    };

    let entry = TimeEntry {
        id: EntryId::new(Uuid::new_v4().to_string())?,
        user_id: MemberId::new(member)?,
        project_id: ProjectId::new(project)?,
        task_id: task.map(TaskId::new).transpose()?,
        start_time,
        end_time: Some(start_time + span),
        duration_minutes: Some(minutes),
        is_running: false,
    };
    db.insert_entries(&[entry.clone()])?;
    tracing::debug!(id = %entry.id, minutes, "logged entry");
    Ok(entry)
}

fn parse_start(raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .with_context(|| {
            format!("invalid --at timestamp {raw:?}, expected ISO 8601 (e.g., 2025-03-10T09:00:00Z)")
        })
}
