//! Timer commands driving a running entry's lifecycle.
//!
//! A running timer is a time entry with no duration; it stays invisible to
//! aggregation until it is stopped and its duration recorded.

use anyhow::Result;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use tempo_core::{EntryId, MemberId, ProjectId, TaskId, TimeEntry};
use tempo_db::Database;

use super::report::format_hours;

/// Starts a running timer, stopping any previous one for the member.
pub fn start(db: &mut Database, member: &str, project: &str, task: Option<&str>) -> Result<()> {
    let user = MemberId::new(member)?;
    let now = Utc::now();

    for stopped in db.stop_running_entries(&user, now)? {
        let minutes = stopped.duration_minutes.unwrap_or_default();
        println!("Stopped {} ({})", stopped.id, format_hours(minutes / 60.0));
    }

    let entry = running_entry(&user, project, task, now)?;
    db.insert_entries(&[entry.clone()])?;
    println!("{}", entry.id);
    Ok(())
}

/// Stops the member's running timer and records its duration.
pub fn stop(db: &mut Database, member: &str) -> Result<()> {
    let user = MemberId::new(member)?;
    let stopped = db.stop_running_entries(&user, Utc::now())?;

    if stopped.is_empty() {
        println!("No running timer for {member}.");
        return Ok(());
    }
    for entry in stopped {
        let minutes = entry.duration_minutes.unwrap_or_default();
        println!("Stopped {} ({})", entry.id, format_hours(minutes / 60.0));
    }
    Ok(())
}

fn running_entry(
    user: &MemberId,
    project: &str,
    task: Option<&str>,
    now: DateTime<Utc>,
) -> Result<TimeEntry> {
    Ok(TimeEntry {
        id: EntryId::new(Uuid::new_v4().to_string())?,
        user_id: user.clone(),
        project_id: ProjectId::new(project)?,
        task_id: task.map(TaskId::new).transpose()?,
        start_time: now,
        end_time: None,
        duration_minutes: None,
        is_running: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_creates_a_running_entry() {
        let mut db = Database::open_in_memory().unwrap();

        start(&mut db, "user-1", "proj-1", None).unwrap();

        let user = MemberId::new("user-1").unwrap();
        let running = db.running_entry(&user).unwrap();
        assert!(running.is_some());
        assert!(running.unwrap().duration_minutes.is_none());
    }

    #[test]
    fn starting_again_stops_the_previous_timer() {
        let mut db = Database::open_in_memory().unwrap();

        start(&mut db, "user-1", "proj-1", None).unwrap();
        start(&mut db, "user-1", "proj-2", None).unwrap();

        let entries = db.list_entries().unwrap();
        assert_eq!(entries.len(), 2);
        let running: Vec<_> = entries.iter().filter(|e| e.is_running).collect();
        assert_eq!(running.len(), 1);
        assert_eq!(running[0].project_id.as_str(), "proj-2");
    }

    #[test]
    fn stop_completes_the_running_entry() {
        let mut db = Database::open_in_memory().unwrap();

        start(&mut db, "user-1", "proj-1", Some("task-1")).unwrap();
        stop(&mut db, "user-1").unwrap();

        let entries = db.list_entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_running);
        assert!(entries[0].duration_minutes.is_some());
        assert!(entries[0].end_time.is_some());
    }

    #[test]
    fn stop_without_a_timer_is_a_no_op() {
        let mut db = Database::open_in_memory().unwrap();

        stop(&mut db, "user-1").unwrap();
        assert!(db.list_entries().unwrap().is_empty());
    }
}
