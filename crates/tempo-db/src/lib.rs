//! Storage layer for team time analytics.
//!
//! Provides persistence for team members, projects, and time entries using
//! `rusqlite`.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! This means a `Database` instance can be moved between threads but cannot be shared
//! across threads without external synchronization.
//!
//! For multi-threaded access, either:
//! - Use a `Mutex<Database>` to serialize access
//! - Create a connection pool (e.g., with `r2d2`)
//! - Use separate `Database` instances per thread
//!
//! # Schema
//!
//! ## Timestamp Format
//!
//! Timestamps are stored as TEXT in ISO 8601 format (e.g., `2024-01-15T10:30:00Z`).
//! This format is used by `chrono::DateTime<Utc>` serialization and ensures:
//! - Lexicographic ordering matches chronological ordering
//! - Human-readable values in the database
//! - Timezone-aware (always UTC)
//!
//! ## Referential Integrity
//!
//! Tasks cascade-delete with their project. Time entries deliberately carry no
//! foreign keys: logged history survives a member or project being removed
//! from the directory, and the metrics layer resolves missing projects to a
//! fallback name.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use tempo_core::{
    EntryId, MemberId, Progress, Project, ProjectId, Task, TaskId, TeamMember, TimeEntry,
};

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    /// Failed to parse a stored timestamp.
    #[error("invalid timestamp for {id}: {timestamp}")]
    TimestampParse {
        id: String,
        timestamp: String,
        #[source]
        source: chrono::ParseError,
    },
    /// A stored row does not map back onto a valid domain value.
    #[error("invalid row {id}: {message}")]
    InvalidRow { id: String, message: String },
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

/// Latest entry timestamp grouped by member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberLastEntry {
    pub member_id: MemberId,
    pub last_entry: DateTime<Utc>,
}

/// Row counts across the store, used by the status surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCounts {
    pub members: usize,
    pub projects: usize,
    pub entries: usize,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS members (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                avatar_url TEXT,
                role TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS projects (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                progress INTEGER NOT NULL DEFAULT 0
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id TEXT PRIMARY KEY,
                project_id TEXT NOT NULL,
                title TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                FOREIGN KEY (project_id) REFERENCES projects(id) ON DELETE CASCADE
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);

            -- Time entries: start_time/end_time are ISO 8601 UTC text,
            -- duration_minutes is NULL while the timer runs
            CREATE TABLE IF NOT EXISTS time_entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                project_id TEXT NOT NULL,
                task_id TEXT,
                start_time TEXT NOT NULL,
                end_time TEXT,
                duration_minutes REAL,
                is_running INTEGER NOT NULL DEFAULT 0
            );

            CREATE INDEX IF NOT EXISTS idx_entries_start ON time_entries(start_time);
            CREATE INDEX IF NOT EXISTS idx_entries_user ON time_entries(user_id);
            CREATE INDEX IF NOT EXISTS idx_entries_project ON time_entries(project_id);
            ",
        )?;
        Ok(())
    }

    /// Inserts a batch of members, ignoring duplicates by ID.
    pub fn insert_members(&mut self, members: &[TeamMember]) -> Result<usize, DbError> {
        if members.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO members (id, name, email, avatar_url, role)
                VALUES (?, ?, ?, ?, ?)
                ",
            )?;
            for member in members {
                inserted += stmt.execute(params![
                    member.id.as_str(),
                    member.name,
                    member.email,
                    member.avatar_url,
                    member.role,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Lists all members ordered by name then ID.
    pub fn list_members(&self) -> Result<Vec<TeamMember>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, name, email, avatar_url, role
            FROM members
            ORDER BY name ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(MemberRow {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                avatar_url: row.get(3)?,
                role: row.get(4)?,
            })
        })?;
        let mut members = Vec::new();
        for row in rows {
            members.push(row?.into_member()?);
        }
        Ok(members)
    }

    /// Inserts or updates a project and replaces its task list.
    pub fn upsert_project(&mut self, project: &Project) -> Result<(), DbError> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "
            INSERT INTO projects (id, name, progress)
            VALUES (?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                progress = excluded.progress
            ",
            params![
                project.id.as_str(),
                project.name,
                i64::from(project.progress.value()),
            ],
        )?;
        tx.execute(
            "DELETE FROM tasks WHERE project_id = ?",
            [project.id.as_str()],
        )?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (id, project_id, title, completed) VALUES (?, ?, ?, ?)",
            )?;
            for task in &project.tasks {
                stmt.execute(params![
                    task.id.as_str(),
                    project.id.as_str(),
                    task.title,
                    task.completed,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    /// Updates a project's completion percentage.
    ///
    /// Returns whether a project with that ID existed.
    pub fn set_project_progress(
        &mut self,
        project_id: &ProjectId,
        progress: Progress,
    ) -> Result<bool, DbError> {
        let updated = self.conn.execute(
            "UPDATE projects SET progress = ? WHERE id = ?",
            params![i64::from(progress.value()), project_id.as_str()],
        )?;
        Ok(updated > 0)
    }

    /// Lists all projects with their tasks, ordered by name then ID.
    pub fn list_projects(&self) -> Result<Vec<Project>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, project_id, title, completed
            FROM tasks
            ORDER BY project_id ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(TaskRow {
                id: row.get(0)?,
                project_id: row.get(1)?,
                title: row.get(2)?,
                completed: row.get(3)?,
            })
        })?;
        let mut tasks_by_project: HashMap<String, Vec<Task>> = HashMap::new();
        for row in rows {
            let row = row?;
            let project_id = row.project_id.clone();
            tasks_by_project
                .entry(project_id)
                .or_default()
                .push(row.into_task()?);
        }

        let mut stmt = self.conn.prepare(
            "
            SELECT id, name, progress
            FROM projects
            ORDER BY name ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ProjectRow {
                id: row.get(0)?,
                name: row.get(1)?,
                progress: row.get(2)?,
            })
        })?;
        let mut projects = Vec::new();
        for row in rows {
            let row = row?;
            let tasks = tasks_by_project.remove(&row.id).unwrap_or_default();
            projects.push(row.into_project(tasks)?);
        }
        Ok(projects)
    }

    /// Inserts a batch of time entries, ignoring duplicates by ID.
    pub fn insert_entries(&mut self, entries: &[TimeEntry]) -> Result<usize, DbError> {
        if entries.is_empty() {
            return Ok(0);
        }
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "
                INSERT OR IGNORE INTO time_entries
                (id, user_id, project_id, task_id, start_time, end_time, duration_minutes, is_running)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ",
            )?;
            for entry in entries {
                inserted += stmt.execute(params![
                    entry.id.as_str(),
                    entry.user_id.as_str(),
                    entry.project_id.as_str(),
                    entry.task_id.as_ref().map(TaskId::as_str),
                    format_timestamp(entry.start_time),
                    entry.end_time.map(format_timestamp),
                    entry.duration_minutes,
                    entry.is_running,
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Lists all time entries ordered by start time then ID.
    pub fn list_entries(&self) -> Result<Vec<TimeEntry>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, project_id, task_id, start_time, end_time, duration_minutes, is_running
            FROM time_entries
            ORDER BY start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([], entry_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    /// Lists time entries whose start time falls within a range.
    ///
    /// The range is inclusive of `start` and exclusive of `end`.
    pub fn list_entries_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, DbError> {
        if end <= start {
            return Ok(Vec::new());
        }
        let start = format_timestamp(start);
        let end = format_timestamp(end);
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, project_id, task_id, start_time, end_time, duration_minutes, is_running
            FROM time_entries
            WHERE start_time >= ? AND start_time < ?
            ORDER BY start_time ASC, id ASC
            ",
        )?;
        let rows = stmt.query_map([start, end], entry_row)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?.into_entry()?);
        }
        Ok(entries)
    }

    /// Returns the member's currently running entry, if any.
    ///
    /// Starting a timer stops the previous one, so at most one entry per
    /// member should be running; if stale data violates that, the
    /// earliest-started entry is returned.
    pub fn running_entry(&self, user: &MemberId) -> Result<Option<TimeEntry>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT id, user_id, project_id, task_id, start_time, end_time, duration_minutes, is_running
            FROM time_entries
            WHERE user_id = ? AND is_running = 1
            ORDER BY start_time ASC, id ASC
            LIMIT 1
            ",
        )?;
        let row = stmt.query_row([user.as_str()], entry_row).optional()?;
        row.map(EntryRow::into_entry).transpose()
    }

    /// Completes all running timers for a member.
    ///
    /// Sets `end_time` to `now`, derives `duration_minutes` from the elapsed
    /// span (clamped at zero for clock skew), and clears the running flag.
    /// Returns the completed entries.
    pub fn stop_running_entries(
        &mut self,
        user: &MemberId,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeEntry>, DbError> {
        let running = {
            let mut stmt = self.conn.prepare(
                "
                SELECT id, user_id, project_id, task_id, start_time, end_time, duration_minutes, is_running
                FROM time_entries
                WHERE user_id = ? AND is_running = 1
                ORDER BY start_time ASC, id ASC
                ",
            )?;
            let rows = stmt.query_map([user.as_str()], entry_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?.into_entry()?);
            }
            entries
        };
        if running.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.conn.transaction()?;
        let mut stopped = Vec::with_capacity(running.len());
        {
            let mut stmt = tx.prepare(
                "
                UPDATE time_entries
                SET end_time = ?, duration_minutes = ?, is_running = 0
                WHERE id = ?
                ",
            )?;
            for mut entry in running {
                #[expect(
                    clippy::cast_precision_loss,
                    reason = "elapsed spans are far below f64 precision limits"
                )]
                let minutes = (now.signed_duration_since(entry.start_time).num_milliseconds()
                    as f64
                    / 60_000.0)
                    .max(0.0);
                stmt.execute(params![format_timestamp(now), minutes, entry.id.as_str()])?;
                entry.end_time = Some(now);
                entry.duration_minutes = Some(minutes);
                entry.is_running = false;
                stopped.push(entry);
            }
        }
        tx.commit()?;
        Ok(stopped)
    }

    /// Lists the last entry start time per member, ordered by most recent.
    pub fn last_entry_times_by_member(&self) -> Result<Vec<MemberLastEntry>, DbError> {
        let mut stmt = self.conn.prepare(
            "
            SELECT user_id, MAX(start_time) AS last_entry
            FROM time_entries
            GROUP BY user_id
            ORDER BY last_entry DESC, user_id ASC
            ",
        )?;
        let rows = stmt.query_map([], |row| {
            let member_id: String = row.get(0)?;
            let last_entry: String = row.get(1)?;
            Ok((member_id, last_entry))
        })?;
        let mut members = Vec::new();
        for row in rows {
            let (member_id, last_entry) = row?;
            let parsed = parse_timestamp(&last_entry, &member_id)?;
            let member_id =
                MemberId::new(member_id.clone()).map_err(|err| invalid_row(&member_id, &err))?;
            members.push(MemberLastEntry {
                member_id,
                last_entry: parsed,
            });
        }
        Ok(members)
    }

    /// Returns row counts for the status surface.
    pub fn counts(&self) -> Result<StoreCounts, DbError> {
        let count = |table: &str| -> Result<usize, DbError> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                    row.get(0)
                })?;
            Ok(usize::try_from(n).unwrap_or_default())
        };
        Ok(StoreCounts {
            members: count("members")?,
            projects: count("projects")?,
            entries: count("time_entries")?,
        })
    }
}

#[derive(Debug)]
struct MemberRow {
    id: String,
    name: String,
    email: String,
    avatar_url: Option<String>,
    role: String,
}

impl MemberRow {
    fn into_member(self) -> Result<TeamMember, DbError> {
        let id = MemberId::new(self.id.clone()).map_err(|err| invalid_row(&self.id, &err))?;
        Ok(TeamMember {
            id,
            name: self.name,
            email: self.email,
            avatar_url: self.avatar_url,
            role: self.role,
        })
    }
}

#[derive(Debug)]
struct ProjectRow {
    id: String,
    name: String,
    progress: i64,
}

impl ProjectRow {
    fn into_project(self, tasks: Vec<Task>) -> Result<Project, DbError> {
        let id = ProjectId::new(self.id.clone()).map_err(|err| invalid_row(&self.id, &err))?;
        Ok(Project {
            id,
            name: self.name,
            progress: Progress::clamped(self.progress),
            tasks,
        })
    }
}

#[derive(Debug)]
struct TaskRow {
    id: String,
    project_id: String,
    title: String,
    completed: bool,
}

impl TaskRow {
    fn into_task(self) -> Result<Task, DbError> {
        let id = TaskId::new(self.id.clone()).map_err(|err| invalid_row(&self.id, &err))?;
        Ok(Task {
            id,
            title: self.title,
            completed: self.completed,
        })
    }
}

#[derive(Debug)]
struct EntryRow {
    id: String,
    user_id: String,
    project_id: String,
    task_id: Option<String>,
    start_time: String,
    end_time: Option<String>,
    duration_minutes: Option<f64>,
    is_running: bool,
}

fn entry_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<EntryRow> {
    Ok(EntryRow {
        id: row.get(0)?,
        user_id: row.get(1)?,
        project_id: row.get(2)?,
        task_id: row.get(3)?,
        start_time: row.get(4)?,
        end_time: row.get(5)?,
        duration_minutes: row.get(6)?,
        is_running: row.get(7)?,
    })
}

impl EntryRow {
    fn into_entry(self) -> Result<TimeEntry, DbError> {
        let start_time = parse_timestamp(&self.start_time, &self.id)?;
        let end_time = self
            .end_time
            .as_deref()
            .map(|ts| parse_timestamp(ts, &self.id))
            .transpose()?;
        let id = EntryId::new(self.id.clone()).map_err(|err| invalid_row(&self.id, &err))?;
        let user_id = MemberId::new(self.user_id).map_err(|err| invalid_row(id.as_str(), &err))?;
        let project_id =
            ProjectId::new(self.project_id).map_err(|err| invalid_row(id.as_str(), &err))?;
        let task_id = self
            .task_id
            .map(TaskId::new)
            .transpose()
            .map_err(|err| invalid_row(id.as_str(), &err))?;
        Ok(TimeEntry {
            id,
            user_id,
            project_id,
            task_id,
            start_time,
            end_time,
            duration_minutes: self.duration_minutes,
            is_running: self.is_running,
        })
    }
}

fn invalid_row(id: &str, err: &tempo_core::ValidationError) -> DbError {
    DbError::InvalidRow {
        id: id.to_string(),
        message: err.to_string(),
    }
}

fn parse_timestamp(timestamp: &str, id: &str) -> Result<DateTime<Utc>, DbError> {
    DateTime::parse_from_rfc3339(timestamp)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|source| DbError::TimestampParse {
            id: id.to_string(),
            timestamp: timestamp.to_string(),
            source,
        })
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    fn member(id: &str, name: &str) -> TeamMember {
        TeamMember {
            id: MemberId::new(id).unwrap(),
            name: name.to_string(),
            email: format!("{id}@example.com"),
            avatar_url: None,
            role: "engineer".to_string(),
        }
    }

    fn project(id: &str, name: &str, progress: i64, tasks: Vec<Task>) -> Project {
        Project {
            id: ProjectId::new(id).unwrap(),
            name: name.to_string(),
            progress: Progress::clamped(progress),
            tasks,
        }
    }

    fn task(id: &str, title: &str, completed: bool) -> Task {
        Task {
            id: TaskId::new(id).unwrap(),
            title: title.to_string(),
            completed,
        }
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "test durations are small whole minutes"
    )]
    fn entry(id: &str, user: &str, start: DateTime<Utc>, minutes: Option<f64>) -> TimeEntry {
        TimeEntry {
            id: EntryId::new(id).unwrap(),
            user_id: MemberId::new(user).unwrap(),
            project_id: ProjectId::new("proj-1").unwrap(),
            task_id: None,
            start_time: start,
            end_time: minutes.map(|m| start + chrono::Duration::minutes(m as i64)),
            duration_minutes: minutes,
            is_running: minutes.is_none(),
        }
    }

    fn ts(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }

    #[test]
    fn open_in_memory_database() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn schema_matches_data_model() {
        let db = Database::open_in_memory().expect("open in-memory db");

        assert_eq!(
            table_columns(&db.conn, "members"),
            vec!["id", "name", "email", "avatar_url", "role"]
        );
        assert_eq!(
            table_columns(&db.conn, "projects"),
            vec!["id", "name", "progress"]
        );
        assert_eq!(
            table_columns(&db.conn, "tasks"),
            vec!["id", "project_id", "title", "completed"]
        );
        assert_eq!(
            table_columns(&db.conn, "time_entries"),
            vec![
                "id",
                "user_id",
                "project_id",
                "task_id",
                "start_time",
                "end_time",
                "duration_minutes",
                "is_running",
            ]
        );
    }

    fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
        let mut stmt = conn
            .prepare(&format!("PRAGMA table_info({table})"))
            .expect("prepare table_info");
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(1))
            .expect("query table_info");
        rows.map(|row| row.expect("table_info row")).collect()
    }

    #[test]
    fn insert_members_is_idempotent() {
        let mut db = Database::open_in_memory().unwrap();
        let ada = member("user-1", "Ada");

        let inserted = db.insert_members(&[ada.clone(), ada]).unwrap();
        assert_eq!(inserted, 1);

        let members = db.list_members().unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Ada");
    }

    #[test]
    fn list_members_orders_by_name() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_members(&[member("user-2", "Grace"), member("user-1", "Ada")])
            .unwrap();

        let members = db.list_members().unwrap();
        let names: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Grace"]);
    }

    #[test]
    fn upsert_project_replaces_tasks() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert_project(&project(
            "proj-1",
            "Alpha",
            20,
            vec![task("task-1", "Draft", false)],
        ))
        .unwrap();
        db.upsert_project(&project(
            "proj-1",
            "Alpha v2",
            60,
            vec![
                task("task-2", "Review", false),
                task("task-3", "Ship", false),
            ],
        ))
        .unwrap();

        let projects = db.list_projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Alpha v2");
        assert_eq!(projects[0].progress.value(), 60);
        let titles: Vec<&str> = projects[0]
            .tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Review", "Ship"]);
    }

    #[test]
    fn set_project_progress_reports_missing_projects() {
        let mut db = Database::open_in_memory().unwrap();
        db.upsert_project(&project("proj-1", "Alpha", 10, vec![]))
            .unwrap();

        let updated = db
            .set_project_progress(&ProjectId::new("proj-1").unwrap(), Progress::clamped(75))
            .unwrap();
        assert!(updated);
        assert_eq!(db.list_projects().unwrap()[0].progress.value(), 75);

        let missing = db
            .set_project_progress(&ProjectId::new("ghost").unwrap(), Progress::clamped(10))
            .unwrap();
        assert!(!missing);
    }

    #[test]
    fn insert_entries_is_idempotent() {
        let mut db = Database::open_in_memory().unwrap();
        let e = entry("e1", "user-1", ts(9, 0), Some(60.0));

        let inserted = db.insert_entries(&[e.clone(), e]).unwrap();
        assert_eq!(inserted, 1);
        assert_eq!(db.list_entries().unwrap().len(), 1);
    }

    #[test]
    fn list_entries_returns_ordered_rows() {
        let mut db = Database::open_in_memory().unwrap();
        let first = entry("e1", "user-1", ts(9, 0), Some(60.0));
        let second = entry("e2", "user-1", ts(11, 0), Some(30.0));
        db.insert_entries(&[second.clone(), first.clone()]).unwrap();

        let entries = db.list_entries().unwrap();
        assert_eq!(entries, vec![first, second]);
    }

    #[test]
    fn list_entries_in_range_is_half_open() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[
            entry("e1", "user-1", ts(8, 0), Some(60.0)),
            entry("e2", "user-1", ts(10, 0), Some(60.0)),
            entry("e3", "user-1", ts(12, 0), Some(60.0)),
        ])
        .unwrap();

        let entries = db.list_entries_in_range(ts(10, 0), ts(12, 0)).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["e2"]);
    }

    #[test]
    fn list_entries_in_range_rejects_inverted_range() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[entry("e1", "user-1", ts(9, 0), Some(60.0))])
            .unwrap();

        let entries = db.list_entries_in_range(ts(12, 0), ts(10, 0)).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn stop_running_entries_derives_duration_from_span() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[entry("e1", "user-1", ts(9, 0), None)])
            .unwrap();

        let stopped = db
            .stop_running_entries(&MemberId::new("user-1").unwrap(), ts(10, 30))
            .unwrap();
        assert_eq!(stopped.len(), 1);
        assert_eq!(stopped[0].duration_minutes, Some(90.0));
        assert!(!stopped[0].is_running);
        assert_eq!(stopped[0].end_time, Some(ts(10, 30)));

        // The update is persisted, not just returned
        let entries = db.list_entries().unwrap();
        assert_eq!(entries[0].duration_minutes, Some(90.0));
        assert!(!entries[0].is_running);
    }

    #[test]
    fn stop_running_entries_only_touches_that_member() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[
            entry("e1", "user-1", ts(9, 0), None),
            entry("e2", "user-2", ts(9, 0), None),
        ])
        .unwrap();

        db.stop_running_entries(&MemberId::new("user-1").unwrap(), ts(10, 0))
            .unwrap();

        let other = db.running_entry(&MemberId::new("user-2").unwrap()).unwrap();
        assert!(other.is_some());
    }

    #[test]
    fn stop_running_entries_clamps_negative_spans() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[entry("e1", "user-1", ts(9, 0), None)])
            .unwrap();

        let stopped = db
            .stop_running_entries(&MemberId::new("user-1").unwrap(), ts(8, 0))
            .unwrap();
        assert_eq!(stopped[0].duration_minutes, Some(0.0));
    }

    #[test]
    fn running_entry_ignores_completed_entries() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[entry("e1", "user-1", ts(9, 0), Some(60.0))])
            .unwrap();

        let running = db.running_entry(&MemberId::new("user-1").unwrap()).unwrap();
        assert!(running.is_none());
    }

    #[test]
    fn last_entry_times_by_member_returns_latest_per_member() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_entries(&[
            entry("e1", "user-1", ts(9, 0), Some(60.0)),
            entry("e2", "user-1", ts(14, 0), Some(60.0)),
            entry("e3", "user-2", ts(11, 0), Some(60.0)),
        ])
        .unwrap();

        let last = db.last_entry_times_by_member().unwrap();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].member_id.as_str(), "user-1");
        assert_eq!(last[0].last_entry, ts(14, 0));
        assert_eq!(last[1].member_id.as_str(), "user-2");
    }

    #[test]
    fn counts_cover_all_tables() {
        let mut db = Database::open_in_memory().unwrap();
        db.insert_members(&[member("user-1", "Ada")]).unwrap();
        db.upsert_project(&project("proj-1", "Alpha", 0, vec![]))
            .unwrap();
        db.insert_entries(&[
            entry("e1", "user-1", ts(9, 0), Some(60.0)),
            entry("e2", "user-1", ts(10, 0), None),
        ])
        .unwrap();

        let counts = db.counts().unwrap();
        assert_eq!(
            counts,
            StoreCounts {
                members: 1,
                projects: 1,
                entries: 2,
            }
        );
    }

    #[test]
    fn data_survives_reopen() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("tempo.db");

        {
            let mut db = Database::open(&path).unwrap();
            db.insert_members(&[member("user-1", "Ada")]).unwrap();
            db.insert_entries(&[entry("e1", "user-1", ts(9, 0), Some(45.5))])
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.list_members().unwrap().len(), 1);
        let entries = db.list_entries().unwrap();
        assert_eq!(entries[0].duration_minutes, Some(45.5));
    }

    #[test]
    fn malformed_timestamp_surfaces_offending_id() {
        let db = Database::open_in_memory().unwrap();
        db.conn
            .execute(
                "
                INSERT INTO time_entries (id, user_id, project_id, start_time, is_running)
                VALUES ('bad-entry', 'user-1', 'proj-1', 'not-a-timestamp', 0)
                ",
                [],
            )
            .unwrap();

        let err = db.list_entries().unwrap_err();
        match err {
            DbError::TimestampParse { id, .. } => assert_eq!(id, "bad-entry"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
