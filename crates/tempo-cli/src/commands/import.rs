//! Import command for ingesting time entries into the local `SQLite` store.

use std::io::{self, BufRead};

use anyhow::{Context, Result};

use tempo_core::TimeEntry;
use tempo_db::Database;

/// Reads JSONL time entries from stdin and inserts them, deduplicating by ID.
///
/// Returns the number of newly inserted entries.
pub fn run(db: &mut Database) -> Result<usize> {
    let stdin = io::stdin();
    let entries = parse_entries(stdin.lock())?;
    let inserted = db.insert_entries(&entries)?;
    Ok(inserted)
}

fn parse_entries<R: BufRead>(reader: R) -> Result<Vec<TimeEntry>> {
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", idx + 1))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let entry: TimeEntry = serde_json::from_str(trimmed)
            .with_context(|| format!("invalid entry on line {}", idx + 1))?;
        entries.push(entry);
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    #[test]
    fn parse_entries_reads_jsonl() {
        let input = concat!(
            r#"{"id":"e1","user_id":"user-1","project_id":"proj-1","start_time":"2025-03-10T09:00:00Z","duration_minutes":60.0,"is_running":false}"#,
            "\n",
            r#"{"id":"e2","user_id":"user-1","project_id":"proj-1","start_time":"2025-03-10T11:00:00Z","is_running":true}"#,
        );
        let entries = parse_entries(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].duration_minutes, Some(60.0));
        assert!(entries[1].is_running);
    }

    #[test]
    fn parse_entries_skips_blank_lines() {
        let input = concat!(
            "\n",
            r#"{"id":"e1","user_id":"user-1","project_id":"proj-1","start_time":"2025-03-10T09:00:00Z","duration_minutes":60.0,"is_running":false}"#,
            "\n\n",
        );
        let entries = parse_entries(Cursor::new(input)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn parse_entries_reports_the_offending_line() {
        let input = "not json";
        let err = parse_entries(Cursor::new(input)).unwrap_err();
        assert!(err.to_string().contains("invalid entry on line 1"));
    }

    #[test]
    fn parse_entries_rejects_empty_ids() {
        let input = r#"{"id":"","user_id":"user-1","project_id":"proj-1","start_time":"2025-03-10T09:00:00Z","is_running":false}"#;
        assert!(parse_entries(Cursor::new(input)).is_err());
    }

    #[test]
    fn imported_entries_deduplicate_by_id() {
        let mut db = Database::open_in_memory().unwrap();
        let line = r#"{"id":"e1","user_id":"user-1","project_id":"proj-1","start_time":"2025-03-10T09:00:00Z","duration_minutes":60.0,"is_running":false}"#;
        let input = format!("{line}\n{line}\n");

        let entries = parse_entries(Cursor::new(input)).unwrap();
        let inserted = db.insert_entries(&entries).unwrap();
        assert_eq!(inserted, 1);
    }
}
