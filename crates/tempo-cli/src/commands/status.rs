//! Status command for store health and recent activity.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use chrono::SecondsFormat;

use tempo_db::Database;

pub fn run<W: Write>(writer: &mut W, db: &Database, database_path: &Path) -> Result<()> {
    let counts = db.counts()?;
    let members = db.list_members()?;
    let last_entries = db.last_entry_times_by_member()?;

    writeln!(writer, "Tempo status")?;
    writeln!(writer, "Database: {}", database_path.display())?;
    writeln!(
        writer,
        "Members: {}  Projects: {}  Entries: {}",
        counts.members, counts.projects, counts.entries
    )?;

    if last_entries.is_empty() {
        writeln!(writer, "No time entries recorded.")?;
        return Ok(());
    }

    let names: HashMap<&str, &str> = members
        .iter()
        .map(|m| (m.id.as_str(), m.name.as_str()))
        .collect();

    writeln!(writer, "Last activity:")?;
    for last in last_entries {
        // Fall back to the raw ID for entries from members no longer listed
        let name = names
            .get(last.member_id.as_str())
            .copied()
            .unwrap_or_else(|| last.member_id.as_str());
        writeln!(
            writer,
            "- {}: {}",
            name,
            last.last_entry.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
    }

    Ok(())
}
