//! Implementation of the `tempo export` command.
//!
//! Outputs all stored time entries as JSONL to stdout, oldest first, suitable
//! for piping into `tempo import` elsewhere.

use std::io::{BufWriter, Write, stdout};

use anyhow::{Context, Result};

use tempo_core::TimeEntry;
use tempo_db::Database;

/// Runs the export command.
pub fn run(db: &Database) -> Result<()> {
    let entries = db.list_entries()?;
    let stdout = stdout();
    let mut writer = BufWriter::new(stdout.lock());
    write_entries(&mut writer, &entries)
}

fn write_entries<W: Write>(writer: &mut W, entries: &[TimeEntry]) -> Result<()> {
    for entry in entries {
        serde_json::to_writer(&mut *writer, entry).context("failed to serialize entry")?;
        // Handle broken pipe gracefully (e.g., when piped to `head`)
        if writeln!(writer).is_err() {
            break;
        }
    }
    Ok(())
}
