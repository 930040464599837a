//! Project store commands.

use std::fmt::Write as _;

use anyhow::{Result, bail};
use uuid::Uuid;

use tempo_core::{Progress, Project, ProjectId};
use tempo_db::Database;

use super::report::progress_bar;

/// Adds or updates a project, generating an ID when none is given.
pub fn add(db: &mut Database, name: &str, id: Option<&str>, progress: i64) -> Result<()> {
    let id = match id {
        Some(raw) => ProjectId::new(raw)?,
        None => ProjectId::new(Uuid::new_v4().to_string())?,
    };
    let project = Project {
        id: id.clone(),
        name: name.to_string(),
        progress: Progress::new(progress)?,
        tasks: vec![],
    };

    db.upsert_project(&project)?;
    println!("{id}");
    Ok(())
}

/// Lists the project store.
pub fn list(db: &Database, json: bool) -> Result<()> {
    let projects = db.list_projects()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
    } else {
        print!("{}", format_projects(&projects));
    }
    Ok(())
}

/// Updates a project's completion percentage.
pub fn progress(db: &mut Database, id: &str, percent: i64) -> Result<()> {
    let project_id = ProjectId::new(id)?;
    let progress = Progress::new(percent)?;

    if !db.set_project_progress(&project_id, progress)? {
        bail!("no project with id {id}");
    }
    println!("{project_id} -> {progress}");
    Ok(())
}

fn format_projects(projects: &[Project]) -> String {
    let mut output = String::new();

    if projects.is_empty() {
        writeln!(output, "No projects in the store.").unwrap();
        writeln!(output).unwrap();
        writeln!(
            output,
            "Hint: Run 'tempo projects add --name <name>' to create one."
        )
        .unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<10}  {:<22}  {:>8}  {:<10}  Tasks",
        "ID", "Name", "Progress", ""
    )
    .unwrap();
    writeln!(
        output,
        "──────────  ──────────────────────  ────────  ──────────  ─────"
    )
    .unwrap();
    for project in projects {
        let id_short: String = project.id.as_str().chars().take(10).collect();
        let pct = project.progress.to_string();
        let bar = progress_bar(f64::from(project.progress.value()), 100.0);
        writeln!(
            output,
            "{:<10}  {:<22}  {:>8}  {:<10}  {}",
            id_short,
            project.name,
            pct,
            bar,
            project.tasks.len()
        )
        .unwrap();
    }

    output
}
