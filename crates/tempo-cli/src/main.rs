use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use tempo_cli::commands::{
    export, import, insights, log, members, projects, report, status, timer, trends,
};
use tempo_cli::{Cli, Commands, Config, MembersAction, ProjectsAction, TimerAction};

/// Load config and open database, ensuring the parent directory exists.
fn open_database(config_path: Option<&Path>) -> Result<(tempo_db::Database, Config)> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent).context("failed to create database directory")?;
    }

    let db = tempo_db::Database::open(&config.database_path).context("failed to open database")?;
    Ok((db, config))
}

#[expect(
    clippy::too_many_lines,
    reason = "CLI command dispatch is inherently verbose"
)]
fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Status) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            let stdout = std::io::stdout();
            status::run(&mut stdout.lock(), &db, &config.database_path)?;
        }
        Some(Commands::Log {
            member,
            project,
            task,
            minutes,
            at,
        }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let entry = log::run(
                &mut db,
                member,
                project,
                task.as_deref(),
                *minutes,
                at.as_deref(),
            )?;
            println!("{}", entry.id);
        }
        Some(Commands::Timer { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                TimerAction::Start {
                    member,
                    project,
                    task,
                } => timer::start(&mut db, member, project, task.as_deref())?,
                TimerAction::Stop { member } => timer::stop(&mut db, member)?,
            }
        }
        Some(Commands::Import) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            let inserted = import::run(&mut db)?;
            println!("Imported {inserted} entries");
        }
        Some(Commands::Export) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            export::run(&db)?;
        }
        Some(Commands::Members { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                MembersAction::Add {
                    name,
                    email,
                    role,
                    id,
                    avatar_url,
                } => members::add(
                    &mut db,
                    name,
                    email,
                    role,
                    id.as_deref(),
                    avatar_url.clone(),
                )?,
                MembersAction::List { json } => members::list(&db, *json)?,
            }
        }
        Some(Commands::Projects { action }) => {
            let (mut db, _config) = open_database(cli.config.as_deref())?;
            match action {
                ProjectsAction::Add { name, id, progress } => {
                    projects::add(&mut db, name, id.as_deref(), *progress)?;
                }
                ProjectsAction::List { json } => projects::list(&db, *json)?,
                ProjectsAction::Progress { id, percent } => {
                    projects::progress(&mut db, id, *percent)?;
                }
            }
        }
        Some(Commands::Report {
            week: _,
            last_week,
            day,
            last_day,
            json,
        }) => {
            let (db, _config) = open_database(cli.config.as_deref())?;
            let period = if *last_week {
                report::Period::LastWeek
            } else if *day {
                report::Period::Day
            } else if *last_day {
                report::Period::LastDay
            } else {
                report::Period::Week
            };
            report::run(&db, period, *json)?;
        }
        Some(Commands::Trends { days, json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            trends::run(&db, days.unwrap_or(config.trend_days), *json)?;
        }
        Some(Commands::Insights { json }) => {
            let (db, config) = open_database(cli.config.as_deref())?;
            insights::run(&db, config.trend_days, *json)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
