//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Team time analytics.
///
/// Records time entries against projects and aggregates them into member,
/// project, and team-wide metrics.
#[derive(Debug, Parser)]
#[command(name = "tempo", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show store health and recent activity.
    Status,

    /// Record a completed time entry.
    Log {
        /// The member the time belongs to.
        #[arg(long)]
        member: String,

        /// The project the time was spent on.
        #[arg(long)]
        project: String,

        /// The task within the project (optional).
        #[arg(long)]
        task: Option<String>,

        /// Duration in minutes.
        #[arg(long)]
        minutes: f64,

        /// Start timestamp (ISO 8601, e.g. 2025-03-10T09:00:00Z). Defaults to
        /// the duration ago from now.
        #[arg(long)]
        at: Option<String>,
    },

    /// Start or stop a running timer.
    Timer {
        #[command(subcommand)]
        action: TimerAction,
    },

    /// Import time entries as JSONL from stdin.
    Import,

    /// Export all time entries as JSONL to stdout.
    Export,

    /// Manage the member directory.
    Members {
        #[command(subcommand)]
        action: MembersAction,
    },

    /// Manage the project store.
    Projects {
        #[command(subcommand)]
        action: ProjectsAction,
    },

    /// Aggregate a period into member, project, and team metrics.
    Report {
        /// Report on the current week (default).
        #[arg(long)]
        week: bool,

        /// Report on the previous week.
        #[arg(long, conflicts_with = "week")]
        last_week: bool,

        /// Report on today.
        #[arg(long, conflicts_with_all = ["week", "last_week"])]
        day: bool,

        /// Report on yesterday.
        #[arg(long, conflicts_with_all = ["week", "last_week", "day"])]
        last_day: bool,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show daily productivity over a trailing window.
    Trends {
        /// Window length in days. Defaults to the configured trend window.
        #[arg(long)]
        days: Option<u32>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Derive team insights and recommendations.
    Insights {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Timer lifecycle actions.
#[derive(Debug, Subcommand)]
pub enum TimerAction {
    /// Start a running timer, stopping any previous one for the member.
    Start {
        /// The member starting the timer.
        #[arg(long)]
        member: String,

        /// The project being worked on.
        #[arg(long)]
        project: String,

        /// The task within the project (optional).
        #[arg(long)]
        task: Option<String>,
    },

    /// Stop the member's running timer and record its duration.
    Stop {
        /// The member whose timer to stop.
        #[arg(long)]
        member: String,
    },
}

/// Member directory actions.
#[derive(Debug, Subcommand)]
pub enum MembersAction {
    /// Add a member to the directory.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,

        /// Contact email.
        #[arg(long)]
        email: String,

        /// Role label (e.g. engineer, designer).
        #[arg(long, default_value = "member")]
        role: String,

        /// Explicit member ID. Generated when omitted.
        #[arg(long)]
        id: Option<String>,

        /// Avatar image URL.
        #[arg(long)]
        avatar_url: Option<String>,
    },

    /// List the member directory.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },
}

/// Project store actions.
#[derive(Debug, Subcommand)]
pub enum ProjectsAction {
    /// Add or update a project.
    Add {
        /// Display name.
        #[arg(long)]
        name: String,

        /// Explicit project ID. Generated when omitted.
        #[arg(long)]
        id: Option<String>,

        /// Completion percentage (0-100).
        #[arg(long, default_value_t = 0)]
        progress: i64,
    },

    /// List projects.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Update a project's completion percentage.
    Progress {
        /// The project ID.
        id: String,

        /// Completion percentage (0-100).
        percent: i64,
    },
}
