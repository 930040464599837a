//! Team time analytics CLI library.
//!
//! This crate provides the CLI interface for tempo.

mod cli;
pub mod commands;
mod config;

pub use cli::{Cli, Commands, MembersAction, ProjectsAction, TimerAction};
pub use config::Config;
