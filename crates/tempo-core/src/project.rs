//! Projects and their tasks.

use serde::{Deserialize, Serialize};

use crate::types::{Progress, ProjectId, TaskId};

/// A task within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier.
    pub id: TaskId,
    /// Short description of the work.
    pub title: String,
    /// Whether the task is done.
    #[serde(default)]
    pub completed: bool,
}

/// A project as supplied by the project store.
///
/// `progress` is the store's authoritative completion percentage; it is
/// carried through to metrics untouched rather than derived from `tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Completion percentage (0-100).
    #[serde(default)]
    pub progress: Progress,
    /// Tasks belonging to this project.
    #[serde(default)]
    pub tasks: Vec<Task>,
}
