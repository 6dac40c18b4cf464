//! Domain model for the task dashboard.
//!
//! # Responsibility
//! - Define tasks, projects and typed settings shared by every layer.
//! - Own submission validation (`NewTask`, `NewProject`).
//! - Keep calendar dates typed; ISO strings exist only at boundaries.
//!
//! # Invariants
//! - Every task and project is identified by a stable UUID.
//! - Titles and project names are never blank once constructed.

pub mod date;
pub mod project;
pub mod settings;
pub mod task;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failure for user-submitted records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is empty after trimming.
    EmptyTaskTitle,
    /// Project name is empty after trimming.
    EmptyProjectName,
    /// Project name used as a task reference is empty after trimming.
    EmptyTaskProject,
    /// Color is not a `#RGB` or `#RRGGBB` hex string.
    InvalidColor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTaskTitle => write!(f, "task title cannot be empty"),
            Self::EmptyProjectName => write!(f, "project name cannot be empty"),
            Self::EmptyTaskProject => write!(f, "task project cannot be empty"),
            Self::InvalidColor(value) => {
                write!(f, "invalid color `{value}`; expected #RGB or #RRGGBB")
            }
        }
    }
}

impl Error for ValidationError {}
