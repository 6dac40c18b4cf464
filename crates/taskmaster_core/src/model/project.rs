//! Project domain model.
//!
//! # Responsibility
//! - Define project records listed in the dashboard sidebar.
//! - Provide the seed project list for a fresh dashboard.
//!
//! # Invariants
//! - `name` is trimmed and non-empty; it is the filtering key for tasks.
//! - `task_count` is a display seed only: it starts at 0 and is never
//!   maintained. Real counts come from the aggregator.

use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

static HEX_COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("valid hex color regex")
});

/// Stable identifier for a project.
pub type ProjectId = Uuid;

/// Palette offered when creating a project; the first entry is preselected.
pub const PROJECT_COLORS: [&str; 8] = [
    "#EF4444", "#F97316", "#EAB308", "#22C55E", "#3B82F6", "#8B5CF6", "#EC4899", "#6B7280",
];

/// Color used when a submission does not pick one.
pub const DEFAULT_PROJECT_COLOR: &str = PROJECT_COLORS[0];

const SEED_PROJECTS: &[(&str, &str, &str)] = &[
    ("Work", "#3B82F6", "Work-related tasks"),
    ("Personal", "#10B981", "Personal tasks and goals"),
    ("Shopping", "#F59E0B", "Shopping lists and errands"),
    ("Health", "#EF4444", "Health and fitness goals"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    /// Hex color, `#RGB` or `#RRGGBB`.
    pub color: String,
    pub task_count: u32,
}

/// Submission shape for the create-project dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

impl NewProject {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            color: DEFAULT_PROJECT_COLOR.to_string(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

impl Project {
    /// Builds a project from a submission with a freshly generated id.
    ///
    /// Blank descriptions collapse to `None`.
    pub fn create(new_project: NewProject) -> Result<Self, ValidationError> {
        let description = new_project
            .description
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());

        let project = Self {
            id: Uuid::new_v4(),
            name: new_project.name.trim().to_string(),
            description,
            color: new_project.color.trim().to_string(),
            task_count: 0,
        };
        project.validate()?;
        Ok(project)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyProjectName);
        }
        if !is_hex_color(&self.color) {
            return Err(ValidationError::InvalidColor(self.color.clone()));
        }
        Ok(())
    }
}

/// Returns the projects a fresh dashboard starts with.
pub fn seed_projects() -> Vec<Project> {
    SEED_PROJECTS
        .iter()
        .map(|(name, color, description)| Project {
            id: Uuid::new_v4(),
            name: (*name).to_string(),
            description: Some((*description).to_string()),
            color: (*color).to_string(),
            task_count: 0,
        })
        .collect()
}

/// Whether `value` is a `#RGB` or `#RRGGBB` hex color.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR_RE.is_match(value)
}
