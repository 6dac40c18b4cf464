//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record rendered by every dashboard view.
//! - Provide creation and completion-toggle helpers.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is trimmed and non-empty.
//! - New tasks always start with `completed = false`.
//! - `project` is a name reference only; no project needs to exist for it.

use super::ValidationError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
pub type TaskId = Uuid;

/// Task priority flag shown next to the title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[default]
    None,
    Low,
    Medium,
    High,
}

impl Priority {
    /// Stable lowercase name used in storage and CLI input.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parses the stable lowercase name (case-insensitive).
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "none" => Some(Self::None),
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    /// Serialized as `YYYY-MM-DD`.
    pub due_date: Option<NaiveDate>,
    /// Name of the project this task is filed under.
    pub project: String,
}

/// Submission shape for the add-task form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub project: String,
}

impl NewTask {
    /// Creates a submission with no priority and no due date.
    pub fn new(title: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            priority: Priority::None,
            due_date: None,
            project: project.into(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = due_date;
        self
    }
}

impl Task {
    /// Builds a new open task with a freshly generated id.
    ///
    /// # Errors
    /// - `EmptyTaskTitle` when the title is blank after trimming.
    /// - `EmptyTaskProject` when the project name is blank after trimming.
    pub fn create(new_task: NewTask) -> Result<Self, ValidationError> {
        let task = Self {
            id: Uuid::new_v4(),
            title: new_task.title.trim().to_string(),
            completed: false,
            priority: new_task.priority,
            due_date: new_task.due_date,
            project: new_task.project.trim().to_string(),
        };
        task.validate()?;
        Ok(task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::EmptyTaskTitle);
        }
        if self.project.trim().is_empty() {
            return Err(ValidationError::EmptyTaskProject);
        }
        Ok(())
    }

    /// Flips the completion flag.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Whether the task still counts as outstanding work.
    pub fn is_open(&self) -> bool {
        !self.completed
    }

    /// Whether the task is due exactly on `date`. Undated tasks never are.
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        self.due_date == Some(date)
    }

    /// Whether the task is due strictly after `date`. Undated tasks never are.
    pub fn is_due_after(&self, date: NaiveDate) -> bool {
        self.due_date.is_some_and(|due| due > date)
    }

    /// Case-insensitive substring match against the title.
    ///
    /// `needle_lower` must already be lowercased.
    pub(crate) fn title_contains_lower(&self, needle_lower: &str) -> bool {
        self.title.to_lowercase().contains(needle_lower)
    }
}

#[cfg(test)]
mod tests {
    use super::{NewTask, Priority, Task};
    use crate::model::ValidationError;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn create_trims_and_starts_open() {
        let task = Task::create(NewTask::new("  Buy milk ", " Personal")).unwrap();
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.project, "Personal");
        assert!(!task.completed);
        assert_eq!(task.priority, Priority::None);
    }

    #[test]
    fn create_rejects_blank_title() {
        let err = Task::create(NewTask::new("   ", "Work")).unwrap_err();
        assert_eq!(err, ValidationError::EmptyTaskTitle);
    }

    #[test]
    fn due_checks_ignore_undated_tasks() {
        let today = date(2024, 9, 25);
        let undated = Task::create(NewTask::new("x", "Work")).unwrap();
        assert!(!undated.is_due_on(today));
        assert!(!undated.is_due_after(today));

        let later = Task::create(NewTask::new("y", "Work").with_due_date(Some(date(2024, 9, 26))))
            .unwrap();
        assert!(later.is_due_after(today));
        assert!(!later.is_due_on(today));
    }

    #[test]
    fn priority_parse_is_case_insensitive() {
        assert_eq!(Priority::parse("HIGH"), Some(Priority::High));
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn serializes_with_camel_case_and_iso_date() {
        let task = Task::create(
            NewTask::new("Review", "Work")
                .with_priority(Priority::High)
                .with_due_date(Some(date(2024, 9, 25))),
        )
        .unwrap();
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2024-09-25");
        assert_eq!(json["priority"], "high");
    }
}
