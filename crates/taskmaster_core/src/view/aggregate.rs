//! Visible-task filtering and outstanding-work counts.
//!
//! # Invariants
//! - Search is a case-insensitive title substring match and ignores
//!   completion state.
//! - Undated tasks never appear in `today`/`upcoming` results or counts.
//! - Counts ignore the search query.

use super::selector::{View, INBOX_VIEW, TODAY_VIEW, UPCOMING_VIEW};
use crate::model::project::Project;
use crate::model::task::Task;
use chrono::NaiveDate;

pub const NO_SEARCH_RESULTS_MESSAGE: &str = "No tasks found matching your search.";
pub const EMPTY_VIEW_MESSAGE: &str = "No tasks in this view.";

/// Returns the tasks visible under `selected_view` and `search_query`.
///
/// Unrecognized selectors pass the search-filtered list through unchanged.
pub fn filter_tasks<'a>(
    tasks: &'a [Task],
    projects: &[Project],
    selected_view: &str,
    search_query: &str,
    today: NaiveDate,
) -> Vec<&'a Task> {
    let view = View::parse(selected_view, projects);
    let needle = search_query.to_lowercase();

    tasks
        .iter()
        .filter(|task| needle.is_empty() || task.title_contains_lower(&needle))
        .filter(|task| match &view {
            View::Inbox | View::Unrecognized(_) => true,
            View::Today => task.is_due_on(today),
            View::Upcoming => task.is_due_after(today),
            View::Project(name) => task.project == *name,
        })
        .collect()
}

/// Outstanding (incomplete) task counts per view and per project.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub inbox: usize,
    pub today: usize,
    pub upcoming: usize,
    /// One entry per distinct project name, in project-list order.
    pub projects: Vec<(String, usize)>,
}

impl TaskCounts {
    /// Looks up a count by view id or project name.
    ///
    /// A project named like a built-in view replaces that view's count.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.project_count(key).or_else(|| self.builtin_count(key))
    }

    /// Count for a project by exact name, ignoring built-in views.
    pub fn project_count(&self, name: &str) -> Option<usize> {
        self.projects
            .iter()
            .find(|(project, _)| project == name)
            .map(|(_, count)| *count)
    }

    fn builtin_count(&self, key: &str) -> Option<usize> {
        match key {
            INBOX_VIEW => Some(self.inbox),
            TODAY_VIEW => Some(self.today),
            UPCOMING_VIEW => Some(self.upcoming),
            _ => None,
        }
    }

    /// One entry per key: built-in views first, then the remaining projects.
    ///
    /// Projects named like a built-in view keep that view's slot.
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        [INBOX_VIEW, TODAY_VIEW, UPCOMING_VIEW]
            .into_iter()
            .filter_map(move |key| self.get(key).map(|count| (key, count)))
            .chain(
                self.projects
                    .iter()
                    .filter(|(name, _)| self.builtin_count(name).is_none())
                    .map(|(name, count)| (name.as_str(), *count)),
            )
    }
}

/// Counts outstanding tasks for every built-in view and project.
pub fn count_tasks(tasks: &[Task], projects: &[Project], today: NaiveDate) -> TaskCounts {
    let open: Vec<&Task> = tasks.iter().filter(|task| task.is_open()).collect();

    let mut project_counts: Vec<(String, usize)> = Vec::with_capacity(projects.len());
    for project in projects {
        if project_counts.iter().any(|(name, _)| *name == project.name) {
            continue;
        }
        let count = open
            .iter()
            .filter(|task| task.project == project.name)
            .count();
        project_counts.push((project.name.clone(), count));
    }

    TaskCounts {
        inbox: open.len(),
        today: open.iter().filter(|task| task.is_due_on(today)).count(),
        upcoming: open.iter().filter(|task| task.is_due_after(today)).count(),
        projects: project_counts,
    }
}

/// Message shown when a view has nothing to display.
pub fn empty_state_message(search_query: &str) -> &'static str {
    if search_query.is_empty() {
        EMPTY_VIEW_MESSAGE
    } else {
        NO_SEARCH_RESULTS_MESSAGE
    }
}
