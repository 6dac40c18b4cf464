//! View selector resolution.

use crate::model::project::Project;

pub const INBOX_VIEW: &str = "inbox";
pub const TODAY_VIEW: &str = "today";
pub const UPCOMING_VIEW: &str = "upcoming";

/// A named filter lens over the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Inbox,
    Today,
    Upcoming,
    /// Tasks filed under the named project.
    Project(String),
    /// Selector matching no built-in view and no project. Behaves like
    /// `Inbox` for filtering.
    Unrecognized(String),
}

impl View {
    /// Resolves a raw selector against the current project list.
    ///
    /// Built-in ids take precedence over a project with the same name.
    pub fn parse(selector: &str, projects: &[Project]) -> Self {
        match selector {
            INBOX_VIEW => Self::Inbox,
            TODAY_VIEW => Self::Today,
            UPCOMING_VIEW => Self::Upcoming,
            other if projects.iter().any(|project| project.name == other) => {
                Self::Project(other.to_string())
            }
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// Page heading for the view.
    pub fn title(&self) -> &str {
        match self {
            Self::Inbox => "Inbox",
            Self::Today => "Today",
            Self::Upcoming => "Upcoming",
            Self::Project(name) | Self::Unrecognized(name) => name.as_str(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::View;
    use crate::model::project::seed_projects;

    #[test]
    fn parse_resolves_builtins_projects_and_unknowns() {
        let projects = seed_projects();
        assert_eq!(View::parse("inbox", &projects), View::Inbox);
        assert_eq!(View::parse("today", &projects), View::Today);
        assert_eq!(View::parse("upcoming", &projects), View::Upcoming);
        assert_eq!(
            View::parse("Work", &projects),
            View::Project("Work".to_string())
        );
        assert_eq!(
            View::parse("work", &projects),
            View::Unrecognized("work".to_string())
        );
    }

    #[test]
    fn title_falls_back_to_selector() {
        let projects = seed_projects();
        assert_eq!(View::parse("today", &projects).title(), "Today");
        assert_eq!(View::parse("Health", &projects).title(), "Health");
        assert_eq!(View::parse("filters", &projects).title(), "filters");
    }
}
