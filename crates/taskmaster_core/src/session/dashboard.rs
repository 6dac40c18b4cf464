//! Dashboard state, events and transitions.

use crate::model::project::{seed_projects, NewProject, Project};
use crate::model::settings::{SettingChange, Settings, SettingsError};
use crate::model::task::{NewTask, Task, TaskId};
use crate::model::ValidationError;
use crate::view::aggregate::{count_tasks, empty_state_message, filter_tasks, TaskCounts};
use crate::view::selector::{View, INBOX_VIEW};
use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Project pre-selected by the add-task form when nothing better exists.
const FALLBACK_FORM_PROJECT: &str = "Personal";

#[derive(Debug)]
pub enum DashboardError {
    Validation(ValidationError),
    Settings(SettingsError),
    TaskNotFound(TaskId),
}

impl Display for DashboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Settings(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
        }
    }
}

impl Error for DashboardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Settings(err) => Some(err),
            Self::TaskNotFound(_) => None,
        }
    }
}

impl From<ValidationError> for DashboardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<SettingsError> for DashboardError {
    fn from(value: SettingsError) -> Self {
        Self::Settings(value)
    }
}

/// User interaction applied to the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    ToggleTask(TaskId),
    DeleteTask(TaskId),
    AddTask(NewTask),
    CreateProject(NewProject),
    SelectView(String),
    SetSearch(String),
    /// Replaces the whole settings value.
    UpdateSettings(Settings),
    ChangeSetting(SettingChange),
}

/// What a transition changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    TaskAdded(Task),
    TaskUpdated(Task),
    TaskRemoved(TaskId),
    ProjectCreated(Project),
    SettingsChanged(Settings),
    ViewSelected,
    SearchChanged,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: DashboardState,
    pub outcome: Outcome,
}

/// Everything the dashboard page renders for the current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView<'a> {
    pub title: String,
    pub visible_tasks: Vec<&'a Task>,
    pub counts: TaskCounts,
    /// Set only when `visible_tasks` is empty.
    pub empty_message: Option<&'static str>,
    /// Project pre-selected by the add-task form.
    pub form_project: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardState {
    pub tasks: Vec<Task>,
    pub projects: Vec<Project>,
    /// Raw view selector: built-in view id or project name.
    pub selected_view: String,
    pub search_query: String,
    pub settings: Settings,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Vec::new(), Vec::new(), Settings::default())
    }
}

impl DashboardState {
    /// Creates a state showing the inbox with no search.
    pub fn new(tasks: Vec<Task>, projects: Vec<Project>, settings: Settings) -> Self {
        Self {
            tasks,
            projects,
            selected_view: INBOX_VIEW.to_string(),
            search_query: String::new(),
            settings,
        }
    }

    /// Fresh dashboard with the seed projects and no tasks.
    pub fn seeded() -> Self {
        Self::new(Vec::new(), seed_projects(), Settings::default())
    }

    /// Applies one event and returns the next state.
    ///
    /// `self` is never modified; on error the caller keeps the old state.
    ///
    /// # Errors
    /// - `TaskNotFound` for toggle/delete of an unknown id.
    /// - `Validation` for blank task titles or project names.
    /// - `Settings` for out-of-range setting values.
    pub fn apply(&self, event: DashboardEvent) -> Result<Transition, DashboardError> {
        let mut next = self.clone();
        let outcome = match event {
            DashboardEvent::ToggleTask(id) => {
                let task = next
                    .tasks
                    .iter_mut()
                    .find(|task| task.id == id)
                    .ok_or(DashboardError::TaskNotFound(id))?;
                task.toggle();
                Outcome::TaskUpdated(task.clone())
            }
            DashboardEvent::DeleteTask(id) => {
                let before = next.tasks.len();
                next.tasks.retain(|task| task.id != id);
                if next.tasks.len() == before {
                    return Err(DashboardError::TaskNotFound(id));
                }
                Outcome::TaskRemoved(id)
            }
            DashboardEvent::AddTask(new_task) => {
                let task = Task::create(new_task)?;
                next.tasks.push(task.clone());
                Outcome::TaskAdded(task)
            }
            DashboardEvent::CreateProject(new_project) => {
                let project = Project::create(new_project)?;
                next.projects.push(project.clone());
                Outcome::ProjectCreated(project)
            }
            DashboardEvent::SelectView(selector) => {
                next.selected_view = selector;
                Outcome::ViewSelected
            }
            DashboardEvent::SetSearch(query) => {
                next.search_query = query;
                Outcome::SearchChanged
            }
            DashboardEvent::UpdateSettings(settings) => {
                settings.validate()?;
                next.settings = settings.clone();
                Outcome::SettingsChanged(settings)
            }
            DashboardEvent::ChangeSetting(change) => {
                next.settings = next.settings.with_change(change)?;
                Outcome::SettingsChanged(next.settings.clone())
            }
        };

        Ok(Transition {
            state: next,
            outcome,
        })
    }

    /// Resolved view for the current selector.
    pub fn view(&self) -> View {
        View::parse(&self.selected_view, &self.projects)
    }

    pub fn visible_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        filter_tasks(
            &self.tasks,
            &self.projects,
            &self.selected_view,
            &self.search_query,
            today,
        )
    }

    pub fn counts(&self, today: NaiveDate) -> TaskCounts {
        count_tasks(&self.tasks, &self.projects, today)
    }

    /// Project pre-selected by the add-task form.
    ///
    /// From the inbox this is the second project (or `Personal`); from any
    /// other view it is the view selector itself.
    pub fn form_project(&self) -> String {
        if self.selected_view == INBOX_VIEW {
            return self
                .projects
                .get(1)
                .map(|project| project.name.clone())
                .unwrap_or_else(|| FALLBACK_FORM_PROJECT.to_string());
        }
        self.selected_view.clone()
    }

    /// Derives everything the page displays.
    pub fn snapshot(&self, today: NaiveDate) -> DashboardView<'_> {
        let visible_tasks = self.visible_tasks(today);
        let empty_message = visible_tasks
            .is_empty()
            .then(|| empty_state_message(&self.search_query));

        DashboardView {
            title: self.view().title().to_string(),
            visible_tasks,
            counts: self.counts(today),
            empty_message,
            form_project: self.form_project(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DashboardError, DashboardEvent, DashboardState, Outcome};
    use crate::model::project::NewProject;
    use crate::model::settings::{SettingChange, Theme};
    use crate::model::task::NewTask;
    use crate::view::aggregate::EMPTY_VIEW_MESSAGE;
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 25).unwrap()
    }

    fn with_task(state: &DashboardState, title: &str) -> DashboardState {
        state
            .apply(DashboardEvent::AddTask(NewTask::new(title, "Work")))
            .unwrap()
            .state
    }

    #[test]
    fn add_toggle_delete_flow() {
        let state = with_task(&DashboardState::seeded(), "Write report");
        let id = state.tasks[0].id;
        assert!(!state.tasks[0].completed);

        let toggled = state.apply(DashboardEvent::ToggleTask(id)).unwrap();
        assert!(toggled.state.tasks[0].completed);
        assert!(matches!(toggled.outcome, Outcome::TaskUpdated(ref task) if task.completed));
        assert!(!state.tasks[0].completed, "old state must be untouched");

        let deleted = toggled.state.apply(DashboardEvent::DeleteTask(id)).unwrap();
        assert!(deleted.state.tasks.is_empty());
        assert_eq!(deleted.outcome, Outcome::TaskRemoved(id));
    }

    #[test]
    fn toggle_only_touches_the_matching_task() {
        let state = with_task(&with_task(&DashboardState::seeded(), "a"), "b");
        let first = state.tasks[0].id;
        let next = state.apply(DashboardEvent::ToggleTask(first)).unwrap().state;
        assert!(next.tasks[0].completed);
        assert_eq!(next.tasks[1], state.tasks[1]);
    }

    #[test]
    fn unknown_task_id_is_reported() {
        let state = DashboardState::seeded();
        let missing = Uuid::new_v4();
        let err = state.apply(DashboardEvent::DeleteTask(missing)).unwrap_err();
        assert!(matches!(err, DashboardError::TaskNotFound(id) if id == missing));
    }

    #[test]
    fn blank_submissions_are_rejected() {
        let state = DashboardState::seeded();
        assert!(matches!(
            state.apply(DashboardEvent::AddTask(NewTask::new("  ", "Work"))),
            Err(DashboardError::Validation(_))
        ));
        assert!(matches!(
            state.apply(DashboardEvent::CreateProject(NewProject::new(""))),
            Err(DashboardError::Validation(_))
        ));
    }

    #[test]
    fn create_project_appends_with_zero_count() {
        let state = DashboardState::seeded();
        let next = state
            .apply(DashboardEvent::CreateProject(NewProject::new("Garden")))
            .unwrap()
            .state;
        assert_eq!(next.projects.len(), state.projects.len() + 1);
        let created = next.projects.last().unwrap();
        assert_eq!(created.name, "Garden");
        assert_eq!(created.task_count, 0);
    }

    #[test]
    fn settings_change_replaces_whole_value() {
        let state = DashboardState::seeded();
        let transition = state
            .apply(DashboardEvent::ChangeSetting(SettingChange::Theme(Theme::Green)))
            .unwrap();
        assert_eq!(transition.state.settings.theme, Theme::Green);
        assert!(matches!(transition.outcome, Outcome::SettingsChanged(_)));

        let err = state
            .apply(DashboardEvent::ChangeSetting(SettingChange::FontSize(99)))
            .unwrap_err();
        assert!(matches!(err, DashboardError::Settings(_)));
    }

    #[test]
    fn snapshot_reflects_view_and_search() {
        let state = with_task(&DashboardState::seeded(), "Buy milk");
        let state = state
            .apply(DashboardEvent::SelectView("Work".to_string()))
            .unwrap()
            .state;
        let view = state.snapshot(today());
        assert_eq!(view.title, "Work");
        assert_eq!(view.visible_tasks.len(), 1);
        assert_eq!(view.empty_message, None);
        assert_eq!(view.form_project, "Work");

        let state = state
            .apply(DashboardEvent::SelectView("today".to_string()))
            .unwrap()
            .state;
        let view = state.snapshot(today());
        assert!(view.visible_tasks.is_empty());
        assert_eq!(view.empty_message, Some(EMPTY_VIEW_MESSAGE));
    }

    #[test]
    fn inbox_form_project_prefers_second_project() {
        let seeded = DashboardState::seeded();
        assert_eq!(seeded.form_project(), "Personal");
        assert_eq!(DashboardState::default().form_project(), "Personal");
    }
}
