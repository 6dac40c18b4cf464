//! Dashboard use-case service.
//!
//! # Responsibility
//! - Load a `DashboardState` from the document tables.
//! - Apply events through the pure session transition and mirror each
//!   outcome with one plain create/update/delete call.
//!
//! # Invariants
//! - The in-memory transition runs first; nothing is written when it fails.
//! - View and search changes are session-only and never persisted.

use crate::model::project::seed_projects;
use crate::repo::project_repo::{ProjectRepository, SqliteProjectRepository};
use crate::repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
use crate::repo::task_repo::{SqliteTaskRepository, TaskRepository};
use crate::repo::{RepoError, RepoResult};
use crate::session::dashboard::{
    DashboardError, DashboardEvent, DashboardState, Outcome, Transition,
};
use log::{info, warn};
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// The event was rejected by the session transition.
    Dashboard(DashboardError),
    /// The transition succeeded but storage failed.
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Dashboard(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<DashboardError> for ServiceError {
    fn from(value: DashboardError) -> Self {
        Self::Dashboard(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Dashboard service over task, project and settings repositories.
pub struct DashboardService<T, P, S>
where
    T: TaskRepository,
    P: ProjectRepository,
    S: SettingsRepository,
{
    tasks: T,
    projects: P,
    settings: S,
}

/// Dashboard service bound to one SQLite connection.
pub type SqliteDashboardService<'conn> = DashboardService<
    SqliteTaskRepository<'conn>,
    SqliteProjectRepository<'conn>,
    SqliteSettingsRepository<'conn>,
>;

impl<'conn> SqliteDashboardService<'conn> {
    /// Builds all SQLite repositories over a migrated connection.
    pub fn open(conn: &'conn Connection) -> RepoResult<Self> {
        Ok(DashboardService::new(
            SqliteTaskRepository::try_new(conn)?,
            SqliteProjectRepository::try_new(conn)?,
            SqliteSettingsRepository::try_new(conn)?,
        ))
    }
}

impl<T, P, S> DashboardService<T, P, S>
where
    T: TaskRepository,
    P: ProjectRepository,
    S: SettingsRepository,
{
    pub fn new(tasks: T, projects: P, settings: S) -> Self {
        Self {
            tasks,
            projects,
            settings,
        }
    }

    /// Loads tasks, projects and settings into an inbox-view state.
    pub fn load(&self) -> ServiceResult<DashboardState> {
        let tasks = self.tasks.list_tasks()?;
        let projects = self.projects.list_projects()?;
        let settings = self.settings.load_settings()?;
        info!(
            "event=dashboard_load module=service status=ok tasks={} projects={}",
            tasks.len(),
            projects.len()
        );
        Ok(DashboardState::new(tasks, projects, settings))
    }

    /// Inserts the seed projects when no project exists yet.
    ///
    /// Returns how many projects were created.
    pub fn seed_projects_if_empty(&self) -> ServiceResult<usize> {
        if !self.projects.list_projects()?.is_empty() {
            return Ok(0);
        }

        let seeds = seed_projects();
        for project in &seeds {
            self.projects.create_project(project)?;
        }
        info!(
            "event=projects_seed module=service status=ok count={}",
            seeds.len()
        );
        Ok(seeds.len())
    }

    /// Applies `event` to `state` and persists the outcome.
    ///
    /// On error `state` is still the authoritative session state.
    pub fn dispatch(
        &self,
        state: &DashboardState,
        event: DashboardEvent,
    ) -> ServiceResult<Transition> {
        let name = event_name(&event);
        let transition = state.apply(event).map_err(|err| {
            warn!("event={name} module=service status=rejected error={err}");
            err
        })?;

        self.persist(&transition.outcome).map_err(|err| {
            warn!("event={name} module=service status=error error_code=persist_failed error={err}");
            err
        })?;

        info!("event={name} module=service status=ok");
        Ok(transition)
    }

    fn persist(&self, outcome: &Outcome) -> RepoResult<()> {
        match outcome {
            Outcome::TaskAdded(task) => self.tasks.create_task(task).map(|_| ()),
            Outcome::TaskUpdated(task) => self.tasks.update_task(task),
            Outcome::TaskRemoved(id) => self.tasks.delete_task(*id),
            Outcome::ProjectCreated(project) => self.projects.create_project(project).map(|_| ()),
            Outcome::SettingsChanged(settings) => self.settings.save_settings(settings),
            Outcome::ViewSelected | Outcome::SearchChanged => Ok(()),
        }
    }
}

fn event_name(event: &DashboardEvent) -> &'static str {
    match event {
        DashboardEvent::ToggleTask(_) => "task_toggle",
        DashboardEvent::DeleteTask(_) => "task_delete",
        DashboardEvent::AddTask(_) => "task_add",
        DashboardEvent::CreateProject(_) => "project_create",
        DashboardEvent::SelectView(_) => "view_select",
        DashboardEvent::SetSearch(_) => "search_set",
        DashboardEvent::UpdateSettings(_) | DashboardEvent::ChangeSetting(_) => "settings_change",
    }
}
