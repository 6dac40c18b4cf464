//! Core domain logic for the TaskMaster dashboard.
//! This crate is the single source of truth for view, count and record
//! invariants; presentation layers only render what it derives.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date::{format_iso_date, local_today, parse_iso_date, DateParseError};
pub use model::project::{seed_projects, NewProject, Project, ProjectId};
pub use model::settings::{SettingChange, SettingKey, Settings, SettingsError};
pub use model::task::{NewTask, Priority, Task, TaskId};
pub use model::ValidationError;
pub use repo::project_repo::{ProjectRepository, SqliteProjectRepository};
pub use repo::settings_repo::{SettingsRepository, SqliteSettingsRepository};
pub use repo::task_repo::{SqliteTaskRepository, TaskRepository};
pub use repo::{RepoError, RepoResult};
pub use service::dashboard_service::{
    DashboardService, ServiceError, ServiceResult, SqliteDashboardService,
};
pub use session::dashboard::{
    DashboardError, DashboardEvent, DashboardState, DashboardView, Outcome, Transition,
};
pub use view::aggregate::{count_tasks, empty_state_message, filter_tasks, TaskCounts};
pub use view::selector::View;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
