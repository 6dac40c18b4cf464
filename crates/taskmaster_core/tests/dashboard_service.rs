use taskmaster_core::db::{open_db, open_db_in_memory};
use taskmaster_core::{
    DashboardEvent, NewProject, NewTask, ServiceError, SettingChange, SqliteDashboardService,
    SqliteTaskRepository, TaskRepository,
};
use uuid::Uuid;

#[test]
fn seeding_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteDashboardService::open(&conn).unwrap();

    assert_eq!(service.seed_projects_if_empty().unwrap(), 4);
    assert_eq!(service.seed_projects_if_empty().unwrap(), 0);

    let state = service.load().unwrap();
    let names: Vec<&str> = state
        .projects
        .iter()
        .map(|project| project.name.as_str())
        .collect();
    assert_eq!(names, vec!["Work", "Personal", "Shopping", "Health"]);
    assert_eq!(state.selected_view, "inbox");
}

#[test]
fn task_events_are_mirrored_to_storage() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteDashboardService::open(&conn).unwrap();
    let state = service.load().unwrap();

    let added = service
        .dispatch(&state, DashboardEvent::AddTask(NewTask::new("Buy milk", "Personal")))
        .unwrap();
    let id = added.state.tasks[0].id;

    let toggled = service
        .dispatch(&added.state, DashboardEvent::ToggleTask(id))
        .unwrap();
    let reloaded = service.load().unwrap();
    assert_eq!(reloaded.tasks, toggled.state.tasks);
    assert!(reloaded.tasks[0].completed);

    service
        .dispatch(&toggled.state, DashboardEvent::DeleteTask(id))
        .unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    assert!(repo.list_tasks().unwrap().is_empty());
}

#[test]
fn rejected_events_write_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteDashboardService::open(&conn).unwrap();
    let state = service.load().unwrap();

    let err = service
        .dispatch(&state, DashboardEvent::AddTask(NewTask::new("   ", "Work")))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Dashboard(_)));

    let err = service
        .dispatch(&state, DashboardEvent::ToggleTask(Uuid::new_v4()))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Dashboard(_)));

    assert!(service.load().unwrap().tasks.is_empty());
}

#[test]
fn projects_and_settings_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dashboard.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let service = SqliteDashboardService::open(&conn).unwrap();
        let state = service.load().unwrap();
        let state = service
            .dispatch(
                &state,
                DashboardEvent::CreateProject(NewProject::new("Garden").with_color("#84CC16")),
            )
            .unwrap()
            .state;
        service
            .dispatch(
                &state,
                DashboardEvent::ChangeSetting(SettingChange::parse("darkMode", "true").unwrap()),
            )
            .unwrap();
    }

    let conn = open_db(&path).unwrap();
    let state = SqliteDashboardService::open(&conn).unwrap().load().unwrap();
    assert_eq!(state.projects.len(), 1);
    assert_eq!(state.projects[0].name, "Garden");
    assert!(state.settings.dark_mode);
}

#[test]
fn view_and_search_changes_are_session_only() {
    let conn = open_db_in_memory().unwrap();
    let service = SqliteDashboardService::open(&conn).unwrap();
    let state = service.load().unwrap();

    let state = service
        .dispatch(&state, DashboardEvent::SelectView("today".to_string()))
        .unwrap()
        .state;
    let state = service
        .dispatch(&state, DashboardEvent::SetSearch("milk".to_string()))
        .unwrap()
        .state;
    assert_eq!(state.selected_view, "today");
    assert_eq!(state.search_query, "milk");

    let reloaded = service.load().unwrap();
    assert_eq!(reloaded.selected_view, "inbox");
    assert!(reloaded.search_query.is_empty());
}
