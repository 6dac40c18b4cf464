use chrono::NaiveDate;
use taskmaster_core::db::open_db_in_memory;
use taskmaster_core::{
    NewProject, NewTask, Priority, Project, ProjectRepository, RepoError, Settings,
    SettingsRepository, SqliteProjectRepository, SqliteSettingsRepository, SqliteTaskRepository,
    Task, TaskRepository,
};
use uuid::Uuid;

fn due(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let task = Task::create(
        NewTask::new("Review project proposal", "Work")
            .with_priority(Priority::High)
            .with_due_date(due(2024, 9, 25)),
    )
    .unwrap();
    let id = repo.create_task(&task).unwrap();

    let loaded = repo.get_task(id).unwrap().unwrap();
    assert_eq!(loaded, task);
}

#[test]
fn list_keeps_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let titles = ["zeta", "alpha", "mid"];
    for title in titles {
        repo.create_task(&Task::create(NewTask::new(title, "Work")).unwrap())
            .unwrap();
    }

    let listed: Vec<String> = repo
        .list_tasks()
        .unwrap()
        .into_iter()
        .map(|task| task.title)
        .collect();
    assert_eq!(listed, titles);
}

#[test]
fn update_persists_completion_and_sets_completed_at() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let mut task = Task::create(NewTask::new("Call dentist", "Personal")).unwrap();
    repo.create_task(&task).unwrap();
    task.toggle();
    repo.update_task(&task).unwrap();

    assert!(repo.get_task(task.id).unwrap().unwrap().completed);
    let completed_at: Option<i64> = conn
        .query_row(
            "SELECT completed_at FROM tasks WHERE uuid = ?1;",
            [task.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert!(completed_at.is_some());

    task.toggle();
    repo.update_task(&task).unwrap();
    let completed_at: Option<i64> = conn
        .query_row(
            "SELECT completed_at FROM tasks WHERE uuid = ?1;",
            [task.id.to_string()],
            |row| row.get(0),
        )
        .unwrap();
    assert!(completed_at.is_none());
}

#[test]
fn update_and_delete_unknown_task_return_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let task = Task::create(NewTask::new("ghost", "Work")).unwrap();
    assert!(matches!(repo.update_task(&task), Err(RepoError::NotFound(id)) if id == task.id));

    let missing = Uuid::new_v4();
    assert!(matches!(repo.delete_task(missing), Err(RepoError::NotFound(id)) if id == missing));
}

#[test]
fn delete_removes_the_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();

    let task = Task::create(NewTask::new("temporary", "Work")).unwrap();
    repo.create_task(&task).unwrap();
    repo.delete_task(task.id).unwrap();
    assert!(repo.get_task(task.id).unwrap().is_none());
}

#[test]
fn malformed_persisted_date_is_reported_not_masked() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::try_new(&conn).unwrap();
    conn.execute(
        "INSERT INTO tasks (uuid, title, project_name, due_date)
         VALUES (?1, 'bad date', 'Work', '2024-9-5');",
        [Uuid::new_v4().to_string()],
    )
    .unwrap();

    assert!(matches!(repo.list_tasks(), Err(RepoError::InvalidData(_))));
}

#[test]
fn projects_roundtrip_in_creation_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteProjectRepository::try_new(&conn).unwrap();

    let garden = Project::create(
        NewProject::new("Garden")
            .with_description("Outdoor chores")
            .with_color("#84CC16"),
    )
    .unwrap();
    let books = Project::create(NewProject::new("Books")).unwrap();
    repo.create_project(&garden).unwrap();
    repo.create_project(&books).unwrap();

    let listed = repo.list_projects().unwrap();
    assert_eq!(listed, vec![garden, books]);
}

#[test]
fn settings_default_when_absent_and_persist_wholesale() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSettingsRepository::try_new(&conn).unwrap();
    assert_eq!(repo.load_settings().unwrap(), Settings::default());

    let changed = Settings {
        dark_mode: true,
        font_size: 18,
        ..Settings::default()
    };
    repo.save_settings(&changed).unwrap();
    repo.save_settings(&changed).unwrap();
    assert_eq!(repo.load_settings().unwrap(), changed);

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM settings;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn repository_requires_migrated_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    assert!(matches!(
        SqliteTaskRepository::try_new(&conn),
        Err(RepoError::MissingRequiredTable("tasks"))
    ));
}
