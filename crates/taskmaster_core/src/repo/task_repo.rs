//! Task repository contract and SQLite implementation.
//!
//! # Invariants
//! - Writes call `Task::validate()` before SQL mutations.
//! - Listing returns tasks in insertion order.
//! - Delete is a hard delete; comments cascade with the task.

use super::{bool_to_int, ensure_table, parse_flag, parse_uuid, RepoError, RepoResult};
use crate::model::date::{format_iso_date, parse_iso_date};
use crate::model::task::{Priority, Task, TaskId};
use rusqlite::{params, Connection, Row};

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    is_completed,
    priority,
    due_date,
    project_name
FROM tasks";

/// Repository interface for task CRUD operations.
pub trait TaskRepository {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId>;
    fn update_task(&self, task: &Task) -> RepoResult<()>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "tasks")?;
        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn create_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.conn.execute(
            "INSERT INTO tasks (
                uuid,
                title,
                is_completed,
                completed_at,
                priority,
                due_date,
                project_name
            ) VALUES (
                ?1, ?2, ?3,
                CASE WHEN ?3 = 1 THEN (strftime('%s', 'now') * 1000) ELSE NULL END,
                ?4, ?5, ?6
            );",
            params![
                task.id.to_string(),
                task.title.as_str(),
                bool_to_int(task.completed),
                task.priority.as_str(),
                task.due_date.map(format_iso_date),
                task.project.as_str(),
            ],
        )?;

        Ok(task.id)
    }

    fn update_task(&self, task: &Task) -> RepoResult<()> {
        task.validate()?;

        let changed = self.conn.execute(
            "UPDATE tasks
             SET
                title = ?2,
                is_completed = ?3,
                completed_at = CASE
                    WHEN ?3 = 1 THEN COALESCE(completed_at, strftime('%s', 'now') * 1000)
                    ELSE NULL
                END,
                priority = ?4,
                due_date = ?5,
                project_name = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                task.id.to_string(),
                task.title.as_str(),
                bool_to_int(task.completed),
                task.priority.as_str(),
                task.due_date.map(format_iso_date),
                task.project.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(task.id));
        }

        Ok(())
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_task_row(row)?));
        }
        Ok(None)
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();
        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }
        Ok(tasks)
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "tasks.uuid")?;

    let priority_text: String = row.get("priority")?;
    let priority = Priority::parse(&priority_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid priority `{priority_text}` in tasks.priority"))
    })?;

    let due_date = match row.get::<_, Option<String>>("due_date")? {
        Some(value) => Some(parse_iso_date(&value).map_err(|err| {
            RepoError::InvalidData(format!("{err} in tasks.due_date"))
        })?),
        None => None,
    };

    let task = Task {
        id,
        title: row.get("title")?,
        completed: parse_flag(row.get("is_completed")?, "tasks.is_completed")?,
        priority,
        due_date,
        project: row.get("project_name")?,
    };
    task.validate()?;
    Ok(task)
}
