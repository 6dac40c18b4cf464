//! Project repository contract and SQLite implementation.
//!
//! Projects are only ever created and listed by the dashboard.

use super::{ensure_table, parse_uuid, RepoError, RepoResult};
use crate::model::project::{Project, ProjectId};
use rusqlite::{params, Connection, Row};

pub trait ProjectRepository {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId>;
    /// Lists non-archived projects in insertion order.
    fn list_projects(&self) -> RepoResult<Vec<Project>>;
}

pub struct SqliteProjectRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProjectRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "projects")?;
        Ok(Self { conn })
    }
}

impl ProjectRepository for SqliteProjectRepository<'_> {
    fn create_project(&self, project: &Project) -> RepoResult<ProjectId> {
        project.validate()?;

        self.conn.execute(
            "INSERT INTO projects (
                uuid,
                name,
                description,
                color,
                task_count,
                position
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM projects)
            );",
            params![
                project.id.to_string(),
                project.name.as_str(),
                project.description.as_deref(),
                project.color.as_str(),
                i64::from(project.task_count),
            ],
        )?;

        Ok(project.id)
    }

    fn list_projects(&self) -> RepoResult<Vec<Project>> {
        let mut stmt = self.conn.prepare(
            "SELECT uuid, name, description, color, task_count
             FROM projects
             WHERE is_archived = 0
             ORDER BY position ASC, rowid ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next()? {
            projects.push(parse_project_row(row)?);
        }
        Ok(projects)
    }
}

fn parse_project_row(row: &Row<'_>) -> RepoResult<Project> {
    let uuid_text: String = row.get("uuid")?;
    let task_count: i64 = row.get("task_count")?;
    let task_count = u32::try_from(task_count).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid task_count `{task_count}` in projects.task_count"
        ))
    })?;

    let project = Project {
        id: parse_uuid(&uuid_text, "projects.uuid")?,
        name: row.get("name")?,
        description: row.get("description")?,
        color: row.get("color")?,
        task_count,
    };
    project.validate()?;
    Ok(project)
}
