use rusqlite::{Connection, OptionalExtension};
use crate::models::{Id, NewProject, Project, ProjectStatus};
use super::{parse_date_column, ReviewRepo, SubmissionRepo};
use anyhow::{Context, Result};

/// Project repository for the local store
///
/// Projects are returned with their assigned students (in assignment order)
/// and with the reviews and submissions filed under them.
///
/// # Example
///
/// ```no_run
/// use citriq::db::DbConnection;
/// use citriq::models::ProjectDraft;
/// use citriq::repo::ProjectRepo;
///
/// let conn = DbConnection::connect_in_memory().unwrap();
/// let mut draft = ProjectDraft::new();
/// draft.title = "Essay".to_string();
/// draft.description = "Peer-reviewed essay".to_string();
/// draft.due_date = chrono::NaiveDate::from_ymd_opt(2026, 3, 1);
/// draft.toggle_student(4);
/// let project = ProjectRepo::create(&conn, &draft.submit().unwrap()).unwrap();
/// ```
pub struct ProjectRepo;

impl ProjectRepo {
    /// Create a new project with a store-assigned id
    pub fn create(conn: &Connection, new_project: &NewProject) -> Result<Project> {
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "INSERT INTO projects (title, description, due_date, status)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                new_project.title,
                new_project.description,
                new_project.due_date.format("%Y-%m-%d").to_string(),
                new_project.status.as_str(),
            ],
        )
        .with_context(|| format!("Failed to create project: {}", new_project.title))?;

        let id = tx.last_insert_rowid();
        Self::set_students(&tx, id, &new_project.assigned_students)?;
        tx.commit()?;

        Ok(Project {
            id,
            title: new_project.title.clone(),
            description: new_project.description.clone(),
            due_date: new_project.due_date,
            status: new_project.status.clone(),
            assigned_students: new_project.assigned_students.clone(),
            reviews: Vec::new(),
            submissions: Vec::new(),
        })
    }

    /// Insert a project with its service-assigned id (without its children).
    /// Returns false when a project with that id is already stored.
    pub fn insert(conn: &Connection, project: &Project) -> Result<bool> {
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO projects (id, title, description, due_date, status)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![
                    project.id,
                    project.title,
                    project.description,
                    project.due_date.format("%Y-%m-%d").to_string(),
                    project.status.as_str(),
                ],
            )
            .with_context(|| format!("Failed to store project {}", project.id))?;

        if inserted > 0 {
            Self::set_students(conn, project.id, &project.assigned_students)?;
        }
        Ok(inserted > 0)
    }

    /// Get project by ID
    pub fn get_by_id(conn: &Connection, id: Id) -> Result<Option<Project>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, due_date, status FROM projects WHERE id = ?1"
        )?;
        let project = stmt.query_row([id], project_from_row).optional()?;

        match project {
            Some(project) => Ok(Some(Self::with_children(conn, project)?)),
            None => Ok(None),
        }
    }

    /// List all projects ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<Project>> {
        let mut stmt = conn.prepare(
            "SELECT id, title, description, due_date, status FROM projects ORDER BY id"
        )?;
        let rows = stmt.query_map([], project_from_row)?;

        let mut projects = Vec::new();
        for row in rows {
            projects.push(Self::with_children(conn, row?)?);
        }
        Ok(projects)
    }

    /// Delete a project together with its reviews and submissions.
    /// Returns false when no such project exists.
    pub fn delete(conn: &Connection, id: Id) -> Result<bool> {
        let tx = conn.unchecked_transaction()?;

        tx.execute("DELETE FROM reviews WHERE project_id = ?1", [id])?;
        tx.execute("DELETE FROM submissions WHERE project_id = ?1", [id])?;
        let rows_affected = tx
            .execute("DELETE FROM projects WHERE id = ?1", [id])
            .with_context(|| format!("Failed to delete project {}", id))?;

        tx.commit()?;
        Ok(rows_affected > 0)
    }

    /// Assigned student ids in assignment order
    pub fn students(conn: &Connection, project_id: Id) -> Result<Vec<Id>> {
        let mut stmt = conn.prepare(
            "SELECT student_id FROM project_students WHERE project_id = ?1 ORDER BY position"
        )?;
        let rows = stmt.query_map([project_id], |row| row.get(0))?;

        let mut students = Vec::new();
        for row in rows {
            students.push(row?);
        }
        Ok(students)
    }

    fn set_students(conn: &Connection, project_id: Id, students: &[Id]) -> Result<()> {
        conn.execute("DELETE FROM project_students WHERE project_id = ?1", [project_id])?;
        for (position, student_id) in students.iter().enumerate() {
            conn.execute(
                "INSERT OR IGNORE INTO project_students (project_id, student_id, position)
                 VALUES (?1, ?2, ?3)",
                rusqlite::params![project_id, student_id, position as i64],
            )?;
        }
        Ok(())
    }

    fn with_children(conn: &Connection, mut project: Project) -> Result<Project> {
        project.assigned_students = Self::students(conn, project.id)?;
        project.reviews = ReviewRepo::list_for_project(conn, project.id)?;
        project.submissions = SubmissionRepo::list_for_project(conn, project.id)?;
        Ok(project)
    }
}

fn project_from_row(row: &rusqlite::Row) -> rusqlite::Result<Project> {
    let due_date: String = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(Project {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        due_date: parse_date_column(3, &due_date)?,
        status: ProjectStatus::from(status.as_str()),
        assigned_students: Vec::new(),
        reviews: Vec::new(),
        submissions: Vec::new(),
    })
}
