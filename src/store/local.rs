use rusqlite::Connection;
use crate::api::{ReviewFilter, SubmissionFilter};
use crate::models::{Id, NewProject, Project, Review, Snapshot, Submission, User};
use crate::repo::{ImportSummary, ProjectRepo, ReviewRepo, SnapshotRepo, SubmissionRepo, UserRepo};
use super::{EntityStore, StoreError};

/// Entity store backed by the local SQLite cache
pub struct LocalStore {
    conn: Connection,
}

impl LocalStore {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Replace the cached data with `snapshot`
    pub fn replace(&self, snapshot: &Snapshot) -> Result<ImportSummary, StoreError> {
        Ok(SnapshotRepo::replace(&self.conn, snapshot)?)
    }
}

impl EntityStore for LocalStore {
    fn source(&self) -> &'static str {
        "local"
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(UserRepo::list(&self.conn)?)
    }

    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(ProjectRepo::list(&self.conn)?)
    }

    fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError> {
        Ok(ReviewRepo::list(&self.conn, filter)?)
    }

    fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError> {
        Ok(SubmissionRepo::list(&self.conn, filter)?)
    }

    fn create_project(&self, project: &NewProject) -> Result<Project, StoreError> {
        Ok(ProjectRepo::create(&self.conn, project)?)
    }

    fn delete_project(&self, id: Id) -> Result<(), StoreError> {
        if ProjectRepo::delete(&self.conn, id)? {
            Ok(())
        } else {
            Err(StoreError::NotFound { entity: "Project", id })
        }
    }
}
