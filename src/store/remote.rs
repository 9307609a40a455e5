use crate::api::{ApiClient, ReviewFilter, SubmissionFilter};
use crate::models::{Id, NewProject, Project, Review, Submission, User};
use super::{EntityStore, StoreError};

/// Entity store backed by the review service
pub struct RemoteStore {
    client: ApiClient,
}

impl RemoteStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

impl EntityStore for RemoteStore {
    fn source(&self) -> &'static str {
        "remote"
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.client.list_users()?)
    }

    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        Ok(self.client.list_projects()?)
    }

    fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError> {
        Ok(self.client.list_reviews(filter)?)
    }

    fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError> {
        Ok(self.client.list_submissions(filter)?)
    }

    fn create_project(&self, project: &NewProject) -> Result<Project, StoreError> {
        Ok(self.client.create_project(project)?)
    }

    fn delete_project(&self, id: Id) -> Result<(), StoreError> {
        self.client.delete_project(id).map_err(|err| {
            if err.is_not_found() {
                StoreError::NotFound { entity: "Project", id }
            } else {
                err.into()
            }
        })
    }
}
