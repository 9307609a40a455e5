// Per-entity endpoints of the review service

use crate::models::{
    Id, NewProject, NewReview, NewSubmission, NewUser, Project, Review, Submission, User,
};
use super::client::{ApiClient, ApiError};
use super::filter::{ReviewFilter, SubmissionFilter};

impl ApiClient {
    pub fn list_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users", &[])
    }

    pub fn get_user(&self, id: Id) -> Result<User, ApiError> {
        self.get(&format!("/users/{}", id), &[])
    }

    pub fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.post("/users", user)
    }

    pub fn update_user(&self, id: Id, user: &NewUser) -> Result<User, ApiError> {
        self.put(&format!("/users/{}", id), user)
    }

    pub fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get("/projects", &[])
    }

    pub fn get_project(&self, id: Id) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{}", id), &[])
    }

    pub fn create_project(&self, project: &NewProject) -> Result<Project, ApiError> {
        self.post("/projects", project)
    }

    pub fn update_project(&self, id: Id, project: &NewProject) -> Result<Project, ApiError> {
        self.put(&format!("/projects/{}", id), project)
    }

    pub fn delete_project(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{}", id))
    }

    pub fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, ApiError> {
        self.get("/reviews", &filter.to_query())
    }

    pub fn get_review(&self, id: Id) -> Result<Review, ApiError> {
        self.get(&format!("/reviews/{}", id), &[])
    }

    pub fn create_review(&self, review: &NewReview) -> Result<Review, ApiError> {
        self.post("/reviews", review)
    }

    pub fn update_review(&self, id: Id, review: &NewReview) -> Result<Review, ApiError> {
        self.put(&format!("/reviews/{}", id), review)
    }

    pub fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, ApiError> {
        self.get("/submissions", &filter.to_query())
    }

    pub fn get_submission(&self, id: Id) -> Result<Submission, ApiError> {
        self.get(&format!("/submissions/{}", id), &[])
    }

    pub fn create_submission(&self, submission: &NewSubmission) -> Result<Submission, ApiError> {
        self.post("/submissions", submission)
    }

    pub fn update_submission(&self, id: Id, submission: &NewSubmission) -> Result<Submission, ApiError> {
        self.put(&format!("/submissions/{}", id), submission)
    }

    /// Service-defined statistics, passed through as raw JSON
    pub fn analytics(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/analytics", &[])
    }
}
