//! The entity store boundary: where snapshots of users, projects, reviews
//! and submissions come from.
//!
//! [`RemoteStore`] talks to the review service, [`LocalStore`] reads the
//! SQLite cache, and [`FallbackStore`] tries the first and switches to the
//! second when the service cannot be reached.

pub mod remote;
pub mod local;
pub mod fallback;

pub use remote::*;
pub use local::*;
pub use fallback::*;

use thiserror::Error;
use crate::api::{ApiError, ReviewFilter, SubmissionFilter};
use crate::models::{Id, NewProject, Project, Review, Snapshot, Submission, User};

#[derive(Debug, Error)]
pub enum StoreError {
    /// The review service could not be reached; a secondary source may answer instead
    #[error("review service unavailable: {0}")]
    Unavailable(#[source] ApiError),
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Id },
    #[error(transparent)]
    Api(ApiError),
    #[error("local store error: {0:#}")]
    Local(#[from] anyhow::Error),
}

impl From<ApiError> for StoreError {
    fn from(err: ApiError) -> Self {
        if err.is_unavailable() {
            StoreError::Unavailable(err)
        } else {
            StoreError::Api(err)
        }
    }
}

/// Read contract plus the two project mutations the admin dashboard needs
pub trait EntityStore {
    /// Short label for log messages
    fn source(&self) -> &'static str;

    fn list_users(&self) -> Result<Vec<User>, StoreError>;

    fn list_projects(&self) -> Result<Vec<Project>, StoreError>;

    fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError>;

    fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError>;

    fn create_project(&self, project: &NewProject) -> Result<Project, StoreError>;

    fn delete_project(&self, id: Id) -> Result<(), StoreError>;
}

/// Pull every collection from a store
pub fn fetch_snapshot(store: &dyn EntityStore) -> Result<Snapshot, StoreError> {
    Ok(Snapshot {
        users: store.list_users()?,
        projects: store.list_projects()?,
        reviews: store.list_reviews(&ReviewFilter::default())?,
        submissions: store.list_submissions(&SubmissionFilter::default())?,
    })
}
