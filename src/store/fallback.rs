use crate::api::{ReviewFilter, SubmissionFilter};
use crate::models::{Id, NewProject, Project, Review, Submission, User};
use super::{EntityStore, StoreError};

/// Store that answers from `primary` and falls back to `secondary` only
/// when the primary reports [`StoreError::Unavailable`].
pub struct FallbackStore<P, S> {
    primary: P,
    secondary: S,
}

impl<P: EntityStore, S: EntityStore> FallbackStore<P, S> {
    pub fn new(primary: P, secondary: S) -> Self {
        Self { primary, secondary }
    }

    pub fn primary(&self) -> &P {
        &self.primary
    }

    pub fn secondary(&self) -> &S {
        &self.secondary
    }

    fn fall_back<T>(
        &self,
        operation: &str,
        primary: impl FnOnce() -> Result<T, StoreError>,
        secondary: impl FnOnce() -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        match primary() {
            Err(StoreError::Unavailable(err)) => {
                log::debug!("{} store failed to {}: {}", self.primary.source(), operation, err);
                log::info!("API server not available, using {} store", self.secondary.source());
                secondary()
            }
            other => other,
        }
    }
}

impl<P: EntityStore, S: EntityStore> EntityStore for FallbackStore<P, S> {
    fn source(&self) -> &'static str {
        self.primary.source()
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.fall_back("list users", || self.primary.list_users(), || self.secondary.list_users())
    }

    fn list_projects(&self) -> Result<Vec<Project>, StoreError> {
        self.fall_back("list projects", || self.primary.list_projects(), || self.secondary.list_projects())
    }

    fn list_reviews(&self, filter: &ReviewFilter) -> Result<Vec<Review>, StoreError> {
        self.fall_back(
            "list reviews",
            || self.primary.list_reviews(filter),
            || self.secondary.list_reviews(filter),
        )
    }

    fn list_submissions(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, StoreError> {
        self.fall_back(
            "list submissions",
            || self.primary.list_submissions(filter),
            || self.secondary.list_submissions(filter),
        )
    }

    fn create_project(&self, project: &NewProject) -> Result<Project, StoreError> {
        self.fall_back(
            "create project",
            || self.primary.create_project(project),
            || self.secondary.create_project(project),
        )
    }

    fn delete_project(&self, id: Id) -> Result<(), StoreError> {
        self.fall_back(
            "delete project",
            || self.primary.delete_project(id),
            || self.secondary.delete_project(id),
        )
    }
}
