use serde::{Deserialize, Serialize};
use super::{Project, Review, Submission, User};

/// Point-in-time copy of every entity collection.
///
/// This is the format of `citriq import` files and what `citriq sync` pulls
/// from the review service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
            && self.projects.is_empty()
            && self.reviews.is_empty()
            && self.submissions.is_empty()
    }
}
