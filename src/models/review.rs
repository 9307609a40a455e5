use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::{Id, Project};

/// Review model
///
/// `project` is a denormalized snapshot of the reviewed project. Payloads
/// without it still decode; the aggregator reports them as malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Project>,
    pub reviewer_id: Id,
    pub reviewee_id: Id,
    pub rating: i32,
    #[serde(default)]
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

impl Review {
    /// Create a review submitted now with an empty comment
    pub fn new(id: Id, project: Project, reviewer_id: Id, reviewee_id: Id, rating: i32) -> Self {
        Self {
            id,
            project: Some(project),
            reviewer_id,
            reviewee_id,
            rating,
            comment: String::new(),
            submitted_at: Utc::now(),
        }
    }

    pub fn project_id(&self) -> Option<Id> {
        self.project.as_ref().map(|p| p.id)
    }

    /// True when the user wrote or received this review
    pub fn involves(&self, user_id: Id) -> bool {
        self.reviewer_id == user_id || self.reviewee_id == user_id
    }
}

/// Payload for creating or updating a review
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub project_id: Id,
    pub reviewer_id: Id,
    pub reviewee_id: Id,
    pub rating: i32,
    pub comment: String,
}
