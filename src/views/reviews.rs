use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use crate::models::{Id, Project, Review, User};
use crate::overview::{aggregate_lenient, projects_for_user, EntityIndex, ReviewOverview, UNKNOWN};

const PREVIEW_CHARS: usize = 100;

/// An assigned project on the student dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedProject {
    pub id: Id,
    pub title: String,
    pub due_date: NaiveDate,
    pub preview: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub projects_assigned: usize,
    pub reviews_given: usize,
    pub reviews_received: usize,
    pub average_rating: Option<f64>,
}

/// A review seen from one side: `counterpart` is the reviewee for a given
/// review and the reviewer for a received one.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLine {
    pub review_id: Id,
    pub counterpart: String,
    pub rating: i32,
    pub comment: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSection {
    pub project_id: Id,
    pub title: String,
    pub given: Vec<ReviewLine>,
    pub received: Vec<ReviewLine>,
}

/// Everything the "my reviews" dashboard shows for one user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewsOverview {
    pub user_id: Id,
    pub projects: Vec<AssignedProject>,
    pub stats: OverviewStats,
    pub sections: Vec<ProjectSection>,
    /// Reviews that named the user on neither side
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unclassified: Vec<Id>,
    /// Reviews dropped for lacking a project
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub malformed: Vec<Id>,
}

impl ReviewsOverview {
    /// Build the overview from a snapshot. `reviews` should be the user's
    /// reviews; anything else ends up in `unclassified`.
    pub fn build(user_id: Id, users: &[User], projects: &[Project], reviews: &[Review]) -> Self {
        let assigned: Vec<AssignedProject> = projects_for_user(user_id, projects)
            .into_iter()
            .map(|project| AssignedProject {
                id: project.id,
                title: project.title.clone(),
                due_date: project.due_date,
                preview: preview(&project.description),
            })
            .collect();

        let ReviewOverview { by_project, stats, unclassified, malformed } = aggregate_lenient(user_id, reviews);
        if !malformed.is_empty() {
            log::warn!("skipped {} review(s) without a project: {:?}", malformed.len(), malformed);
        }

        let names = EntityIndex::new(users);
        let line = |review: &Review, counterpart: Id| ReviewLine {
            review_id: review.id,
            counterpart: names.get(Some(counterpart)).name_or(UNKNOWN).to_string(),
            rating: review.rating,
            comment: review.comment.clone(),
            submitted_at: review.submitted_at,
        };

        let sections = by_project
            .iter()
            .map(|bucket| ProjectSection {
                project_id: bucket.project.id,
                title: bucket.project.title.clone(),
                given: bucket.reviews_given.iter().map(|r| line(r, r.reviewee_id)).collect(),
                received: bucket.reviews_received.iter().map(|r| line(r, r.reviewer_id)).collect(),
            })
            .collect();

        Self {
            user_id,
            stats: OverviewStats {
                projects_assigned: assigned.len(),
                reviews_given: stats.given_count,
                reviews_received: stats.received_count,
                average_rating: stats.average_rating_received,
            },
            projects: assigned,
            sections,
            unclassified,
            malformed,
        }
    }
}

/// First 100 characters of `description`, with `...` appended when cut
pub fn preview(description: &str) -> String {
    match description.char_indices().nth(PREVIEW_CHARS) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}
