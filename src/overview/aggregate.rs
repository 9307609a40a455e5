use std::collections::HashMap;
use thiserror::Error;
use crate::models::{Id, Project, Review};

/// Reviews of one project, split by the user's side of the review
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectReviews<'a> {
    /// First project snapshot seen for this project id
    pub project: &'a Project,
    pub reviews_given: Vec<&'a Review>,
    pub reviews_received: Vec<&'a Review>,
}

/// Per-project buckets, iterated in first-encounter order of project id
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewsByProject<'a> {
    buckets: Vec<ProjectReviews<'a>>,
    positions: HashMap<Id, usize>,
}

impl<'a> ReviewsByProject<'a> {
    pub fn get(&self, project_id: Id) -> Option<&ProjectReviews<'a>> {
        self.positions.get(&project_id).map(|&pos| &self.buckets[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProjectReviews<'a>> {
        self.buckets.iter()
    }

    pub fn project_ids(&self) -> Vec<Id> {
        self.buckets.iter().map(|bucket| bucket.project.id).collect()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    fn bucket_for(&mut self, project: &'a Project) -> &mut ProjectReviews<'a> {
        let pos = match self.positions.get(&project.id) {
            Some(&pos) => pos,
            None => {
                self.buckets.push(ProjectReviews {
                    project,
                    reviews_given: Vec::new(),
                    reviews_received: Vec::new(),
                });
                let pos = self.buckets.len() - 1;
                self.positions.insert(project.id, pos);
                pos
            }
        };
        &mut self.buckets[pos]
    }
}

impl<'r, 'a> IntoIterator for &'r ReviewsByProject<'a> {
    type Item = &'r ProjectReviews<'a>;
    type IntoIter = std::slice::Iter<'r, ProjectReviews<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Summary counts for one user
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReviewStats {
    pub given_count: usize,
    pub received_count: usize,
    /// Mean received rating rounded to one decimal; `None` with no received reviews
    pub average_rating_received: Option<f64>,
}

impl ReviewStats {
    /// Count over every review, independent of project grouping
    pub fn compute(user_id: Id, reviews: &[Review]) -> Self {
        let given_count = reviews.iter().filter(|r| r.reviewer_id == user_id).count();
        let received: Vec<i64> = reviews
            .iter()
            .filter(|r| r.reviewee_id == user_id)
            .map(|r| i64::from(r.rating))
            .collect();

        let average_rating_received = if received.is_empty() {
            None
        } else {
            let mean = received.iter().sum::<i64>() as f64 / received.len() as f64;
            Some(round_one_decimal(mean))
        };

        Self {
            given_count,
            received_count: received.len(),
            average_rating_received,
        }
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Aggregated reviews of one user
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewOverview<'a> {
    pub by_project: ReviewsByProject<'a>,
    pub stats: ReviewStats,
    /// Reviews where the user is neither reviewer nor reviewee
    pub unclassified: Vec<Id>,
    /// Reviews skipped because they carry no project
    pub malformed: Vec<Id>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("reviews without a project reference: {review_ids:?}")]
    MalformedReviews { review_ids: Vec<Id> },
}

/// Group a user's reviews by project and compute their statistics.
///
/// Fails when any review lacks a project, listing every such review.
pub fn aggregate(user_id: Id, user_reviews: &[Review]) -> Result<ReviewOverview<'_>, AggregateError> {
    let overview = aggregate_lenient(user_id, user_reviews);
    if overview.malformed.is_empty() {
        Ok(overview)
    } else {
        Err(AggregateError::MalformedReviews {
            review_ids: overview.malformed,
        })
    }
}

/// Same pass as [`aggregate`], but reviews without a project are skipped
/// and reported in [`ReviewOverview::malformed`].
///
/// A review written by the user lands in `reviews_given` even if it also
/// names the user as reviewee; reviews naming the user on neither side are
/// left out of every bucket and listed in `unclassified`. Such a self-review
/// still counts toward both `given_count` and `received_count`, so the
/// stats can exceed what the buckets list.
pub fn aggregate_lenient(user_id: Id, user_reviews: &[Review]) -> ReviewOverview<'_> {
    let mut by_project = ReviewsByProject::default();
    let mut unclassified = Vec::new();
    let mut malformed = Vec::new();

    for review in user_reviews {
        let Some(project) = review.project.as_ref() else {
            log::debug!("review {} has no project, skipping", review.id);
            malformed.push(review.id);
            continue;
        };

        let bucket = by_project.bucket_for(project);
        if review.reviewer_id == user_id {
            bucket.reviews_given.push(review);
        } else if review.reviewee_id == user_id {
            bucket.reviews_received.push(review);
        } else {
            log::warn!(
                "review {} (reviewer {}, reviewee {}) does not involve user {}",
                review.id, review.reviewer_id, review.reviewee_id, user_id
            );
            unclassified.push(review.id);
        }
    }

    ReviewOverview {
        by_project,
        stats: ReviewStats::compute(user_id, user_reviews),
        unclassified,
        malformed,
    }
}
