// Query filters for list endpoints
//
// The same filter drives the REST query string and the local store, so both
// sources answer a list request identically.

use crate::models::{Id, Review, Submission};

/// Filter for listing reviews. Absent fields do not constrain the result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub project_id: Option<Id>,
    /// Reviewer or reviewee
    pub user_id: Option<Id>,
    pub reviewer_id: Option<Id>,
    pub reviewee_id: Option<Id>,
}

impl ReviewFilter {
    /// Reviews written or received by the user
    pub fn for_user(user_id: Id) -> Self {
        Self {
            user_id: Some(user_id),
            ..Self::default()
        }
    }

    pub fn for_project(project_id: Id) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_param(&mut query, "projectId", self.project_id);
        push_param(&mut query, "userId", self.user_id);
        push_param(&mut query, "reviewerId", self.reviewer_id);
        push_param(&mut query, "revieweeId", self.reviewee_id);
        query
    }

    pub fn matches(&self, review: &Review) -> bool {
        self.project_id.map_or(true, |id| review.project_id() == Some(id))
            && self.user_id.map_or(true, |id| review.involves(id))
            && self.reviewer_id.map_or(true, |id| review.reviewer_id == id)
            && self.reviewee_id.map_or(true, |id| review.reviewee_id == id)
    }
}

/// Filter for listing submissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFilter {
    pub project_id: Option<Id>,
    /// Submitting student
    pub user_id: Option<Id>,
    pub student_id: Option<Id>,
}

impl SubmissionFilter {
    pub fn for_project(project_id: Id) -> Self {
        Self {
            project_id: Some(project_id),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        push_param(&mut query, "projectId", self.project_id);
        push_param(&mut query, "userId", self.user_id);
        push_param(&mut query, "studentId", self.student_id);
        query
    }

    pub fn matches(&self, submission: &Submission) -> bool {
        self.project_id.map_or(true, |id| submission.project_id == Some(id))
            && self.user_id.map_or(true, |id| submission.student_id == id)
            && self.student_id.map_or(true, |id| submission.student_id == id)
    }
}

fn push_param(query: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<Id>) {
    if let Some(value) = value {
        query.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Project, SubmissionStatus};
    use chrono::{NaiveDate, Utc};

    fn review(project_id: Id, reviewer: Id, reviewee: Id) -> Review {
        let due = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        Review::new(1, Project::new(project_id, "P", "", due), reviewer, reviewee, 4)
    }

    #[test]
    fn test_empty_filter_has_no_query() {
        assert!(ReviewFilter::default().to_query().is_empty());
        assert!(SubmissionFilter::default().to_query().is_empty());
    }

    #[test]
    fn test_review_filter_query_omits_absent_fields() {
        let filter = ReviewFilter {
            project_id: Some(3),
            reviewee_id: Some(8),
            ..ReviewFilter::default()
        };
        assert_eq!(
            filter.to_query(),
            vec![("projectId", "3".to_string()), ("revieweeId", "8".to_string())]
        );
    }

    #[test]
    fn test_review_filter_user_matches_either_side() {
        let filter = ReviewFilter::for_user(7);
        assert!(filter.matches(&review(1, 7, 9)));
        assert!(filter.matches(&review(1, 9, 7)));
        assert!(!filter.matches(&review(1, 8, 9)));
    }

    #[test]
    fn test_review_filter_combines_fields() {
        let filter = ReviewFilter {
            project_id: Some(2),
            reviewer_id: Some(7),
            ..ReviewFilter::default()
        };
        assert!(filter.matches(&review(2, 7, 9)));
        assert!(!filter.matches(&review(3, 7, 9)));
        assert!(!filter.matches(&review(2, 9, 7)));
    }

    #[test]
    fn test_submission_filter() {
        let submission = Submission {
            id: 1,
            project_id: Some(4),
            student_id: 6,
            content: "essay".to_string(),
            status: SubmissionStatus::Submitted,
            submitted_at: Utc::now(),
        };
        assert!(SubmissionFilter::for_project(4).matches(&submission));
        assert!(!SubmissionFilter::for_project(5).matches(&submission));
        let by_student = SubmissionFilter { student_id: Some(6), ..SubmissionFilter::default() };
        assert!(by_student.matches(&submission));
        assert_eq!(by_student.to_query(), vec![("studentId", "6".to_string())]);
    }
}
