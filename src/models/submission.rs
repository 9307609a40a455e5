use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use super::Id;

/// Submission status. A payload without a status counts as submitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionStatus {
    #[default]
    Submitted,
    Graded,
    Late,
    #[serde(other)]
    Other,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Graded => "graded",
            SubmissionStatus::Late => "late",
            SubmissionStatus::Other => "other",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "submitted" => Some(SubmissionStatus::Submitted),
            "graded" => Some(SubmissionStatus::Graded),
            "late" => Some(SubmissionStatus::Late),
            "other" => Some(SubmissionStatus::Other),
            _ => None,
        }
    }
}

/// Submission model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: Id,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<Id>,
    pub student_id: Id,
    pub content: String,
    #[serde(default)]
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Payload for creating or updating a submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubmission {
    pub project_id: Id,
    pub student_id: Id,
    pub content: String,
}
