use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use super::{Id, Review, Submission};

/// Project status
///
/// The review service may report statuses this client does not know about;
/// those are kept verbatim in `Other` so they survive a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectStatus {
    Active,
    Closed,
    Other(String),
}

impl ProjectStatus {
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Active => "active",
            ProjectStatus::Closed => "closed",
            ProjectStatus::Other(raw) => raw,
        }
    }
}

impl From<&str> for ProjectStatus {
    fn from(s: &str) -> Self {
        match s {
            "active" => ProjectStatus::Active,
            "closed" => ProjectStatus::Closed,
            other => ProjectStatus::Other(other.to_string()),
        }
    }
}

impl Serialize for ProjectStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProjectStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(ProjectStatus::from(raw.as_str()))
    }
}

/// Project model
///
/// `reviews` and `submissions` are the denormalized children the service
/// embeds in project payloads. A project snapshot carried inside a review
/// usually has both empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: ProjectStatus,
    #[serde(default)]
    pub assigned_students: Vec<Id>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub submissions: Vec<Submission>,
}

impl Project {
    /// Create an active project with no assignments, reviews or submissions
    pub fn new(id: Id, title: impl Into<String>, description: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            due_date,
            status: ProjectStatus::Active,
            assigned_students: Vec::new(),
            reviews: Vec::new(),
            submissions: Vec::new(),
        }
    }

    pub fn is_assigned(&self, user_id: Id) -> bool {
        self.assigned_students.contains(&user_id)
    }

    /// Copy of this project without embedded reviews and submissions
    pub fn snapshot(&self) -> Project {
        Project {
            reviews: Vec::new(),
            submissions: Vec::new(),
            ..self.clone()
        }
    }
}

/// Payload for creating a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: ProjectStatus,
    pub assigned_students: Vec<Id>,
}

/// Missing field in a project draft
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Project title cannot be empty")]
    MissingTitle,
    #[error("Project description cannot be empty")]
    MissingDescription,
    #[error("Project due date is required")]
    MissingDueDate,
}

/// Form state for the "add project" form.
///
/// Owned by the caller; toggling students and submitting never touch any
/// shared state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    assigned_students: Vec<Id>,
}

impl ProjectDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the student if absent, unassign if present
    pub fn toggle_student(&mut self, student_id: Id) {
        if let Some(pos) = self.assigned_students.iter().position(|id| *id == student_id) {
            self.assigned_students.remove(pos);
        } else {
            self.assigned_students.push(student_id);
        }
    }

    pub fn is_assigned(&self, student_id: Id) -> bool {
        self.assigned_students.contains(&student_id)
    }

    pub fn assigned_students(&self) -> &[Id] {
        &self.assigned_students
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the create payload. Only presence is checked.
    pub fn submit(&self) -> Result<NewProject, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if self.description.trim().is_empty() {
            return Err(DraftError::MissingDescription);
        }
        let due_date = self.due_date.ok_or(DraftError::MissingDueDate)?;

        Ok(NewProject {
            title: self.title.clone(),
            description: self.description.clone(),
            due_date,
            status: ProjectStatus::Active,
            assigned_students: self.assigned_students.clone(),
        })
    }
}
