use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use crate::models::{Id, Project, ProjectDraft, ProjectStatus, SubmissionStatus, User};
use crate::overview::{assigned_student_names, EntityIndex, UNKNOWN_STUDENT};

/// A project mutation that is waiting on the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    CreateProject,
    DeleteProject(Id),
}

/// Admin dashboard view-state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminState {
    pub show_add_form: bool,
    pub draft: ProjectDraft,
    /// Project whose submissions are open, if any
    pub selected_project: Option<Id>,
    in_flight: Option<Mutation>,
}

impl AdminState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_form(&mut self) {
        self.show_add_form = true;
    }

    /// Hide the form and drop whatever was typed into it
    pub fn cancel_form(&mut self) {
        self.show_add_form = false;
        self.draft.reset();
    }

    pub fn view_submissions(&mut self, project_id: Id) {
        self.selected_project = Some(project_id);
    }

    pub fn close_submissions(&mut self) {
        self.selected_project = None;
    }

    pub fn in_flight(&self) -> Option<Mutation> {
        self.in_flight
    }

    /// Mark `mutation` as started. Returns false, leaving state untouched,
    /// while another mutation is still in flight.
    #[must_use]
    pub fn begin(&mut self, mutation: Mutation) -> bool {
        if self.in_flight.is_some() {
            log::debug!("ignoring {:?}, {:?} still in flight", mutation, self.in_flight);
            return false;
        }
        self.in_flight = Some(mutation);
        true
    }

    /// Clear the in-flight mutation. On success a created project resets
    /// the form and a deleted project closes its submissions view.
    pub fn finish(&mut self, succeeded: bool) {
        let Some(mutation) = self.in_flight.take() else {
            return;
        };
        if !succeeded {
            return;
        }
        match mutation {
            Mutation::CreateProject => {
                self.draft.reset();
                self.show_add_form = false;
            }
            Mutation::DeleteProject(id) => {
                if self.selected_project == Some(id) {
                    self.selected_project = None;
                }
            }
        }
    }
}

/// One project as shown on the admin dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCard {
    pub id: Id,
    pub title: String,
    pub status: ProjectStatus,
    pub description: String,
    pub due_date: NaiveDate,
    pub students: Vec<String>,
    pub review_count: usize,
    pub submission_count: usize,
    pub can_view_submissions: bool,
}

impl ProjectCard {
    pub fn build(project: &Project, users: &[User]) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            status: project.status.clone(),
            description: project.description.clone(),
            due_date: project.due_date,
            students: assigned_student_names(project, users)
                .into_iter()
                .map(str::to_string)
                .collect(),
            review_count: project.reviews.len(),
            submission_count: project.submissions.len(),
            can_view_submissions: !project.submissions.is_empty(),
        }
    }
}

/// One row of a project's submissions view
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRow {
    pub id: Id,
    pub student: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
    pub content: String,
}

impl SubmissionRow {
    /// Rows for every submission filed under `project`, in stored order
    pub fn for_project(project: &Project, users: &[User]) -> Vec<Self> {
        let index = EntityIndex::new(users);
        project
            .submissions
            .iter()
            .map(|submission| Self {
                id: submission.id,
                student: index.get(Some(submission.student_id)).name_or(UNKNOWN_STUDENT).to_string(),
                status: submission.status,
                submitted_at: submission.submitted_at,
                content: submission.content.clone(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Submission, UserRole};

    fn project() -> Project {
        let mut project = Project::new(10, "Essay", "Write it", NaiveDate::from_ymd_opt(2026, 5, 1).unwrap());
        project.assigned_students = vec![1, 42];
        project
    }

    fn users() -> Vec<User> {
        vec![User::new(1, "Ada", UserRole::Student), User::new(2, "Grace", UserRole::Teacher)]
    }

    #[test]
    fn test_create_success_resets_form() {
        let mut state = AdminState::new();
        state.open_form();
        state.draft.title = "Essay".to_string();
        state.draft.toggle_student(3);

        assert!(state.begin(Mutation::CreateProject));
        state.finish(true);

        assert!(!state.show_add_form);
        assert_eq!(state.draft, ProjectDraft::default());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn test_failed_create_keeps_draft() {
        let mut state = AdminState::new();
        state.open_form();
        state.draft.title = "Essay".to_string();

        assert!(state.begin(Mutation::CreateProject));
        state.finish(false);

        assert!(state.show_add_form);
        assert_eq!(state.draft.title, "Essay");
    }

    #[test]
    fn test_second_mutation_refused_while_in_flight() {
        let mut state = AdminState::new();
        assert!(state.begin(Mutation::DeleteProject(4)));
        assert!(!state.begin(Mutation::DeleteProject(5)));
        assert!(!state.begin(Mutation::CreateProject));
        assert_eq!(state.in_flight(), Some(Mutation::DeleteProject(4)));

        state.finish(true);
        assert!(state.begin(Mutation::DeleteProject(5)));
    }

    #[test]
    fn test_deleting_selected_project_closes_submissions() {
        let mut state = AdminState::new();
        state.view_submissions(4);
        assert!(state.begin(Mutation::DeleteProject(4)));
        state.finish(true);
        assert_eq!(state.selected_project, None);
    }

    #[test]
    fn test_cancel_form_clears_draft() {
        let mut state = AdminState::new();
        state.open_form();
        state.draft.description = "half typed".to_string();
        state.cancel_form();
        assert!(!state.show_add_form);
        assert!(state.draft.description.is_empty());
    }

    #[test]
    fn test_project_card() {
        let card = ProjectCard::build(&project(), &users());
        assert_eq!(card.students, vec!["Ada", "Unknown Student"]);
        assert_eq!(card.review_count, 0);
        assert!(!card.can_view_submissions);
    }

    #[test]
    fn test_submission_rows_use_placeholder() {
        let mut project = project();
        project.submissions.push(Submission {
            id: 5,
            project_id: Some(10),
            student_id: 99,
            content: "link".to_string(),
            status: SubmissionStatus::Late,
            submitted_at: Utc::now(),
        });

        let card = ProjectCard::build(&project, &users());
        assert!(card.can_view_submissions);

        let rows = SubmissionRow::for_project(&project, &users());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].student, "Unknown Student");
        assert_eq!(rows[0].status, SubmissionStatus::Late);
    }
}
