use rusqlite::Connection;
use crate::api::SubmissionFilter;
use crate::models::{Id, Submission, SubmissionStatus};
use super::{conversion_error, ts_to_datetime};
use anyhow::{Context, Result};

const SUBMISSION_COLUMNS: &str = "id, project_id, student_id, content, status, submitted_ts";

/// Submission repository for the local store
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a submission with its service-assigned id.
    /// Returns false when a submission with that id is already stored.
    pub fn insert(conn: &Connection, submission: &Submission) -> Result<bool> {
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO submissions
                 (id, project_id, student_id, content, status, submitted_ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    submission.id,
                    submission.project_id,
                    submission.student_id,
                    submission.content,
                    submission.status.as_str(),
                    submission.submitted_at.timestamp(),
                ],
            )
            .with_context(|| format!("Failed to store submission {}", submission.id))?;
        Ok(inserted > 0)
    }

    /// List submissions matching the filter, ordered by id
    pub fn list(conn: &Connection, filter: &SubmissionFilter) -> Result<Vec<Submission>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM submissions ORDER BY id",
            SUBMISSION_COLUMNS
        ))?;
        let rows = stmt.query_map([], submission_from_row)?;

        let mut submissions = Vec::new();
        for row in rows {
            let submission = row?;
            if filter.matches(&submission) {
                submissions.push(submission);
            }
        }
        Ok(submissions)
    }

    /// Submissions filed under a project, ordered by id
    pub fn list_for_project(conn: &Connection, project_id: Id) -> Result<Vec<Submission>> {
        Self::list(conn, &SubmissionFilter::for_project(project_id))
    }
}

fn submission_from_row(row: &rusqlite::Row) -> rusqlite::Result<Submission> {
    let status: String = row.get(4)?;
    Ok(Submission {
        id: row.get(0)?,
        project_id: row.get(1)?,
        student_id: row.get(2)?,
        content: row.get(3)?,
        status: SubmissionStatus::from_str(&status)
            .ok_or_else(|| conversion_error(4, format!("unknown submission status '{}'", status)))?,
        submitted_at: ts_to_datetime(5, row.get(5)?)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;
    use chrono::Utc;

    fn submission(id: Id, project_id: Option<Id>, student_id: Id) -> Submission {
        Submission {
            id,
            project_id,
            student_id,
            content: format!("work {}", id),
            status: SubmissionStatus::Submitted,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_insert_and_list_for_project() {
        let conn = DbConnection::connect_in_memory().unwrap();
        SubmissionRepo::insert(&conn, &submission(1, Some(10), 4)).unwrap();
        SubmissionRepo::insert(&conn, &submission(2, Some(11), 4)).unwrap();
        SubmissionRepo::insert(&conn, &submission(3, Some(10), 5)).unwrap();

        let ids: Vec<Id> = SubmissionRepo::list_for_project(&conn, 10)
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_status_roundtrips() {
        let conn = DbConnection::connect_in_memory().unwrap();
        let mut graded = submission(1, None, 4);
        graded.status = SubmissionStatus::Graded;
        SubmissionRepo::insert(&conn, &graded).unwrap();

        let stored = SubmissionRepo::list(&conn, &SubmissionFilter::default()).unwrap();
        assert_eq!(stored[0].status, SubmissionStatus::Graded);
        assert_eq!(stored[0].project_id, None);
    }
}
