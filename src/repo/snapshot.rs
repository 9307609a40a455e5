use rusqlite::Connection;
use crate::api::{ReviewFilter, SubmissionFilter};
use crate::models::Snapshot;
use super::{ProjectRepo, ReviewRepo, SubmissionRepo, UserRepo};
use anyhow::{Context, Result};

/// Number of records written by a snapshot import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub users: usize,
    pub projects: usize,
    pub reviews: usize,
    pub submissions: usize,
}

/// Whole-store operations on the local database
pub struct SnapshotRepo;

impl SnapshotRepo {
    /// Replace everything in the local store with `snapshot`.
    ///
    /// Reviews and submissions embedded in projects are stored as well;
    /// when an id appears more than once the first occurrence is kept.
    pub fn replace(conn: &Connection, snapshot: &Snapshot) -> Result<ImportSummary> {
        let tx = conn.unchecked_transaction()?;
        for table in ["reviews", "submissions", "project_students", "projects", "users"] {
            tx.execute(&format!("DELETE FROM {}", table), [])
                .with_context(|| format!("Failed to clear {}", table))?;
        }

        let mut summary = ImportSummary::default();
        for user in &snapshot.users {
            summary.users += UserRepo::insert(&tx, user)? as usize;
        }
        for project in &snapshot.projects {
            summary.projects += ProjectRepo::insert(&tx, project)? as usize;
        }
        for review in &snapshot.reviews {
            summary.reviews += ReviewRepo::insert(&tx, review)? as usize;
        }
        for submission in &snapshot.submissions {
            summary.submissions += SubmissionRepo::insert(&tx, submission)? as usize;
        }

        for project in &snapshot.projects {
            for review in &project.reviews {
                let mut review = review.clone();
                if review.project.is_none() {
                    review.project = Some(project.snapshot());
                }
                summary.reviews += ReviewRepo::insert(&tx, &review)? as usize;
            }
            for submission in &project.submissions {
                let mut submission = submission.clone();
                submission.project_id.get_or_insert(project.id);
                summary.submissions += SubmissionRepo::insert(&tx, &submission)? as usize;
            }
        }

        tx.commit()?;
        log::info!(
            "local store replaced: {} users, {} projects, {} reviews, {} submissions",
            summary.users, summary.projects, summary.reviews, summary.submissions
        );
        Ok(summary)
    }

    /// Read the whole local store back as a snapshot
    pub fn load(conn: &Connection) -> Result<Snapshot> {
        Ok(Snapshot {
            users: UserRepo::list(conn)?,
            projects: ProjectRepo::list(conn)?,
            reviews: ReviewRepo::list(conn, &ReviewFilter::default())?,
            submissions: SubmissionRepo::list(conn, &SubmissionFilter::default())?,
        })
    }
}
