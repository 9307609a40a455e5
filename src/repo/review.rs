use rusqlite::{Connection, OptionalExtension};
use crate::api::ReviewFilter;
use crate::models::{Id, Project, Review};
use super::{conversion_error, ts_to_datetime};
use anyhow::{Context, Result};

const REVIEW_COLUMNS: &str =
    "id, project_json, reviewer_id, reviewee_id, rating, comment, submitted_ts";

/// Review repository for the local store
///
/// Reviews keep the project snapshot they were delivered with, so a review
/// can outlive (or predate) the project row it points at.
pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review with its service-assigned id.
    /// Returns false when a review with that id is already stored.
    pub fn insert(conn: &Connection, review: &Review) -> Result<bool> {
        let project_json = review
            .project
            .as_ref()
            .map(|p| serde_json::to_string(&p.snapshot()))
            .transpose()?;

        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO reviews
                 (id, project_id, project_json, reviewer_id, reviewee_id, rating, comment, submitted_ts)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                rusqlite::params![
                    review.id,
                    review.project_id(),
                    project_json,
                    review.reviewer_id,
                    review.reviewee_id,
                    review.rating,
                    review.comment,
                    review.submitted_at.timestamp(),
                ],
            )
            .with_context(|| format!("Failed to store review {}", review.id))?;
        Ok(inserted > 0)
    }

    /// Get review by ID
    pub fn get_by_id(conn: &Connection, id: Id) -> Result<Option<Review>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM reviews WHERE id = ?1", REVIEW_COLUMNS))?;
        let review = stmt.query_row([id], review_from_row).optional()?;
        Ok(review)
    }

    /// List reviews matching the filter, ordered by id
    pub fn list(conn: &Connection, filter: &ReviewFilter) -> Result<Vec<Review>> {
        let mut stmt = conn.prepare(&format!("SELECT {} FROM reviews ORDER BY id", REVIEW_COLUMNS))?;
        let rows = stmt.query_map([], review_from_row)?;

        let mut reviews = Vec::new();
        for row in rows {
            let review = row?;
            if filter.matches(&review) {
                reviews.push(review);
            }
        }
        Ok(reviews)
    }

    /// Reviews filed under a project, ordered by id
    pub fn list_for_project(conn: &Connection, project_id: Id) -> Result<Vec<Review>> {
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM reviews WHERE project_id = ?1 ORDER BY id",
            REVIEW_COLUMNS
        ))?;
        let rows = stmt.query_map([project_id], review_from_row)?;

        let mut reviews = Vec::new();
        for row in rows {
            reviews.push(row?);
        }
        Ok(reviews)
    }
}

fn review_from_row(row: &rusqlite::Row) -> rusqlite::Result<Review> {
    let project_json: Option<String> = row.get(1)?;
    let project = project_json
        .map(|json| serde_json::from_str::<Project>(&json))
        .transpose()
        .map_err(|e| conversion_error(1, format!("invalid project snapshot: {}", e)))?;

    Ok(Review {
        id: row.get(0)?,
        project,
        reviewer_id: row.get(2)?,
        reviewee_id: row.get(3)?,
        rating: row.get(4)?,
        comment: row.get(5)?,
        submitted_at: ts_to_datetime(6, row.get(6)?)?,
    })
}
