use rusqlite::{Connection, Result};
use std::collections::HashMap;

/// Current database schema version
const CURRENT_VERSION: u32 = 2;

/// Migration system for managing the local store schema
pub struct MigrationManager;

impl MigrationManager {
    /// Initialize the database with the current schema
    /// This creates the schema_version table and applies all migrations
    pub fn initialize(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            )",
            [],
        )?;

        let current_version = Self::get_version(conn).unwrap_or(0);

        for version in (current_version + 1)..=CURRENT_VERSION {
            Self::apply_migration(conn, version)?;
        }

        conn.execute("PRAGMA foreign_keys=ON", [])?;
        Ok(())
    }

    /// Apply a specific migration by version number
    fn apply_migration(conn: &Connection, version: u32) -> Result<()> {
        let migrations = get_migrations();
        if let Some(migration) = migrations.get(&version) {
            let tx = conn.unchecked_transaction()?;
            migration(&tx)?;
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                [version],
            )?;
            tx.commit()?;
            log::debug!("applied local store migration v{}", version);
            Ok(())
        } else {
            Err(rusqlite::Error::SqliteFailure(
                rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_MISUSE),
                Some(format!("No migration found for version {}", version)),
            ))
        }
    }

    /// Get the current schema version
    pub fn get_version(conn: &Connection) -> Result<u32> {
        conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
    }
}

/// Get all migrations indexed by version
fn get_migrations() -> HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> {
    let mut migrations: HashMap<u32, fn(&rusqlite::Transaction) -> Result<(), rusqlite::Error>> = HashMap::new();
    migrations.insert(1, migration_v1);
    migrations.insert(2, migration_v2);
    migrations
}

/// Migration v1: Initial schema
fn migration_v1(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute(
        "CREATE TABLE users (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            role TEXT NOT NULL CHECK(role IN ('student','teacher','admin'))
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE projects (
            id INTEGER PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            due_date TEXT NOT NULL,
            status TEXT NOT NULL
        )",
        [],
    )?;

    // No foreign key on student_id: assignments may point at users that
    // are not in the store and must survive as unknown references.
    tx.execute(
        "CREATE TABLE project_students (
            project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
            student_id INTEGER NOT NULL,
            position INTEGER NOT NULL,
            PRIMARY KEY(project_id, student_id)
        )",
        [],
    )?;

    // project_json holds the denormalized project snapshot the review was
    // delivered with; project_id is kept alongside for filtering.
    tx.execute(
        "CREATE TABLE reviews (
            id INTEGER PRIMARY KEY,
            project_id INTEGER NULL,
            project_json TEXT NULL,
            reviewer_id INTEGER NOT NULL,
            reviewee_id INTEGER NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT NOT NULL DEFAULT '',
            submitted_ts INTEGER NOT NULL
        )",
        [],
    )?;

    tx.execute(
        "CREATE TABLE submissions (
            id INTEGER PRIMARY KEY,
            project_id INTEGER NULL,
            student_id INTEGER NOT NULL,
            content TEXT NOT NULL,
            status TEXT NOT NULL,
            submitted_ts INTEGER NOT NULL
        )",
        [],
    )?;

    Ok(())
}

/// Migration v2: Indexes for per-user and per-project lookups
fn migration_v2(tx: &rusqlite::Transaction) -> Result<(), rusqlite::Error> {
    tx.execute("CREATE INDEX idx_reviews_project_id ON reviews(project_id)", [])?;
    tx.execute("CREATE INDEX idx_reviews_reviewer_id ON reviews(reviewer_id)", [])?;
    tx.execute("CREATE INDEX idx_reviews_reviewee_id ON reviews(reviewee_id)", [])?;
    tx.execute("CREATE INDEX idx_submissions_project_id ON submissions(project_id)", [])?;
    tx.execute("CREATE INDEX idx_submissions_student_id ON submissions(student_id)", [])?;
    Ok(())
}
