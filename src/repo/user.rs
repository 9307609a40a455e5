use rusqlite::{Connection, OptionalExtension};
use crate::models::{Id, User, UserRole};
use super::conversion_error;
use anyhow::{Context, Result};

/// User repository for the local store
pub struct UserRepo;

impl UserRepo {
    /// Insert a user with its service-assigned id.
    /// Returns false when a user with that id is already stored.
    pub fn insert(conn: &Connection, user: &User) -> Result<bool> {
        let inserted = conn
            .execute(
                "INSERT OR IGNORE INTO users (id, name, role) VALUES (?1, ?2, ?3)",
                rusqlite::params![user.id, user.name, user.role.as_str()],
            )
            .with_context(|| format!("Failed to store user {}", user.id))?;
        Ok(inserted > 0)
    }

    /// Get user by ID
    pub fn get_by_id(conn: &Connection, id: Id) -> Result<Option<User>> {
        let mut stmt = conn.prepare("SELECT id, name, role FROM users WHERE id = ?1")?;
        let user = stmt.query_row([id], user_from_row).optional()?;
        Ok(user)
    }

    /// List all users ordered by id
    pub fn list(conn: &Connection) -> Result<Vec<User>> {
        let mut stmt = conn.prepare("SELECT id, name, role FROM users ORDER BY id")?;
        let rows = stmt.query_map([], user_from_row)?;

        let mut users = Vec::new();
        for row in rows {
            users.push(row?);
        }
        Ok(users)
    }
}

fn user_from_row(row: &rusqlite::Row) -> rusqlite::Result<User> {
    let role: String = row.get(2)?;
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        role: UserRole::from_str(&role)
            .ok_or_else(|| conversion_error(2, format!("unknown role '{}'", role)))?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbConnection;

    #[test]
    fn test_insert_and_get() {
        let conn = DbConnection::connect_in_memory().unwrap();
        assert!(UserRepo::insert(&conn, &User::new(7, "Ada", UserRole::Student)).unwrap());

        let user = UserRepo::get_by_id(&conn, 7).unwrap().unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.role, UserRole::Student);
        assert!(UserRepo::get_by_id(&conn, 8).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_id_keeps_first() {
        let conn = DbConnection::connect_in_memory().unwrap();
        UserRepo::insert(&conn, &User::new(1, "Ada", UserRole::Student)).unwrap();
        assert!(!UserRepo::insert(&conn, &User::new(1, "Other", UserRole::Admin)).unwrap());

        let users = UserRepo::list(&conn).unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].name, "Ada");
    }

    #[test]
    fn test_list_orders_by_id() {
        let conn = DbConnection::connect_in_memory().unwrap();
        UserRepo::insert(&conn, &User::new(3, "C", UserRole::Teacher)).unwrap();
        UserRepo::insert(&conn, &User::new(1, "A", UserRole::Student)).unwrap();

        let ids: Vec<Id> = UserRepo::list(&conn).unwrap().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }
}
