use serde::{Deserialize, Serialize};
use super::Id;

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Teacher => "teacher",
            UserRole::Admin => "admin",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "student" => Some(UserRole::Student),
            "teacher" => Some(UserRole::Teacher),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// User model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub role: UserRole,
}

impl User {
    pub fn new(id: Id, name: impl Into<String>, role: UserRole) -> Self {
        Self {
            id,
            name: name.into(),
            role,
        }
    }

    pub fn is_student(&self) -> bool {
        self.role == UserRole::Student
    }
}

/// Payload for creating a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub role: UserRole,
}
