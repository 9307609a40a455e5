use std::collections::HashMap;
use crate::models::{Id, Project, Review, Submission, User};

/// Placeholder for an unresolved reviewer/reviewee
pub const UNKNOWN: &str = "Unknown";
/// Placeholder for an unresolved user in user listings
pub const UNKNOWN_USER: &str = "Unknown User";
/// Placeholder for an unresolved assigned or submitting student
pub const UNKNOWN_STUDENT: &str = "Unknown Student";

/// Entities addressable by id
pub trait Identified {
    fn id(&self) -> Id;
}

/// Entities with a human-readable label
pub trait Named {
    fn name(&self) -> &str;
}

impl Identified for User {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for Project {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for Review {
    fn id(&self) -> Id {
        self.id
    }
}

impl Identified for Submission {
    fn id(&self) -> Id {
        self.id
    }
}

impl Named for User {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for Project {
    fn name(&self) -> &str {
        &self.title
    }
}

/// Outcome of a reference lookup. `Unknown` is a value, not an error.
#[derive(Debug, PartialEq)]
pub enum Resolved<'a, T> {
    Found(&'a T),
    Unknown,
}

impl<'a, T> Clone for Resolved<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Resolved<'a, T> {}

impl<'a, T> Resolved<'a, T> {
    pub fn found(self) -> Option<&'a T> {
        match self {
            Resolved::Found(entity) => Some(entity),
            Resolved::Unknown => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Resolved::Unknown)
    }
}

impl<'a, T: Named> Resolved<'a, T> {
    /// Entity name, or `placeholder` for an unresolved reference
    pub fn name_or(self, placeholder: &'a str) -> &'a str {
        match self {
            Resolved::Found(entity) => entity.name(),
            Resolved::Unknown => placeholder,
        }
    }
}

/// Find the first entity in `collection` with the given id.
///
/// A missing id (`None`) and an id with no match both resolve to
/// `Resolved::Unknown`.
pub fn resolve<T: Identified>(id: Option<Id>, collection: &[T]) -> Resolved<'_, T> {
    let Some(id) = id else {
        return Resolved::Unknown;
    };
    collection
        .iter()
        .find(|entity| entity.id() == id)
        .map_or(Resolved::Unknown, Resolved::Found)
}

/// Hash index over a collection with the same answers as [`resolve`].
///
/// When ids repeat, the first occurrence wins, matching the linear scan.
pub struct EntityIndex<'a, T> {
    by_id: HashMap<Id, &'a T>,
}

impl<'a, T: Identified> EntityIndex<'a, T> {
    pub fn new(collection: &'a [T]) -> Self {
        let mut by_id = HashMap::with_capacity(collection.len());
        for entity in collection {
            by_id.entry(entity.id()).or_insert(entity);
        }
        Self { by_id }
    }

    pub fn get(&self, id: Option<Id>) -> Resolved<'a, T> {
        id.and_then(|id| self.by_id.get(&id).copied())
            .map_or(Resolved::Unknown, Resolved::Found)
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;

    fn users() -> Vec<User> {
        vec![
            User::new(1, "Ada", UserRole::Student),
            User::new(2, "Grace", UserRole::Teacher),
            User::new(1, "Shadow", UserRole::Admin),
        ]
    }

    #[test]
    fn test_resolve_finds_first_match() {
        let users = users();
        let found = resolve(Some(1), &users);
        assert_eq!(found.found().map(|u| u.name.as_str()), Some("Ada"));
        assert_eq!(resolve(Some(2), &users).name_or(UNKNOWN_USER), "Grace");
    }

    #[test]
    fn test_resolve_missing_id_is_unknown() {
        let users = users();
        let missing = resolve(Some(42), &users);
        assert!(missing.is_unknown());
        assert_eq!(missing.name_or(UNKNOWN_STUDENT), "Unknown Student");
    }

    #[test]
    fn test_resolve_none_is_unknown() {
        let users = users();
        assert!(resolve(None, &users).is_unknown());
        assert!(resolve::<User>(Some(1), &[]).is_unknown());
    }

    #[test]
    fn test_index_matches_linear_scan() {
        let users = users();
        let index = EntityIndex::new(&users);
        assert_eq!(index.len(), 2);
        for id in [None, Some(1), Some(2), Some(3)] {
            assert_eq!(index.get(id), resolve(id, &users));
        }
        assert_eq!(index.get(Some(1)).name_or(UNKNOWN), "Ada");
    }

    #[test]
    fn test_project_name_is_title() {
        let date = chrono::NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
        let projects = vec![Project::new(10, "Essay", "", date)];
        assert_eq!(resolve(Some(10), &projects).name_or(UNKNOWN), "Essay");
    }
}
