use crate::models::{Id, Project, User};
use super::resolve::{EntityIndex, UNKNOWN_STUDENT};

/// Projects that list `user_id` among their assigned students, in input order
pub fn projects_for_user(user_id: Id, projects: &[Project]) -> Vec<&Project> {
    projects
        .iter()
        .filter(|project| project.is_assigned(user_id))
        .collect()
}

/// Users with the student role, in input order
pub fn students(users: &[User]) -> Vec<&User> {
    users.iter().filter(|user| user.is_student()).collect()
}

/// Names of the project's assigned students.
///
/// Ids with no matching user are kept in position as `Unknown Student`.
pub fn assigned_student_names<'a>(project: &Project, users: &'a [User]) -> Vec<&'a str> {
    let index = EntityIndex::new(users);
    project
        .assigned_students
        .iter()
        .map(|id| index.get(Some(*id)).name_or(UNKNOWN_STUDENT))
        .collect()
}
