// Core data models for CITRIQ
// These structs represent the domain entities exchanged with the review service

pub mod user;
pub mod project;
pub mod review;
pub mod submission;
pub mod snapshot;

pub use user::*;
pub use project::*;
pub use review::*;
pub use submission::*;
pub use snapshot::*;

/// Canonical entity id. Every id in the data model uses this type; the JSON
/// boundary rejects string-encoded ids instead of coercing them.
pub type Id = i64;
