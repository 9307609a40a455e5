//! View-state and view-models for the dashboards.
//!
//! Everything here is built from an entity snapshot passed in by the
//! caller and owned by the caller; nothing is cached between calls.

pub mod admin;
pub mod reviews;

pub use admin::*;
pub use reviews::*;
