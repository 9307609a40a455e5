//! CITRIQ - peer review dashboards for class projects
//!
//! This library provides the core functionality for CITRIQ, including:
//! - Entity models for users, projects, reviews and submissions
//! - Reference resolution, project membership and review aggregation
//! - A blocking REST client for the review service
//! - A SQLite local store with migrations, used when the service is down
//! - Dashboard view-models and the CLI built on them
//!
//! # Example
//!
//! ```no_run
//! use citriq::models::Review;
//! use citriq::overview::aggregate;
//!
//! fn summarize(user_id: i64, reviews: &[Review]) {
//!     let overview = aggregate(user_id, reviews).unwrap();
//!     for bucket in &overview.by_project {
//!         println!("{}: {} given, {} received",
//!             bucket.project.title, bucket.reviews_given.len(), bucket.reviews_received.len());
//!     }
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod overview;
pub mod repo;
pub mod store;
pub mod utils;
pub mod views;
