// Error handling utilities for consistent error messages and exit codes

use std::process;
use crate::api::ApiError;
use crate::models::DraftError;
use crate::overview::AggregateError;
use crate::store::StoreError;

/// Exit with a user error (exit code 1)
/// User errors are for invalid input, missing resources, an unreachable service, etc.
pub fn user_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

/// Exit with an internal error (exit code 2)
/// Internal errors are for unexpected system failures, database corruption, etc.
pub fn internal_error(message: &str) -> ! {
    eprintln!("Internal error: {}", message);
    process::exit(2);
}

/// Exit code for an error that reached `main`.
///
/// Store, API and validation errors are the user's to fix (1); local
/// database failures and anything unclassified are internal (2).
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if let Some(store_err) = err.downcast_ref::<StoreError>() {
        return match store_err {
            StoreError::Local(_) => 2,
            _ => 1,
        };
    }
    if err.downcast_ref::<ApiError>().is_some()
        || err.downcast_ref::<DraftError>().is_some()
        || err.downcast_ref::<AggregateError>().is_some()
    {
        return 1;
    }
    2
}

/// Validate that a string is not empty
pub fn validate_non_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate that an entity ID is valid (positive integer)
pub fn validate_id(id_str: &str, entity: &str) -> Result<i64, String> {
    id_str.trim().parse::<i64>()
        .map_err(|_| format!("Invalid {} ID: '{}'. {} ID must be a number.", entity.to_lowercase(), id_str, entity))
        .and_then(|id| {
            if id > 0 {
                Ok(id)
            } else {
                Err(format!("Invalid {} ID: {}. {} ID must be positive.", entity.to_lowercase(), id, entity))
            }
        })
}
