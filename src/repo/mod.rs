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

use chrono::{DateTime, NaiveDate, Utc};

/// Wrap a bad column value as a rusqlite conversion error
pub(crate) fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, message.into())
}

pub(crate) fn parse_date_column(idx: usize, value: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| conversion_error(idx, format!("invalid date '{}': {}", value, e)))
}

pub(crate) fn ts_to_datetime(idx: usize, ts: i64) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Integer,
            format!("timestamp {} out of range", ts).into(),
        ))
}
