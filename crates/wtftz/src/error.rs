//! Error types for wtftz operations.

use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WtftzError {
    /// The raw timestamp text matched none of the parsing strategies.
    /// Carries the original input verbatim for diagnostics.
    #[error("Cannot parse timestamp {0:?}")]
    UnparseableTimestamp(String),

    /// A zone token resolved to nothing under [`UnknownZonePolicy::Strict`].
    ///
    /// [`UnknownZonePolicy::Strict`]: crate::timezones::UnknownZonePolicy::Strict
    #[error("Unknown timezone {0:?}")]
    UnknownZone(String),

    /// A naive wall-clock time that does not exist in the source zone
    /// (DST spring-forward gap).
    #[error("Local time {time} does not exist in {zone}")]
    NonexistentLocalTime { time: NaiveDateTime, zone: String },
}

pub type Result<T> = std::result::Result<T, WtftzError>;
