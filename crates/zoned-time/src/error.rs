//! Error types for zoned-time operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ZonedTimeError {
    #[error("Invalid instant: {0}")]
    InvalidInstant(String),

    #[error("Invalid civil time: {0}")]
    InvalidCivilTime(String),

    #[error("Unsupported timezone: {0}")]
    UnsupportedTimezone(String),

    /// The gap search horizon was exhausted without finding an existing
    /// civil time.
    #[error("Unresolvable civil time: {0}")]
    UnresolvableCivilTime(String),

    #[error("Year out of range: {0} (supported: 1970-2100)")]
    YearOutOfRange(i32),

    #[error("No DST transitions: {0}")]
    NoTransitions(String),

    #[error("Invalid working hours: {0}")]
    InvalidWorkingHours(String),

    #[error("Invalid working days: {0}")]
    InvalidWorkingDays(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ZonedTimeError>;
