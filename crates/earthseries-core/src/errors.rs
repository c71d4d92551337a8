use thiserror::Error;

/// Error type for series generation.
#[derive(Error, Debug)]
pub enum SeriesError {
    #[error("Invalid profile: {field} {reason}")]
    InvalidProfile { field: String, reason: String },
    #[error("Empty year range: start year {start} is after end year {end}")]
    EmptyYearRange { start: i32, end: i32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience type for `Result<T, SeriesError>`.
pub type SeriesResult<T> = Result<T, SeriesError>;
