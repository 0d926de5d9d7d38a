/// Centralized error types for the market status service
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    // Configuration Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Calendar Construction Errors
    #[error("Invalid trading window: {0}")]
    InvalidWindow(String),

    #[error("Both a DST start and end time must be provided if DST is enabled")]
    IncompleteDstInterval,

    // Calendar Query Errors
    #[error("No calendar configured for year {0}")]
    MissingCalendar(i32),

    #[error("Calendar for year {0} has no trading day at or after the requested instant")]
    CalendarExhausted(i32),

    // File I/O Errors
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ServiceError>;
