/// Error types for the GNSS core library
use thiserror::Error;

/// Main error type for GNSS core operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GnssError {
    /// A day-of-year or calendar string could not be parsed
    #[error("Failed to parse date: {0}")]
    DateParse(String),

    /// The computed date falls outside the representable range
    #[error("Date out of range: year {year}, day {day_of_year}")]
    DateOutOfRange { year: i32, day_of_year: i64 },

    /// Form action with an unrecognized `type` tag
    #[error("Unknown form action: {0}")]
    UnknownAction(String),

    /// `change_value` addressed a field the form does not have
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    /// Form action payload did not match the form's shape
    #[error("Invalid form payload: {0}")]
    InvalidPayload(String),

    /// Failed to parse station data
    #[error("Failed to parse station data: {0}")]
    StationParse(String),
}

/// Type alias for Results using GnssError
pub type Result<T> = std::result::Result<T, GnssError>;
