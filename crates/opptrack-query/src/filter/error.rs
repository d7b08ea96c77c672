//! Error types for filter validation and query-string decoding.

use thiserror::Error;

/// A specialized Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;

/// Errors raised while validating or decoding filter criteria.
///
/// None of these ever reach the pipeline: malformed criteria are evaluated as
/// absent constraints. They are advisory, used to block an apply or to report
/// an unreadable query string.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FilterError {
    /// Both ceiling bounds are set and the minimum exceeds the maximum.
    #[error("minimum ceiling {min} must be less than or equal to maximum ceiling {max}")]
    CeilingRangeInverted {
        /// Parsed minimum.
        min: f64,
        /// Parsed maximum.
        max: f64,
    },

    /// The custom window starts after it ends.
    #[error("start date {start} is after end date {end}")]
    DateRangeInverted {
        /// Start date as entered.
        start: String,
        /// End date as entered.
        end: String,
    },

    /// The query string could not be decoded.
    #[error("invalid query string: {message}")]
    InvalidQueryString {
        /// Decoder message.
        message: String,
    },
}

impl FilterError {
    /// Creates an invalid query string error.
    pub fn invalid_query_string(message: impl Into<String>) -> Self {
        FilterError::InvalidQueryString {
            message: message.into(),
        }
    }
}
