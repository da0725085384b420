//! Error codes for the feedback backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that appear
//! in HTTP responses.

use core::fmt;

/// Centralized error codes for the feedback backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Bad, missing or expired admin token
    Unauthorized,
    /// Wrong admin password on login
    WrongPassword,

    // Request Validation
    /// Required submission field missing or empty
    MissingFields,
    /// Submission field longer than its column
    FieldTooLong,
    /// Path id is not a number
    InvalidId,
    /// Malformed or oversized request body
    BadRequest,

    // Throttling
    /// Per-client submission limit reached
    RateLimited,

    // Resource Not Found
    /// Static page missing
    NotFound,

    // System Errors
    /// Database error after a successful acquire
    DbError,
    /// Database unreachable (offline mode or pool exhausted)
    DbUnavailable,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::WrongPassword => "WRONG_PASSWORD",

            Self::MissingFields => "MISSING_FIELDS",
            Self::FieldTooLong => "FIELD_TOO_LONG",
            Self::InvalidId => "INVALID_ID",
            Self::BadRequest => "BAD_REQUEST",

            Self::RateLimited => "RATE_LIMITED",

            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }

    /// Every code, used to check uniqueness of the wire strings.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::WrongPassword,
        Self::MissingFields,
        Self::FieldTooLong,
        Self::InvalidId,
        Self::BadRequest,
        Self::RateLimited,
        Self::NotFound,
        Self::DbError,
        Self::DbUnavailable,
        Self::Internal,
        Self::ConfigError,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
