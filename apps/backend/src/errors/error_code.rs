//! Error codes for the cohort backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP problem-details bodies.

use core::fmt;

/// Centralized error codes for the cohort backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication
    /// Shared token missing or not equal to the configured secret
    InvalidToken,

    // Request Validation
    /// Participant id is missing or empty
    MissingId,
    /// Participant id is malformed (too long, control characters)
    InvalidId,
    /// Group is not one of the enumerated groups
    InvalidGroup,
    /// Direction is not one of left/right
    InvalidDirection,
    /// Finalize against an id that was never registered
    UnknownParticipant,
    /// Finalize parameters disagree with the stored registration
    RegistrationMismatch,
    /// General bad request error (unreadable body, wrong types)
    BadRequest,

    // Conflicts
    /// Registration for this id already exists
    AlreadyRegistered,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Counter increment gave up after repeated concurrent-writer conflicts
    CounterContention,
    /// Stored row could not be interpreted
    DataCorruption,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidToken => "INVALID_TOKEN",

            Self::MissingId => "MISSING_ID",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidGroup => "INVALID_GROUP",
            Self::InvalidDirection => "INVALID_DIRECTION",
            Self::UnknownParticipant => "UNKNOWN_PARTICIPANT",
            Self::RegistrationMismatch => "REGISTRATION_MISMATCH",
            Self::BadRequest => "BAD_REQUEST",

            Self::AlreadyRegistered => "ALREADY_REGISTERED",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::CounterContention => "COUNTER_CONTENTION",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
