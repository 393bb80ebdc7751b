//! Error and result types shared across the crate.
//!
//! [`GenerateError`] covers every way a "generate users" action can fail. Its
//! `Display` output is the exact banner text shown to the user, so callers can
//! hand `err.to_string()` straight to the notifier.

use thiserror::Error;

use crate::validate::{MAX_USERS, MIN_USERS};

/// Result type for top-level plumbing (terminal, config files, runtime).
pub type Result<T> = anyhow::Result<T>;

/// Failures of the generate action, from input validation to response parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    /// The trimmed input is not a (whole) number.
    #[error("Please enter a valid number.")]
    InvalidNumber,

    /// The number is outside the inclusive `[min, max]` bound.
    #[error("Please enter a number between {min} and {max}.")]
    OutOfRange { min: u32, max: u32 },

    /// The transport could not reach the API at all.
    #[error("Network error: Please check your internet connection.")]
    Network,

    /// The API answered with a non-success status.
    #[error("Failed to fetch data from API.")]
    Http { status: u16 },

    /// The body was not JSON or lacked a `results` array of user objects.
    #[error("Invalid API response.")]
    Schema,
}

impl GenerateError {
    /// Out-of-range error for the fixed bounds.
    pub fn out_of_range() -> Self {
        Self::OutOfRange {
            min: MIN_USERS,
            max: MAX_USERS,
        }
    }

    /// Short machine-friendly name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidNumber => "invalid_number",
            Self::OutOfRange { .. } => "out_of_range",
            Self::Network => "network",
            Self::Http { .. } => "http",
            Self::Schema => "schema",
        }
    }
}

impl From<reqwest::Error> for GenerateError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_body() {
            Self::Network
        } else if let Some(status) = e.status() {
            Self::Http {
                status: status.as_u16(),
            }
        } else if e.is_decode() {
            Self::Schema
        } else {
            // Request building or redirect failures never reached a server response.
            Self::Network
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_match_banner_text() {
        assert_eq!(
            GenerateError::InvalidNumber.to_string(),
            "Please enter a valid number."
        );
        assert_eq!(
            GenerateError::out_of_range().to_string(),
            "Please enter a number between 0 and 1000."
        );
        assert_eq!(
            GenerateError::Http { status: 503 }.to_string(),
            "Failed to fetch data from API."
        );
        assert_ne!(
            GenerateError::Network.to_string(),
            GenerateError::Http { status: 500 }.to_string()
        );
    }
}
