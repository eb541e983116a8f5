//! Shared error types for the application

use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for breathometer operations
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request payloads that violate the documented ranges
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

/// Failures of the remote text-generation collaborator.
///
/// None of these reach the caller of a weekly report: each one routes the
/// request to the deterministic fallback strategy.
#[derive(Debug, Clone, Error)]
pub enum InsightError {
    #[error("text generation timed out after {}s", .after.as_secs_f64())]
    Timeout { after: Duration },

    #[error("text generation collaborator failed{}: {message}", .status.map(|s| format!(" with status {s}")).unwrap_or_default())]
    Collaborator {
        status: Option<u16>,
        message: String,
    },

    #[error("malformed text generation response: {0}")]
    MalformedResponse(String),

    #[error("remote insights unavailable: {0}")]
    Unavailable(String),
}

impl InsightError {
    pub fn collaborator(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            status,
            message: message.into(),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Short machine-readable label, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "collaborator_timeout",
            Self::Collaborator { .. } => "collaborator_error",
            Self::MalformedResponse(_) => "malformed_response",
            Self::Unavailable(_) => "unavailable",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error_mentions_status() {
        let err = InsightError::collaborator(Some(503), "service unavailable");
        assert_eq!(
            err.to_string(),
            "text generation collaborator failed with status 503: service unavailable"
        );
    }

    #[test]
    fn test_collaborator_error_without_status() {
        let err = InsightError::collaborator(None, "connection refused");
        assert_eq!(
            err.to_string(),
            "text generation collaborator failed: connection refused"
        );
    }

    #[test]
    fn test_timeout_display() {
        let err = InsightError::Timeout {
            after: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "text generation timed out after 10s");
        assert_eq!(err.kind(), "collaborator_timeout");
    }

    #[test]
    fn test_toml_error_converts_into_crate_error() {
        let parse_error = toml::from_str::<toml::Table>("[insights").unwrap_err();
        let err = Error::from(parse_error);
        assert!(matches!(err, Error::Toml(_)));
    }
}
