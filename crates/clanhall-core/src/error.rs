//! Error types for the ClanHall client.

use clanhall_types::ResponseStatus;
use thiserror::Error;

/// A shared error type for the ClanHall client crates.
///
/// Failures are a closed set of typed variants so call sites can match
/// exhaustively instead of probing ad-hoc fields on a generic error value.
#[derive(Error, Debug, Clone)]
pub enum ApiError {
    /// The backend envelope explicitly reported non-success.
    ///
    /// `message` is the display string chosen from the status details (or
    /// the caller-supplied default), `code` the opaque machine code when one
    /// was reported, and `status` the original header for advanced handling.
    #[error("{message}")]
    OperationFailed {
        message: String,
        code: Option<String>,
        status: ResponseStatus,
    },

    /// The envelope reported success but the operation's primary result
    /// field is absent or empty. Indicates a backend contract inconsistency
    /// rather than a business rejection.
    #[error("{field} missing")]
    MissingResult { field: &'static str },

    /// The request never completed, or the body was unparseable.
    #[error("transport error: {0}")]
    Transport(String),

    /// An authenticated call was attempted with no stored access token.
    #[error("not signed in")]
    NotSignedIn,

    /// Session store read/write error.
    #[error("session store error: {message}")]
    Store { message: String },

    /// Serialization/deserialization error outside the transport path.
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a MissingResult error for the named primary result field.
    pub fn missing(field: &'static str) -> Self {
        Self::MissingResult { field }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a Store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an OperationFailed error
    pub fn is_operation_failed(&self) -> bool {
        matches!(self, Self::OperationFailed { .. })
    }

    /// Check if this is a MissingResult error
    pub fn is_missing_result(&self) -> bool {
        matches!(self, Self::MissingResult { .. })
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// The machine code reported by the backend, when the failure carries
    /// one. Callers branch on this for specialized messaging (e.g. `"1009"`
    /// meaning the OTP expired).
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::OperationFailed { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Store {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

/// A type alias for `Result<T, ApiError>`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_result_display() {
        let err = ApiError::missing("token");
        assert_eq!(err.to_string(), "token missing");
        assert!(err.is_missing_result());
        assert!(err.code().is_none());
    }

    #[test]
    fn test_operation_failed_display_and_code() {
        let err = ApiError::OperationFailed {
            message: "OTP expired".to_string(),
            code: Some("1009".to_string()),
            status: ResponseStatus::default(),
        };
        assert_eq!(err.to_string(), "OTP expired");
        assert_eq!(err.code(), Some("1009"));
        assert!(err.is_operation_failed());
    }

    #[test]
    fn test_transport_from_io_is_distinct() {
        let err = ApiError::transport("connection refused");
        assert!(err.is_transport());
        assert!(!err.is_operation_failed());
    }
}
