//! The envelope interpreter: the single place that decides whether a parsed
//! backend response means success or failure.
//!
//! Interpretation is a pure, synchronous mapping from an already-received
//! payload to its result. Transport failures (the request never completed,
//! the body did not parse) are a separate path and never reach this module.

use clanhall_types::{AuthPayload, AuthSession, Envelope, ResponseStatus};

use crate::error::{ApiError, Result};

/// Interprets a response envelope.
///
/// The call succeeded when the status header is absent, its kind is absent,
/// or its kind is SUCCESS; the payload fields are then returned unchanged.
/// Any other kind wins over whatever the payload carries and produces
/// [`ApiError::OperationFailed`] built from the status details, with
/// `default_message` as the display fallback.
pub fn interpret<T>(envelope: Envelope<T>, default_message: &str) -> Result<T> {
    match envelope.status {
        Some(status) if !status.is_success() => Err(failure(status, default_message)),
        _ => Ok(envelope.data),
    }
}

/// Interprets a token-bearing auth envelope.
///
/// After the status check passes, the payload must still carry a non-empty
/// access token; otherwise the call fails with `MissingResult` ("token
/// missing"), a distinct failure from `OperationFailed` because the envelope
/// itself claimed success.
pub fn interpret_auth(envelope: Envelope<AuthPayload>, default_message: &str) -> Result<AuthSession> {
    interpret(envelope, default_message)?
        .into_session()
        .ok_or(ApiError::missing("token"))
}

/// Builds the failure for a non-success status.
///
/// The reported detail is the first one with a non-empty message or code,
/// else the first detail at all. The display message falls back from the
/// detail's message, to its code, to `default_message`.
fn failure(status: ResponseStatus, default_message: &str) -> ApiError {
    let (message, code) = match status.reported_detail() {
        Some(detail) => {
            let code = detail.code.clone().filter(|c| !c.is_empty());
            let message = detail
                .message
                .clone()
                .filter(|m| !m.is_empty())
                .or_else(|| code.clone())
                .unwrap_or_else(|| default_message.to_string());
            (message, code)
        }
        None => (default_message.to_string(), None),
    };

    ApiError::OperationFailed {
        message,
        code,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clanhall_types::EmptyPayload;

    fn auth_envelope(json: &str) -> Envelope<AuthPayload> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_success_envelope_returns_payload() {
        let envelope =
            auth_envelope(r#"{"accessToken": "abc123", "status": {"kind": "SUCCESS"}}"#);

        let session = interpret_auth(envelope, "Signup failed").unwrap();
        assert_eq!(session.access_token, "abc123");
    }

    #[test]
    fn test_absent_status_is_success() {
        let envelope = auth_envelope(r#"{"accessToken": "abc123"}"#);
        assert!(interpret_auth(envelope, "Signup failed").is_ok());
    }

    #[test]
    fn test_error_with_code_and_message() {
        let envelope = auth_envelope(
            r#"{"status": {"kind": "ERROR", "details": [{"code": "1009", "message": "OTP expired"}]}}"#,
        );

        let err = interpret_auth(envelope, "Verification failed").unwrap_err();
        assert_eq!(err.to_string(), "OTP expired");
        assert_eq!(err.code(), Some("1009"));
    }

    #[test]
    fn test_error_with_empty_details_uses_default() {
        let envelope = auth_envelope(r#"{"status": {"kind": "ERROR", "details": []}}"#);

        let err = interpret_auth(envelope, "Signup failed").unwrap_err();
        assert_eq!(err.to_string(), "Signup failed");
        assert!(err.code().is_none());
        assert!(err.is_operation_failed());
    }

    #[test]
    fn test_success_without_token_is_missing_result() {
        let envelope = auth_envelope(r#"{"status": {"kind": "SUCCESS"}}"#);

        let err = interpret_auth(envelope, "Signup failed").unwrap_err();
        assert!(err.is_missing_result());
        assert!(!err.is_operation_failed());
        assert_eq!(err.to_string(), "token missing");
    }

    #[test]
    fn test_warn_is_a_failure() {
        let envelope = auth_envelope(
            r#"{"accessToken": "abc123", "status": {"kind": "WARN", "details": [{"message": "Account flagged"}]}}"#,
        );

        // A populated payload does not override a non-success status.
        let err = interpret_auth(envelope, "Signup failed").unwrap_err();
        assert_eq!(err.to_string(), "Account flagged");
    }

    #[test]
    fn test_code_only_detail_becomes_the_message() {
        let envelope =
            auth_envelope(r#"{"status": {"kind": "ERROR", "details": [{"code": "1021"}]}}"#);

        let err = interpret_auth(envelope, "Signup failed").unwrap_err();
        assert_eq!(err.to_string(), "1021");
        assert_eq!(err.code(), Some("1021"));
    }

    #[test]
    fn test_first_reportable_detail_wins() {
        let envelope = auth_envelope(
            r#"{"status": {"kind": "ERROR", "details": [
                {"message": ""},
                {"code": "2001", "message": "Clan is full"},
                {"code": "9999", "message": "Unused"}
            ]}}"#,
        );

        let err = interpret_auth(envelope, "Invite failed").unwrap_err();
        assert_eq!(err.to_string(), "Clan is full");
        assert_eq!(err.code(), Some("2001"));
    }

    #[test]
    fn test_interpret_is_deterministic() {
        let json = r#"{"status": {"kind": "ERROR", "details": [{"code": "1009"}]}}"#;

        let first = interpret::<EmptyPayload>(serde_json::from_str(json).unwrap(), "x");
        let second = interpret::<EmptyPayload>(serde_json::from_str(json).unwrap(), "x");
        assert_eq!(
            first.unwrap_err().to_string(),
            second.unwrap_err().to_string()
        );
    }

    #[test]
    fn test_failure_keeps_original_status() {
        let envelope = auth_envelope(
            r#"{"status": {"kind": "ERROR", "details": [{"code": "1009", "message": "OTP expired"}]}}"#,
        );

        match interpret_auth(envelope, "Verification failed").unwrap_err() {
            ApiError::OperationFailed { status, .. } => {
                assert_eq!(status.details.len(), 1);
            }
            other => panic!("expected OperationFailed, got {:?}", other),
        }
    }
}
