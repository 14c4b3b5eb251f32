//! The response envelope every ClanHall backend call returns.
//!
//! Each response body is `{ status?, ...payload }`: an optional status header
//! next to the operation's own fields. An absent status, or an absent status
//! kind, means success. A present non-SUCCESS kind is authoritative even when
//! the payload fields are populated.

use serde::{Deserialize, Serialize};

/// Outcome class reported by the backend. Wire spelling is uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StatusKind {
    /// The operation completed as requested.
    Success,
    /// The operation was rejected with a non-fatal condition.
    Warn,
    /// The operation failed.
    Error,
}

impl StatusKind {
    /// Returns true only for [`StatusKind::Success`].
    pub fn is_success(self) -> bool {
        matches!(self, StatusKind::Success)
    }
}

/// One reported condition inside a status header.
///
/// Constructed only by deserializing a backend response; `code` is an opaque
/// machine string (e.g. `"1009"` for an expired OTP) and `message` is the
/// human-readable explanation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StatusKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusDetail {
    /// Whether this detail carries anything worth showing to a caller:
    /// a non-empty message or a non-empty code.
    pub fn is_reportable(&self) -> bool {
        self.message.as_deref().is_some_and(|m| !m.is_empty())
            || self.code.as_deref().is_some_and(|c| !c.is_empty())
    }
}

/// The status header of a response envelope.
///
/// A non-SUCCESS `kind` should come with at least one detail explaining why,
/// but callers must tolerate an empty `details` list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseStatus {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<StatusKind>,
    #[serde(default)]
    pub details: Vec<StatusDetail>,
}

impl ResponseStatus {
    /// An absent kind means success.
    pub fn is_success(&self) -> bool {
        self.kind.is_none_or(StatusKind::is_success)
    }

    /// Picks the detail a caller should report: the first one with a
    /// non-empty message or code, falling back to the first detail at all.
    pub fn reported_detail(&self) -> Option<&StatusDetail> {
        self.details
            .iter()
            .find(|d| d.is_reportable())
            .or_else(|| self.details.first())
    }
}

/// A full response body: the optional status header plus the operation's own
/// payload fields, flattened alongside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ResponseStatus>,
    #[serde(flatten)]
    pub data: T,
}

/// Payload for operations whose success response carries no fields of its own
/// (e.g. leaving a clan).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmptyPayload {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_kind_wire_spelling() {
        let kind: StatusKind = serde_json::from_str("\"SUCCESS\"").unwrap();
        assert_eq!(kind, StatusKind::Success);
        let kind: StatusKind = serde_json::from_str("\"WARN\"").unwrap();
        assert_eq!(kind, StatusKind::Warn);
        let kind: StatusKind = serde_json::from_str("\"ERROR\"").unwrap();
        assert_eq!(kind, StatusKind::Error);
    }

    #[test]
    fn test_absent_status_is_success() {
        let status = ResponseStatus::default();
        assert!(status.is_success());
    }

    #[test]
    fn test_non_success_kinds() {
        for kind in [StatusKind::Warn, StatusKind::Error] {
            let status = ResponseStatus {
                kind: Some(kind),
                details: vec![],
            };
            assert!(!status.is_success());
        }
    }

    #[test]
    fn test_reported_detail_skips_empty_details() {
        let status = ResponseStatus {
            kind: Some(StatusKind::Error),
            details: vec![
                StatusDetail::default(),
                StatusDetail {
                    code: Some("1009".to_string()),
                    message: Some("OTP expired".to_string()),
                    ..Default::default()
                },
            ],
        };
        let detail = status.reported_detail().unwrap();
        assert_eq!(detail.code.as_deref(), Some("1009"));
    }

    #[test]
    fn test_reported_detail_falls_back_to_first() {
        let status = ResponseStatus {
            kind: Some(StatusKind::Error),
            details: vec![StatusDetail::default(), StatusDetail::default()],
        };
        // None of the details is reportable, but the first one is still chosen.
        assert!(status.reported_detail().is_some());
    }

    #[test]
    fn test_envelope_flattens_payload() {
        let json = r#"{"status":{"kind":"SUCCESS"},"accessToken":"abc123"}"#;

        #[derive(serde::Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Payload {
            access_token: String,
        }

        let envelope: Envelope<Payload> = serde_json::from_str(json).unwrap();
        assert!(envelope.status.unwrap().is_success());
        assert_eq!(envelope.data.access_token, "abc123");
    }

    #[test]
    fn test_envelope_without_status() {
        let json = r#"{"value":7}"#;

        #[derive(serde::Deserialize)]
        struct Payload {
            value: u32,
        }

        let envelope: Envelope<Payload> = serde_json::from_str(json).unwrap();
        assert!(envelope.status.is_none());
        assert_eq!(envelope.data.value, 7);
    }

    #[test]
    fn test_empty_payload_tolerates_unknown_fields() {
        let json = r#"{"status":{"kind":"SUCCESS"},"serverTime":"ignored"}"#;
        let envelope: Envelope<EmptyPayload> = serde_json::from_str(json).unwrap();
        assert!(envelope.status.unwrap().is_success());
    }
}
