//! Auth payloads and the persisted session shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Wire payload of a signup/verify response.
///
/// Every field is optional: a failure envelope may carry none of them, and
/// the status header decides the outcome, so deserialization must never fail
/// on an absent credential.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuthPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(with = "expiry", skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_profile: Option<UserProfile>,
}

impl AuthPayload {
    /// Splits the payload into a usable session, requiring a non-empty access
    /// token. Returns `None` when the token is absent or empty.
    pub fn into_session(self) -> Option<AuthSession> {
        let access_token = self.access_token.filter(|t| !t.is_empty())?;
        Some(AuthSession {
            access_token,
            record: SessionRecord {
                refresh_token: self.refresh_token,
                token_expiry: self.token_expiry,
                user_profile: self.user_profile,
            },
        })
    }
}

/// A verified, usable session: the access token plus the optional extras that
/// accompany it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub record: SessionRecord,
}

/// The optional session fields persisted next to the access token.
///
/// Written whole on every successful auth call; there is no merge across
/// calls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub refresh_token: Option<String>,
    pub token_expiry: Option<DateTime<Utc>>,
    pub user_profile: Option<UserProfile>,
}

/// The signed-in user's profile as the backend reports it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// Serde adapter for expiry timestamps.
///
/// The canonical wire format is RFC 3339 UTC; integer epoch seconds (as a
/// JSON number or a numeric string) are also accepted and normalized on the
/// way in. Serialization always emits RFC 3339.
pub mod expiry {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Text(String),
    }

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Seconds(secs)) => from_epoch(secs).map(Some).map_err(serde::de::Error::custom),
            Some(Raw::Text(text)) => parse(&text).map(Some).map_err(serde::de::Error::custom),
        }
    }

    /// Parses a timestamp string: RFC 3339, or epoch seconds in decimal.
    pub fn parse(text: &str) -> Result<DateTime<Utc>, String> {
        if let Ok(secs) = text.parse::<i64>() {
            return from_epoch(secs);
        }
        DateTime::parse_from_rfc3339(text)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(|e| format!("invalid expiry timestamp '{}': {}", text, e))
    }

    fn from_epoch(secs: i64) -> Result<DateTime<Utc>, String> {
        Utc.timestamp_opt(secs, 0)
            .single()
            .ok_or_else(|| format!("expiry epoch out of range: {}", secs))
    }
}
