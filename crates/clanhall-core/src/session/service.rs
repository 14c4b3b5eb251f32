//! The session persister.
//!
//! `SessionService` is the sole writer of the session store. It records
//! verified credentials, serves them back to callers, and publishes a change
//! notification for the access-token key so in-process observers can react
//! without polling.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use clanhall_types::{AuthSession, SessionRecord, UserProfile};
use tokio::sync::broadcast;
use tracing::warn;

use crate::session::store::{SessionStore, keys};

const CHANGE_CHANNEL_CAPACITY: usize = 16;

/// A change to one session key, broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionChange {
    pub key: String,
    /// The new value; empty when the key was cleared.
    pub value: String,
}

/// Persists session credentials and broadcasts access-token changes.
pub struct SessionService {
    store: Arc<dyn SessionStore>,
    changes: broadcast::Sender<SessionChange>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { store, changes }
    }

    /// Subscribes to access-token change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.changes.subscribe()
    }

    /// Records a verified session.
    ///
    /// Writes the access token, publishes exactly one change notification
    /// for [`keys::AUTH_TOKEN`] (before returning), then writes each present
    /// optional field under its own key. Every write is independent and
    /// best-effort: a failed write is logged and does not abort the rest.
    ///
    /// Calling this twice with the same arguments leaves the store in the
    /// same state; the notification fires each time.
    pub fn persist(&self, token: &str, record: &SessionRecord) {
        self.write(keys::AUTH_TOKEN, token);
        self.notify(keys::AUTH_TOKEN, token);

        if let Some(refresh) = &record.refresh_token {
            self.write(keys::REFRESH_TOKEN, refresh);
        }
        if let Some(expiry) = &record.token_expiry {
            self.write(keys::TOKEN_EXPIRY, &expiry.to_rfc3339());
        }
        if let Some(profile) = &record.user_profile {
            match serde_json::to_string(profile) {
                Ok(json) => self.write(keys::USER_PROFILE, &json),
                Err(e) => warn!(error = %e, "failed to serialize user profile"),
            }
        }
    }

    /// Convenience for persisting the result of an auth call.
    pub fn persist_session(&self, session: &AuthSession) {
        self.persist(&session.access_token, &session.record);
    }

    /// Replaces the cached profile without touching the credentials.
    pub fn update_profile(&self, profile: &UserProfile) {
        match serde_json::to_string(profile) {
            Ok(json) => self.write(keys::USER_PROFILE, &json),
            Err(e) => warn!(error = %e, "failed to serialize user profile"),
        }
    }

    /// Removes every session key and notifies that the token was cleared.
    pub fn clear(&self) {
        for key in keys::ALL {
            if let Err(e) = self.store.remove(key) {
                warn!(key, error = %e, "session store remove failed");
            }
        }
        self.notify(keys::AUTH_TOKEN, "");
    }

    /// The stored access token, if any.
    pub fn access_token(&self) -> Option<String> {
        self.get(keys::AUTH_TOKEN)
    }

    /// The stored refresh token, if any.
    pub fn refresh_token(&self) -> Option<String> {
        self.get(keys::REFRESH_TOKEN)
    }

    /// The stored token expiry. A stored value that no longer parses is
    /// treated as absent.
    pub fn token_expiry(&self) -> Option<DateTime<Utc>> {
        let raw = self.get(keys::TOKEN_EXPIRY)?;
        match clanhall_types::auth::expiry::parse(&raw) {
            Ok(ts) => Some(ts),
            Err(e) => {
                warn!(error = %e, "stored token expiry is unreadable");
                None
            }
        }
    }

    /// The cached user profile, if any.
    pub fn user_profile(&self) -> Option<UserProfile> {
        let raw = self.get(keys::USER_PROFILE)?;
        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                warn!(error = %e, "stored user profile is unreadable");
                None
            }
        }
    }

    fn get(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "session store read failed");
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set(key, value) {
            warn!(key, error = %e, "session store write failed");
        }
    }

    fn notify(&self, key: &str, value: &str) {
        // A send with no live receivers is not an error.
        let _ = self.changes.send(SessionChange {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}
