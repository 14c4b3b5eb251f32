//! The HTTP client for the ClanHall backend.
//!
//! Every backend call is a JSON POST. The transport path ends here: a failed
//! request or an unparseable body becomes [`ApiError::Transport`], and any
//! body that did parse is handed to the envelope interpreter by the
//! operation wrappers in [`crate::user`] and [`crate::group`].

use std::sync::Arc;
use std::time::Duration;

use clanhall_core::error::{ApiError, Result};
use clanhall_core::session::SessionService;
use clanhall_infrastructure::ClientConfig;
use clanhall_types::Envelope;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Typed client for the ClanHall backend.
///
/// Holds the reqwest client, the backend location, and the session service
/// that authenticated calls read their bearer token from and auth calls
/// persist into.
#[derive(Clone)]
pub struct ClanhallClient {
    http: Client,
    base_url: String,
    timeout: Duration,
    session: Arc<SessionService>,
}

impl ClanhallClient {
    /// Creates a client from a loaded configuration.
    pub fn new(config: &ClientConfig, session: Arc<SessionService>) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.timeout_secs),
            session,
        }
    }

    /// The session service this client persists into.
    pub fn session(&self) -> &Arc<SessionService> {
        &self.session
    }

    /// Issues an unauthenticated POST and parses the response envelope.
    pub(crate) async fn post<Req, T>(&self, path: &str, body: &Req) -> Result<Envelope<T>>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(path, body, None).await
    }

    /// Issues an authenticated POST, attaching the stored access token as a
    /// bearer credential. Fails fast with [`ApiError::NotSignedIn`] when no
    /// token is stored.
    pub(crate) async fn post_authed<Req, T>(&self, path: &str, body: &Req) -> Result<Envelope<T>>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.session.access_token().ok_or(ApiError::NotSignedIn)?;
        self.send(path, body, Some(token)).await
    }

    async fn send<Req, T>(&self, path: &str, body: &Req, token: Option<String>) -> Result<Envelope<T>>
    where
        Req: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "posting request");

        let mut request = self.http.post(&url).json(body).timeout(self.timeout);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        // The envelope decides the outcome, so the body is parsed regardless
        // of the HTTP status code; a non-2xx response without a parseable
        // envelope stays a transport failure.
        serde_json::from_slice(&bytes).map_err(|e| {
            if status.is_success() {
                ApiError::transport(format!("unparseable response body: {}", e))
            } else {
                ApiError::transport(format!("http {}: unparseable body", status))
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clanhall_core::session::MemorySessionStore;

    fn client() -> ClanhallClient {
        let session = Arc::new(SessionService::new(Arc::new(MemorySessionStore::new())));
        let config = ClientConfig {
            // Port 9 (discard) is never listened on; calls that reach the
            // network fail fast instead of hanging.
            base_url: "http://127.0.0.1:9/".to_string(),
            timeout_secs: 1,
        };
        ClanhallClient::new(&config, session)
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client = client();
        assert_eq!(client.base_url, "http://127.0.0.1:9");
    }

    #[tokio::test]
    async fn test_authed_post_without_token_fails_before_network() {
        let client = client();

        let result: Result<Envelope<clanhall_types::EmptyPayload>> =
            client.post_authed("/group/v1/leave", &serde_json::json!({})).await;

        assert!(matches!(result, Err(ApiError::NotSignedIn)));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_a_transport_error() {
        let client = client();

        let result: Result<Envelope<clanhall_types::EmptyPayload>> = client
            .post("/user/v1/resendverification", &serde_json::json!({}))
            .await;

        assert!(result.unwrap_err().is_transport());
    }
}
