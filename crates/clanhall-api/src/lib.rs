//! Typed HTTP wrappers for the ClanHall backend.
//!
//! The crate exposes one client, [`ClanhallClient`], with an async method
//! per backend operation. Each call is a single awaited request with no
//! retry, coalescing, or cancellation; "try again" flows (like resending a
//! verification code) are explicit user actions, not recovery paths.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use clanhall_api::{ClanhallClient, SignupRequest};
//! use clanhall_core::session::SessionService;
//! use clanhall_infrastructure::{ClientConfig, JsonFileSessionStore};
//!
//! # async fn run() -> clanhall_core::Result<()> {
//! let store = Arc::new(JsonFileSessionStore::open_default()?);
//! let session = Arc::new(SessionService::new(store));
//! let client = ClanhallClient::new(&ClientConfig::load()?, session);
//!
//! let request = SignupRequest {
//!     email: "kira@example.com".to_string(),
//!     password: Some("hunter2!".to_string()),
//!     ..Default::default()
//! };
//! let auth = client.signup(&request).await?;
//! println!("signed up, token expires {:?}", auth.record.token_expiry);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod group;
pub mod user;

pub use client::ClanhallClient;
pub use group::CreateGroupRequest;
pub use user::{ProfileUpdate, SignupRequest, VerifyRequest};
