//! Wire types shared across the ClanHall client crates.
//!
//! Everything here is plain serde data: the response envelope every backend
//! call returns, the auth payloads, and the user/group DTOs. No I/O and no
//! interpretation logic lives in this crate.

pub mod auth;
pub mod group;
pub mod status;

pub use auth::{AuthPayload, AuthSession, SessionRecord, UserProfile};
pub use group::{Group, GroupInvite, LeaderboardEntry};
pub use status::{EmptyPayload, Envelope, ResponseStatus, StatusDetail, StatusKind};
