//! User operations: signup, OTP verification, and profile updates.
//!
//! Signup and verification are token-bearing: their success payload must
//! carry an access token, which is persisted through the session service
//! before the call returns.

use clanhall_core::envelope::{interpret, interpret_auth};
use clanhall_core::error::{ApiError, Result};
use clanhall_types::{AuthPayload, AuthSession, EmptyPayload, Envelope, UserProfile};
use serde::{Deserialize, Serialize};

use crate::client::ClanhallClient;

const SIGNUP_PATH: &str = "/user/v1/signup";
const VERIFY_PATH: &str = "/user/v1/verify";
const RESEND_PATH: &str = "/user/v1/resendverification";
const UPDATE_PROFILE_PATH: &str = "/user/v1/updateprofile";

/// A signup request: an email plus either a password or an opaque
/// identity-provider token, passed through to the backend unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Identity provider name (e.g. "google", "apple").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
    /// Opaque token produced by the provider SDK; never inspected here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_token: Option<String>,
}

/// An OTP verification request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyRequest {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResendRequest<'a> {
    email: &'a str,
}

/// Fields a user may change on their profile. Absent fields are untouched.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProfilePayload {
    profile: Option<UserProfile>,
}

/// Extracts the verified session from a signup/verify response.
fn auth_result(envelope: Envelope<AuthPayload>, default_message: &str) -> Result<AuthSession> {
    interpret_auth(envelope, default_message)
}

/// Extracts the updated profile from an update-profile response.
fn profile_result(envelope: Envelope<ProfilePayload>, default_message: &str) -> Result<UserProfile> {
    interpret(envelope, default_message)?
        .profile
        .ok_or(ApiError::missing("profile"))
}

impl ClanhallClient {
    /// Registers a new account. On success the returned session is persisted
    /// and the access-token change notification fires.
    pub async fn signup(&self, request: &SignupRequest) -> Result<AuthSession> {
        let envelope = self.post(SIGNUP_PATH, request).await?;
        let session = auth_result(envelope, "Signup failed")?;
        self.session().persist_session(&session);
        Ok(session)
    }

    /// Confirms the emailed one-time code. Token-bearing, like signup; the
    /// backend reports an expired code with machine code `"1009"`, which
    /// callers can branch on via [`ApiError::code`].
    pub async fn verify(&self, request: &VerifyRequest) -> Result<AuthSession> {
        let envelope = self.post(VERIFY_PATH, request).await?;
        let session = auth_result(envelope, "Verification failed")?;
        self.session().persist_session(&session);
        Ok(session)
    }

    /// Requests a fresh verification code. This is an explicit user action,
    /// never an automatic retry of a failed verify.
    pub async fn resend_verification(&self, email: &str) -> Result<()> {
        let envelope: Envelope<EmptyPayload> =
            self.post(RESEND_PATH, &ResendRequest { email }).await?;
        interpret(envelope, "Could not resend the verification code")?;
        Ok(())
    }

    /// Updates the signed-in user's profile and refreshes the cached copy.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<UserProfile> {
        let envelope = self.post_authed(UPDATE_PROFILE_PATH, update).await?;
        let profile = profile_result(envelope, "Could not update the profile")?;
        self.session().update_profile(&profile);
        Ok(profile)
    }
}
