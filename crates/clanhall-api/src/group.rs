//! Clan/group operations: create, invite, cancel-invite, remove, leave, and
//! the leaderboard. All of them require a signed-in session.

use clanhall_core::envelope::interpret;
use clanhall_core::error::{ApiError, Result};
use clanhall_types::{EmptyPayload, Envelope, Group, GroupInvite, LeaderboardEntry};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::client::ClanhallClient;

const CREATE_PATH: &str = "/group/v1/create";
const INVITE_PATH: &str = "/group/v1/invite";
const CANCEL_INVITE_PATH: &str = "/group/v1/cancelinvite";
const REMOVE_MEMBER_PATH: &str = "/group/v1/removemember";
const LEAVE_PATH: &str = "/group/v1/leave";
const LEADERBOARD_PATH: &str = "/group/v1/leaderboard";

/// Request to found a new clan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct InviteRequest {
    group_id: Uuid,
    invitee_user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelInviteRequest {
    group_id: Uuid,
    invite_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemoveMemberRequest {
    group_id: Uuid,
    member_user_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupOnlyRequest {
    group_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct LeaderboardRequest {
    group_id: Uuid,
    limit: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct GroupPayload {
    group: Option<Group>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct InvitePayload {
    invite: Option<GroupInvite>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LeaderboardPayload {
    entries: Vec<LeaderboardEntry>,
}

fn group_result(envelope: Envelope<GroupPayload>, default_message: &str) -> Result<Group> {
    interpret(envelope, default_message)?
        .group
        .ok_or(ApiError::missing("group"))
}

fn invite_result(envelope: Envelope<InvitePayload>, default_message: &str) -> Result<GroupInvite> {
    interpret(envelope, default_message)?
        .invite
        .ok_or(ApiError::missing("invite"))
}

fn leaderboard_result(
    envelope: Envelope<LeaderboardPayload>,
    default_message: &str,
) -> Result<Vec<LeaderboardEntry>> {
    Ok(interpret(envelope, default_message)?.entries)
}

impl ClanhallClient {
    /// Founds a new clan with the caller as its first member.
    pub async fn create_group(&self, request: &CreateGroupRequest) -> Result<Group> {
        let envelope = self.post_authed(CREATE_PATH, request).await?;
        group_result(envelope, "Could not create the clan")
    }

    /// Invites a user into a clan.
    pub async fn invite(&self, group_id: Uuid, invitee_user_id: Uuid) -> Result<GroupInvite> {
        let envelope = self
            .post_authed(
                INVITE_PATH,
                &InviteRequest {
                    group_id,
                    invitee_user_id,
                },
            )
            .await?;
        invite_result(envelope, "Invite failed")
    }

    /// Withdraws a pending invitation.
    pub async fn cancel_invite(&self, group_id: Uuid, invite_id: Uuid) -> Result<()> {
        let envelope: Envelope<EmptyPayload> = self
            .post_authed(
                CANCEL_INVITE_PATH,
                &CancelInviteRequest {
                    group_id,
                    invite_id,
                },
            )
            .await?;
        interpret(envelope, "Could not cancel the invite")?;
        Ok(())
    }

    /// Removes a member from a clan.
    pub async fn remove_member(&self, group_id: Uuid, member_user_id: Uuid) -> Result<()> {
        let envelope: Envelope<EmptyPayload> = self
            .post_authed(
                REMOVE_MEMBER_PATH,
                &RemoveMemberRequest {
                    group_id,
                    member_user_id,
                },
            )
            .await?;
        interpret(envelope, "Could not remove the member")?;
        Ok(())
    }

    /// Leaves a clan the caller belongs to.
    pub async fn leave_group(&self, group_id: Uuid) -> Result<()> {
        let envelope: Envelope<EmptyPayload> = self
            .post_authed(LEAVE_PATH, &GroupOnlyRequest { group_id })
            .await?;
        interpret(envelope, "Could not leave the clan")?;
        Ok(())
    }

    /// Fetches the top `limit` rows of a clan's leaderboard, ordered by rank.
    pub async fn leaderboard(&self, group_id: Uuid, limit: u32) -> Result<Vec<LeaderboardEntry>> {
        let envelope = self
            .post_authed(LEADERBOARD_PATH, &LeaderboardRequest { group_id, limit })
            .await?;
        leaderboard_result(envelope, "Could not load the leaderboard")
    }
}
