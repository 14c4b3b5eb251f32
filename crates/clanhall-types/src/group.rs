//! Clan/group DTOs for the `/group/v1/*` operations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A clan as the backend reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub member_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A pending invitation into a clan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupInvite {
    pub invite_id: Uuid,
    pub group_id: Uuid,
    pub invitee_user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// One row of a clan leaderboard, ordered by rank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: Uuid,
    pub display_name: String,
    pub score: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_wire_names() {
        let json = r#"{
            "groupId": "7b9c8a10-9f4e-4f4a-b2a1-3c5d6e7f8a9b",
            "name": "Night Watch",
            "memberCount": 12
        }"#;

        let group: Group = serde_json::from_str(json).unwrap();
        assert_eq!(group.name, "Night Watch");
        assert_eq!(group.member_count, 12);
        assert!(group.description.is_none());
    }

    #[test]
    fn test_leaderboard_entry_round_trip() {
        let entry = LeaderboardEntry {
            rank: 1,
            user_id: Uuid::new_v4(),
            display_name: "Kira".to_string(),
            score: 4200,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: LeaderboardEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
