//! User and guild-member entities

use serde::{Deserialize, Serialize};

/// A platform user account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discriminator: Option<String>,
    /// Display name, if the user has set one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_name: Option<String>,
    /// Avatar image hash (animated avatars are prefixed with `a_`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bot: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verified: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_flags: Option<u64>,
}

/// A user's membership in one guild
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Member {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nick: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
    #[serde(default)]
    pub deaf: bool,
    #[serde(default)]
    pub mute: bool,
    /// Guild-scoped permission string for interaction payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialize_minimal() {
        let user: User = serde_json::from_str(r#"{"id":"123","username":"tester"}"#).unwrap();
        assert_eq!(user.id, "123");
        assert_eq!(user.username, "tester");
        assert!(!user.bot);
        assert!(user.avatar.is_none());
    }

    #[test]
    fn test_user_bot_flag_roundtrip() {
        let user: User =
            serde_json::from_str(r#"{"id":"1","username":"b","bot":true}"#).unwrap();
        assert!(user.bot);

        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains(r#""bot":true"#));
    }

    #[test]
    fn test_user_serialize_skips_none() {
        let user = User {
            id: "1".to_string(),
            username: "u".to_string(),
            ..User::default()
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("avatar"));
        assert!(!json.contains("bot"));
    }

    #[test]
    fn test_member_ignores_unknown_fields() {
        let member: Member = serde_json::from_str(
            r#"{"roles":["1","2"],"joined_at":"2024-01-01T00:00:00Z","flags":0,"pending":false}"#,
        )
        .unwrap();
        assert_eq!(member.roles.len(), 2);
        assert!(member.user.is_none());
    }
}
