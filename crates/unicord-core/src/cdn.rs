//! CDN URL helpers
//!
//! Pure functions building asset URLs from entity fields. Animated hashes
//! (prefixed `a_`) resolve to `.gif`, everything else to `.png`.

use crate::entities::{PartialGuild, User};

const CDN_BASE: &str = "https://cdn.discordapp.com";

/// URL of a user's avatar, or `None` when the user has no custom avatar
#[must_use]
pub fn user_avatar_url(user: &User, size: u16) -> Option<String> {
    let hash = user.avatar.as_deref()?;
    let ext = if hash.starts_with("a_") { "gif" } else { "png" };
    Some(format!(
        "{CDN_BASE}/avatars/{}/{hash}.{ext}?size={size}",
        user.id
    ))
}

/// URL of the default avatar assigned to users without a custom one
#[must_use]
pub fn default_avatar_url(user: &User) -> String {
    // Legacy discriminator accounts index by discriminator % 5,
    // migrated accounts by (id >> 22) % 6.
    let index = match user.discriminator.as_deref() {
        Some(d) if d != "0" => d.parse::<u64>().unwrap_or(0) % 5,
        _ => user.id.parse::<u64>().map_or(0, |id| (id >> 22) % 6),
    };
    format!("{CDN_BASE}/embed/avatars/{index}.png")
}

/// URL of a guild's icon, or `None` when the guild has no icon
#[must_use]
pub fn guild_icon_url(guild: &PartialGuild, size: u16) -> Option<String> {
    let hash = guild.icon.as_deref()?;
    let ext = if hash.starts_with("a_") { "gif" } else { "png" };
    Some(format!(
        "{CDN_BASE}/icons/{}/{hash}.{ext}?size={size}",
        guild.id
    ))
}

/// The name to show for a user: display name, else username
#[must_use]
pub fn user_display_name(user: &User) -> &str {
    user.global_name.as_deref().unwrap_or(&user.username)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_with_avatar(avatar: &str) -> User {
        User {
            id: "123456789".to_string(),
            username: "testuser".to_string(),
            avatar: Some(avatar.to_string()),
            ..User::default()
        }
    }

    #[test]
    fn test_animated_avatar_resolves_to_gif() {
        let user = user_with_avatar("a_animated_avatar_hash");
        assert_eq!(
            user_avatar_url(&user, 512).as_deref(),
            Some("https://cdn.discordapp.com/avatars/123456789/a_animated_avatar_hash.gif?size=512")
        );
    }

    #[test]
    fn test_static_avatar_resolves_to_png() {
        let user = user_with_avatar("deadbeef");
        assert_eq!(
            user_avatar_url(&user, 128).as_deref(),
            Some("https://cdn.discordapp.com/avatars/123456789/deadbeef.png?size=128")
        );
    }

    #[test]
    fn test_missing_avatar_returns_none() {
        let user = User {
            id: "1".to_string(),
            username: "u".to_string(),
            ..User::default()
        };
        assert!(user_avatar_url(&user, 128).is_none());
    }

    #[test]
    fn test_display_name_prefers_global_name() {
        let mut user = user_with_avatar("x");
        user.global_name = Some("Test User".to_string());
        assert_eq!(user_display_name(&user), "Test User");

        user.global_name = None;
        assert_eq!(user_display_name(&user), "testuser");
    }

    #[test]
    fn test_default_avatar_legacy_discriminator() {
        let user = User {
            id: "1".to_string(),
            username: "u".to_string(),
            discriminator: Some("0001".to_string()),
            ..User::default()
        };
        assert_eq!(
            default_avatar_url(&user),
            "https://cdn.discordapp.com/embed/avatars/1.png"
        );
    }
}
