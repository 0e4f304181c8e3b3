//! Permission bitflags
//!
//! Permission sets arrive from the API as decimal strings (64-bit values are
//! not safe in JavaScript JSON), so they serialize as strings here too.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

bitflags! {
    /// Guild permission flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Permissions: u64 {
        const CREATE_INSTANT_INVITE = 1 << 0;
        /// Kick members from the guild
        const KICK_MEMBERS          = 1 << 1;
        /// Ban members from the guild
        const BAN_MEMBERS           = 1 << 2;
        /// Bypass all permission checks
        const ADMINISTRATOR         = 1 << 3;
        const MANAGE_CHANNELS       = 1 << 4;
        /// Edit guild settings
        const MANAGE_GUILD          = 1 << 5;
        const ADD_REACTIONS         = 1 << 6;
        const VIEW_CHANNEL          = 1 << 10;
        const SEND_MESSAGES         = 1 << 11;
        /// Delete other users' messages
        const MANAGE_MESSAGES       = 1 << 13;
        const EMBED_LINKS           = 1 << 14;
        const ATTACH_FILES          = 1 << 15;
        const MENTION_EVERYONE      = 1 << 17;
        const USE_EXTERNAL_EMOJIS   = 1 << 18;
        const MANAGE_ROLES          = 1 << 28;
    }
}

impl Permissions {
    /// Check whether this set grants a required permission
    ///
    /// Administrators bypass all permission checks.
    #[inline]
    #[must_use]
    pub fn has(&self, permission: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.contains(permission)
    }

    /// Check whether this set grants any of the given permissions
    #[inline]
    #[must_use]
    pub fn has_any(&self, permissions: Permissions) -> bool {
        if self.contains(Permissions::ADMINISTRATOR) {
            return true;
        }
        self.intersects(permissions)
    }
}

/// Error returned when a permission string is not a decimal integer
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid permission string: {0}")]
pub struct PermissionsParseError(pub String);

impl FromStr for Permissions {
    type Err = PermissionsParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bits: u64 = s
            .parse()
            .map_err(|_| PermissionsParseError(s.to_string()))?;
        Ok(Self::from_bits_truncate(bits))
    }
}

impl Serialize for Permissions {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.bits().to_string())
    }
}

impl<'de> Deserialize<'de> for Permissions {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
