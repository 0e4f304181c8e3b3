//! Gateway intents bitflags
//!
//! Declared at identify time to select which event families the session
//! receives. Serialized as a plain integer in the identify payload.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Gateway intent flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Intents: u64 {
        /// Guild create/update/delete, channels, roles
        const GUILDS                   = 1 << 0;
        /// Member add/update/remove (privileged)
        const GUILD_MEMBERS            = 1 << 1;
        /// Bans and audit-log moderation events
        const GUILD_MODERATION         = 1 << 2;
        /// Voice state updates
        const GUILD_VOICE_STATES       = 1 << 7;
        /// Presence updates (privileged)
        const GUILD_PRESENCES          = 1 << 8;
        /// Messages in guild channels
        const GUILD_MESSAGES           = 1 << 9;
        /// Reactions in guild channels
        const GUILD_MESSAGE_REACTIONS  = 1 << 10;
        /// Typing indicators in guild channels
        const GUILD_MESSAGE_TYPING     = 1 << 11;
        /// Messages in DM channels
        const DIRECT_MESSAGES          = 1 << 12;
        /// Reactions in DM channels
        const DIRECT_MESSAGE_REACTIONS = 1 << 13;
        /// Message content visibility (privileged)
        const MESSAGE_CONTENT          = 1 << 15;

        /// Guilds plus guild messages, the minimum for a prefix-command bot
        const DEFAULT = Self::GUILDS.bits() | Self::GUILD_MESSAGES.bits();
    }
}

impl Default for Intents {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl Serialize for Intents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(self.bits())
    }
}

impl<'de> Deserialize<'de> for Intents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bits = u64::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}
