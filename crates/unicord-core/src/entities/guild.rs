//! Guild entities
//!
//! Only the partial shape returned by `/users/@me/guilds` is modeled; the
//! runtime does not cache full guild state.

use serde::{Deserialize, Serialize};

/// Partial guild as returned for the authorized user's guild list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialGuild {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub owner: bool,
    /// Permission bits for the requesting user, as a decimal string
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}
