//! Typed endpoint helpers
//!
//! Thin wrappers over [`RestClient`] for the routes the runtime itself
//! uses. Paths are the route keys, so two calls to the same helper share
//! a bucket.

use serde::de::DeserializeOwned;
use serde_json::Value;
use unicord_common::{Error, Result};
use unicord_core::{
    Channel, InteractionResponse, Message, MessagePayload, PartialGuild, User,
};

use crate::client::{encode_segment, RestClient};

fn expect_body<T: DeserializeOwned>(body: Option<Value>) -> Result<T> {
    let body = body.ok_or_else(|| Error::transport("expected a response body"))?;
    Ok(serde_json::from_value(body)?)
}

impl RestClient {
    /// `GET /users/@me`
    pub async fn get_current_user(&self) -> Result<User> {
        expect_body(self.get("/users/@me").await?)
    }

    /// `GET /users/@me/guilds`
    pub async fn get_current_user_guilds(&self) -> Result<Vec<PartialGuild>> {
        expect_body(self.get("/users/@me/guilds").await?)
    }

    /// `GET /channels/{id}`
    pub async fn get_channel(&self, channel_id: &str) -> Result<Channel> {
        expect_body(self.get(&format!("/channels/{channel_id}")).await?)
    }

    /// `POST /channels/{id}/messages`
    pub async fn create_message(
        &self,
        channel_id: &str,
        payload: &MessagePayload,
    ) -> Result<Message> {
        let body = serde_json::to_value(payload)?;
        expect_body(
            self.post(&format!("/channels/{channel_id}/messages"), body)
                .await?,
        )
    }

    /// `PATCH /channels/{id}/messages/{id}`
    pub async fn edit_message(
        &self,
        channel_id: &str,
        message_id: &str,
        payload: &MessagePayload,
    ) -> Result<Message> {
        let body = serde_json::to_value(payload)?;
        expect_body(
            self.patch(
                &format!("/channels/{channel_id}/messages/{message_id}"),
                body,
            )
            .await?,
        )
    }

    /// `DELETE /channels/{id}/messages/{id}`
    pub async fn delete_message(&self, channel_id: &str, message_id: &str) -> Result<()> {
        self.delete(&format!("/channels/{channel_id}/messages/{message_id}"))
            .await?;
        Ok(())
    }

    /// `PUT /channels/{id}/messages/{id}/reactions/{emoji}/@me`
    pub async fn create_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<()> {
        let emoji = encode_segment(emoji);
        self.put(
            &format!("/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me"),
            None,
        )
        .await?;
        Ok(())
    }

    /// `DELETE /channels/{id}/messages/{id}/reactions/{emoji}/@me`
    pub async fn delete_own_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<()> {
        let emoji = encode_segment(emoji);
        self.delete(&format!(
            "/channels/{channel_id}/messages/{message_id}/reactions/{emoji}/@me"
        ))
        .await?;
        Ok(())
    }

    /// `POST /interactions/{id}/{token}/callback`
    pub async fn create_interaction_response(
        &self,
        interaction_id: &str,
        token: &str,
        response: &InteractionResponse,
    ) -> Result<()> {
        let body = serde_json::to_value(response)?;
        self.post(
            &format!("/interactions/{interaction_id}/{token}/callback"),
            body,
        )
        .await?;
        Ok(())
    }

    /// `PATCH /webhooks/{application_id}/{token}/messages/@original`
    pub async fn edit_original_response(
        &self,
        application_id: &str,
        token: &str,
        payload: &MessagePayload,
    ) -> Result<Message> {
        let body = serde_json::to_value(payload)?;
        expect_body(
            self.patch(
                &format!("/webhooks/{application_id}/{token}/messages/@original"),
                body,
            )
            .await?,
        )
    }

    /// `DELETE /webhooks/{application_id}/{token}/messages/@original`
    pub async fn delete_original_response(
        &self,
        application_id: &str,
        token: &str,
    ) -> Result<()> {
        self.delete(&format!(
            "/webhooks/{application_id}/{token}/messages/@original"
        ))
        .await?;
        Ok(())
    }

    /// `POST /webhooks/{application_id}/{token}` (interaction follow-up)
    pub async fn create_followup_message(
        &self,
        application_id: &str,
        token: &str,
        payload: &MessagePayload,
    ) -> Result<Message> {
        let body = serde_json::to_value(payload)?;
        expect_body(
            self.post(&format!("/webhooks/{application_id}/{token}"), body)
                .await?,
        )
    }

    /// `PUT /applications/{id}/commands` — bulk overwrite of global commands
    pub async fn bulk_overwrite_global_commands(
        &self,
        application_id: &str,
        commands: &[Value],
    ) -> Result<Vec<Value>> {
        let body = serde_json::to_value(commands)?;
        expect_body(
            self.put(&format!("/applications/{application_id}/commands"), Some(body))
                .await?,
        )
    }

    /// `PUT /applications/{id}/guilds/{id}/commands` — per-guild bulk overwrite
    pub async fn bulk_overwrite_guild_commands(
        &self,
        application_id: &str,
        guild_id: &str,
        commands: &[Value],
    ) -> Result<Vec<Value>> {
        let body = serde_json::to_value(commands)?;
        expect_body(
            self.put(
                &format!("/applications/{application_id}/guilds/{guild_id}/commands"),
                Some(body),
            )
            .await?,
        )
    }

    /// `PUT /guilds/{id}/bans/{id}`
    pub async fn create_guild_ban(&self, guild_id: &str, user_id: &str) -> Result<()> {
        self.put(&format!("/guilds/{guild_id}/bans/{user_id}"), None)
            .await?;
        Ok(())
    }
}
