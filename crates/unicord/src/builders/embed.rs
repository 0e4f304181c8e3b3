//! Embed builder

use chrono::Utc;
use unicord_core::{Embed, EmbedAuthor, EmbedField, EmbedFooter, EmbedImage};

/// Fluent construction of an [`Embed`]
#[derive(Debug, Default, Clone)]
pub struct EmbedBuilder {
    embed: Embed,
}

impl EmbedBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.embed.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.embed.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.embed.url = Some(url.into());
        self
    }

    /// 24-bit RGB color
    #[must_use]
    pub fn color(mut self, color: u32) -> Self {
        self.embed.color = Some(color);
        self
    }

    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>, inline: bool) -> Self {
        self.embed.fields.push(EmbedField {
            name: name.into(),
            value: value.into(),
            inline: Some(inline),
        });
        self
    }

    #[must_use]
    pub fn footer(mut self, text: impl Into<String>) -> Self {
        self.embed.footer = Some(EmbedFooter {
            text: text.into(),
            icon_url: None,
        });
        self
    }

    #[must_use]
    pub fn author(mut self, name: impl Into<String>) -> Self {
        self.embed.author = Some(EmbedAuthor {
            name: name.into(),
            url: None,
            icon_url: None,
        });
        self
    }

    #[must_use]
    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.embed.image = Some(EmbedImage {
            url: url.into(),
            height: None,
            width: None,
        });
        self
    }

    #[must_use]
    pub fn thumbnail(mut self, url: impl Into<String>) -> Self {
        self.embed.thumbnail = Some(EmbedImage {
            url: url.into(),
            height: None,
            width: None,
        });
        self
    }

    /// Explicit ISO 8601 timestamp
    #[must_use]
    pub fn timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.embed.timestamp = Some(timestamp.into());
        self
    }

    /// Timestamp the embed with the current time
    #[must_use]
    pub fn timestamp_now(mut self) -> Self {
        self.embed.timestamp = Some(Utc::now().to_rfc3339());
        self
    }

    #[must_use]
    pub fn build(self) -> Embed {
        self.embed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_sets_fields() {
        let embed = EmbedBuilder::new()
            .title("Status")
            .description("All good")
            .color(0x57F2_87)
            .field("Uptime", "3d", true)
            .footer("unicord")
            .build();

        assert_eq!(embed.title.as_deref(), Some("Status"));
        assert_eq!(embed.color, Some(0x0057_F287));
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(embed.fields[0].inline, Some(true));
        assert_eq!(embed.footer.as_ref().unwrap().text, "unicord");
    }

    #[test]
    fn test_identical_inputs_build_equal_embeds() {
        let build = || {
            EmbedBuilder::new()
                .title("Report")
                .description("weekly")
                .color(0x00FF00)
                .field("Items", "12", false)
                .build()
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn test_builders_share_no_state() {
        let base = EmbedBuilder::new().title("Base");
        let extended = base.clone().description("extra").field("k", "v", true);

        let base = base.build();
        let extended = extended.build();
        assert_eq!(base.description, None);
        assert!(base.fields.is_empty());
        assert_eq!(extended.description.as_deref(), Some("extra"));
        assert_eq!(extended.fields.len(), 1);
    }

    #[test]
    fn test_timestamp_now_is_iso8601() {
        let embed = EmbedBuilder::new().timestamp_now().build();
        let raw = embed.timestamp.unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(&raw).is_ok());
    }
}
