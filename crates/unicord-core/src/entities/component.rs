//! Interactive message components
//!
//! Components are serialized with a numeric `type` tag: 1 action row,
//! 2 button, 3 string select, 4 text input, 5-8 entity selects.

use serde::{Deserialize, Serialize};

use super::Emoji;

/// Top-level container row holding up to five components
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionRow {
    /// Always 1
    #[serde(rename = "type")]
    pub kind: u8,
    pub components: Vec<Component>,
}

impl ActionRow {
    #[must_use]
    pub fn new(components: Vec<Component>) -> Self {
        Self {
            kind: 1,
            components,
        }
    }
}

/// Any interactive component inside an action row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Component {
    Button(Button),
    SelectMenu(SelectMenu),
    TextInput(TextInput),
}

/// Button visual styles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ButtonStyle {
    Primary = 1,
    Secondary = 2,
    Success = 3,
    Danger = 4,
    Link = 5,
}

impl From<ButtonStyle> for u8 {
    fn from(style: ButtonStyle) -> Self {
        style as u8
    }
}

impl TryFrom<u8> for ButtonStyle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Primary),
            2 => Ok(Self::Secondary),
            3 => Ok(Self::Success),
            4 => Ok(Self::Danger),
            5 => Ok(Self::Link),
            other => Err(format!("invalid button style: {other}")),
        }
    }
}

/// A clickable button (type 2)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Button {
    /// Always 2
    #[serde(rename = "type")]
    pub kind: u8,
    pub style: ButtonStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    /// Required for every style except `Link`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_id: Option<String>,
    /// Required for the `Link` style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// A select menu (types 3 and 5-8)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectMenu {
    /// 3 string select, 5 user, 6 role, 7 mentionable, 8 channel
    #[serde(rename = "type")]
    pub kind: u8,
    pub custom_id: String,
    /// Options; present only for string selects
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
}

/// One choice inside a string select menu
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<Emoji>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,
}

/// Text input styles for modal forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TextInputStyle {
    Short = 1,
    Paragraph = 2,
}

impl From<TextInputStyle> for u8 {
    fn from(style: TextInputStyle) -> Self {
        style as u8
    }
}

impl TryFrom<u8> for TextInputStyle {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Short),
            2 => Ok(Self::Paragraph),
            other => Err(format!("invalid text input style: {other}")),
        }
    }
}

/// A text input field (type 4), usable only inside modals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInput {
    /// Always 4
    #[serde(rename = "type")]
    pub kind: u8,
    pub custom_id: String,
    pub style: TextInputStyle,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_serialize_shape() {
        let button = Button {
            kind: 2,
            style: ButtonStyle::Success,
            label: Some("Click Me".to_string()),
            emoji: None,
            custom_id: Some("ping_button".to_string()),
            url: None,
            disabled: None,
        };

        let json = serde_json::to_value(&button).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": 2,
                "style": 3,
                "label": "Click Me",
                "custom_id": "ping_button"
            })
        );
    }

    #[test]
    fn test_button_style_roundtrip() {
        let style: ButtonStyle = serde_json::from_str("4").unwrap();
        assert_eq!(style, ButtonStyle::Danger);
        assert!(serde_json::from_str::<ButtonStyle>("9").is_err());
    }

    #[test]
    fn test_action_row_wraps_components() {
        let row = ActionRow::new(vec![Component::SelectMenu(SelectMenu {
            kind: 3,
            custom_id: "category_select".to_string(),
            options: vec![SelectOption {
                label: "Bug Report".to_string(),
                value: "bug".to_string(),
                description: Some("Report a bug".to_string()),
                ..SelectOption::default()
            }],
            ..SelectMenu::default()
        })]);

        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["type"], 1);
        assert_eq!(json["components"][0]["type"], 3);
        assert_eq!(json["components"][0]["options"][0]["value"], "bug");
    }
}
