//! Component constructors

use unicord_core::{
    ActionRow, Button, ButtonStyle, Component, SelectMenu, SelectOption, TextInput,
    TextInputStyle,
};

/// A clickable button with a custom id
#[must_use]
pub fn button(custom_id: impl Into<String>, label: impl Into<String>, style: ButtonStyle) -> Component {
    Component::Button(Button {
        kind: 2,
        style,
        label: Some(label.into()),
        emoji: None,
        custom_id: Some(custom_id.into()),
        url: None,
        disabled: None,
    })
}

/// A link-style button opening a URL
#[must_use]
pub fn link_button(url: impl Into<String>, label: impl Into<String>) -> Component {
    Component::Button(Button {
        kind: 2,
        style: ButtonStyle::Link,
        label: Some(label.into()),
        emoji: None,
        custom_id: None,
        url: Some(url.into()),
        disabled: None,
    })
}

/// A string select menu from `(label, value)` pairs
#[must_use]
pub fn string_select(
    custom_id: impl Into<String>,
    options: Vec<(String, String)>,
) -> Component {
    Component::SelectMenu(SelectMenu {
        kind: 3,
        custom_id: custom_id.into(),
        options: options
            .into_iter()
            .map(|(label, value)| SelectOption {
                label,
                value,
                ..SelectOption::default()
            })
            .collect(),
        ..SelectMenu::default()
    })
}

/// A modal text input field
#[must_use]
pub fn text_input(
    custom_id: impl Into<String>,
    label: impl Into<String>,
    style: TextInputStyle,
) -> Component {
    Component::TextInput(TextInput {
        kind: 4,
        custom_id: custom_id.into(),
        style,
        label: label.into(),
        min_length: None,
        max_length: None,
        required: None,
        placeholder: None,
    })
}

/// Wrap components in an action row
#[must_use]
pub fn action_row(components: Vec<Component>) -> ActionRow {
    ActionRow::new(components)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_shape() {
        let row = action_row(vec![button("ok_button", "OK", ButtonStyle::Primary)]);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": 1,
                "components": [{
                    "type": 2,
                    "style": 1,
                    "label": "OK",
                    "custom_id": "ok_button"
                }]
            })
        );
    }

    #[test]
    fn test_link_button_has_url_and_no_custom_id() {
        let Component::Button(b) = link_button("https://example.com", "Docs") else {
            panic!("expected a button");
        };
        assert_eq!(b.style, ButtonStyle::Link);
        assert_eq!(b.url.as_deref(), Some("https://example.com"));
        assert!(b.custom_id.is_none());
    }

    #[test]
    fn test_string_select_options() {
        let Component::SelectMenu(menu) = string_select(
            "pick",
            vec![("Red".to_string(), "r".to_string()), ("Blue".to_string(), "b".to_string())],
        ) else {
            panic!("expected a select menu");
        };
        assert_eq!(menu.kind, 3);
        assert_eq!(menu.options.len(), 2);
        assert_eq!(menu.options[0].value, "r");
    }

    #[test]
    fn test_identical_inputs_build_equal_rows() {
        let build = || {
            action_row(vec![
                button("ok_button", "OK", ButtonStyle::Primary),
                link_button("https://example.com", "Docs"),
            ])
        };
        assert_eq!(build(), build());
    }
}
