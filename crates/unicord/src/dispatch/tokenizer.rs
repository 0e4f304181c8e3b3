//! Command-line style tokenizer for message content
//!
//! Double quotes keep a segment whole, backslash escapes the next
//! character, and an unterminated quote degrades to a literal instead of
//! erroring.

/// Split content into argument tokens
#[must_use]
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        match ch {
            '\\' => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => current.push('\\'),
            },
            '"' => {
                quoted = true;
                in_quotes = !in_quotes;
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() || quoted {
                    tokens.push(std::mem::take(&mut current));
                }
                quoted = false;
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() || quoted {
        tokens.push(current);
    }

    tokens
}

/// Whether a token is a raw user mention (`<@id>` or `<@!id>`)
#[must_use]
pub fn is_mention_token(token: &str) -> bool {
    let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) else {
        return false;
    };
    let inner = inner.strip_prefix('!').unwrap_or(inner);
    !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit())
}

/// Strip a leading mention of `user_id`, returning the remainder
#[must_use]
pub fn strip_mention_prefix<'a>(content: &'a str, user_id: &str) -> Option<&'a str> {
    let content = content.trim_start();
    for prefix in [format!("<@{user_id}>"), format!("<@!{user_id}>")] {
        if let Some(rest) = content.strip_prefix(&prefix) {
            return Some(rest.trim_start());
        }
    }
    None
}
