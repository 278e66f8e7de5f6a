//! Pure text helpers shared by the HTML and terminal renderers.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::Conversation;

/// Maximum preview length in characters, before the ellipsis
pub const PREVIEW_MAX_CHARS: usize = 40;
/// Preview shown when the last message has no visible text
pub const ATTACHMENT_PLACEHOLDER: &str = "[Attachment]";
const ELLIPSIS: char = '…';

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));
static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Escape the five HTML-significant characters
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Escape text taken from existing markup, for element content or an attribute.
///
/// `&` is left alone since the source markup is already entity-encoded.
pub fn escape_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Avatar initials for a display label
///
/// ```
/// use chat_archive_viewer::utils::text::get_initials;
///
/// assert_eq!(get_initials("John Doe"), "JD");
/// assert_eq!(get_initials("Madonna"), "M");
/// assert_eq!(get_initials(""), "?");
/// ```
pub fn get_initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let (Some(first), Some(last)) = (parts.first(), parts.last()) else {
        return "?".to_string();
    };

    let mut initials: String = first.chars().take(1).collect();
    if parts.len() > 1 {
        initials.extend(last.chars().take(1));
    }
    initials.to_uppercase()
}

/// Remove markup tags, collapse whitespace runs to one space and trim
pub fn strip_tags(input: &str) -> String {
    let without_tags = TAG_RE.replace_all(input, "");
    WHITESPACE_RE.replace_all(&without_tags, " ").trim().to_string()
}

/// Short plain-text preview of a message body
pub fn message_preview(content: &str) -> String {
    let text = strip_tags(content);
    if text.is_empty() {
        return ATTACHMENT_PLACEHOLDER.to_string();
    }
    if text.chars().count() > PREVIEW_MAX_CHARS {
        let mut truncated: String = text.chars().take(PREVIEW_MAX_CHARS).collect();
        truncated.push(ELLIPSIS);
        return truncated;
    }
    text
}

/// Preview of a conversation's last message; empty for a conversation without messages
pub fn conversation_preview(conversation: &Conversation) -> String {
    conversation.last_message().map(|m| message_preview(m.content())).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Message;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_escape_attr_keeps_entities() {
        assert_eq!(escape_attr("https://x.test/?a=1&amp;b=2"), "https://x.test/?a=1&amp;b=2");
        assert_eq!(escape_attr("a\"<b>"), "a&quot;&lt;b&gt;");
    }

    #[test]
    fn test_initials() {
        assert_eq!(get_initials("John Doe"), "JD");
        assert_eq!(get_initials("Madonna"), "M");
        assert_eq!(get_initials(""), "?");
    }

    #[test]
    fn test_initials_uses_first_and_last_words() {
        assert_eq!(get_initials("ada king lovelace"), "AL");
        assert_eq!(get_initials("  spaced   out  "), "SO");
    }

    #[test]
    fn test_initials_whitespace_only() {
        assert_eq!(get_initials("   "), "?");
    }

    #[test]
    fn test_initials_non_ascii() {
        assert_eq!(get_initials("élodie ßmith"), "ÉSS");
    }

    #[test]
    fn test_strip_tags_collapses_whitespace() {
        assert_eq!(strip_tags("  <b>Hello</b>\n\n   <i>world</i> "), "Hello world");
    }

    #[test]
    fn test_preview_short_text_unchanged() {
        assert_eq!(message_preview("See you <b>tomorrow</b>"), "See you tomorrow");
    }

    #[test]
    fn test_preview_truncates_long_text() {
        let content = "<p>The quick brown fox jumps over the lazy dog again and again</p>";
        let stripped = strip_tags(content);
        let preview = message_preview(content);

        assert_eq!(preview.chars().count(), PREVIEW_MAX_CHARS + 1);
        assert!(preview.ends_with('…'));
        let body: String = preview.chars().take(PREVIEW_MAX_CHARS).collect();
        assert!(stripped.starts_with(&body));
    }

    #[test]
    fn test_preview_exactly_forty_chars_not_truncated() {
        let content = "a".repeat(PREVIEW_MAX_CHARS);
        assert_eq!(message_preview(&content), content);
    }

    #[test]
    fn test_preview_empty_is_attachment() {
        assert_eq!(message_preview(""), ATTACHMENT_PLACEHOLDER);
        assert_eq!(message_preview("<URIObject type=\"Picture.1\"></URIObject>"), ATTACHMENT_PLACEHOLDER);
    }

    #[test]
    fn test_conversation_preview_uses_last_message() {
        let conversation = Conversation {
            id: "c1".to_string(),
            display_name: None,
            topic: None,
            messages: vec![
                Message { content: Some("first".to_string()), ..Default::default() },
                Message { content: Some("last".to_string()), ..Default::default() },
            ],
        };
        assert_eq!(conversation_preview(&conversation), "last");
    }

    #[test]
    fn test_conversation_preview_without_messages_is_empty() {
        let conversation =
            Conversation { id: "c1".to_string(), display_name: None, topic: None, messages: vec![] };
        assert_eq!(conversation_preview(&conversation), "");
    }
}
