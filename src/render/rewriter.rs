//! Message body rewriting
//!
//! A best-effort, single-pass text transform over the export's message markup.
//! It is not a markup parser: it recognizes exactly two constructs and leaves
//! everything else alone.
//!
//! - **Links**: `<a href="http(s):...">...</a>` becomes an inline image when the URL
//!   names a jpg, jpeg, png or gif file, otherwise a link that opens in a new tab.
//! - **Media markers**: the first `OriginalName v="..."` attribute is looked up in the
//!   media index and, when it resolves, an image is appended after the content.
//!
//! In [`MarkupMode::Strict`] all text outside those two constructs is escaped.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::MarkupMode;
use crate::models::MediaIndex;
use crate::utils::text::escape_attr;

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a href="(https?:[^"]+)"[^>]*>[^<]*</a>"#).expect("valid anchor regex")
});
static IMAGE_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(jpg|jpeg|png|gif)$").expect("valid image url regex"));
static MEDIA_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"OriginalName v="([^"]+)""#).expect("valid media marker regex"));
static IMG_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<img\b[^>]*?\bsrc="([^"]*)"[^>]*>"#).expect("valid img tag regex")
});
static BR_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid br tag regex"));
static ANY_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid tag regex"));

/// Rewrites raw message bodies into displayable markup
#[derive(Debug, Clone, Copy)]
pub struct ContentRewriter<'a> {
    media: &'a MediaIndex,
    mode: MarkupMode,
}

impl<'a> ContentRewriter<'a> {
    pub fn new(media: &'a MediaIndex, mode: MarkupMode) -> Self {
        Self { media, mode }
    }

    /// Rewrite one message body
    ///
    /// # Examples
    ///
    /// ```
    /// use chat_archive_viewer::config::MarkupMode;
    /// use chat_archive_viewer::models::MediaIndex;
    /// use chat_archive_viewer::render::ContentRewriter;
    ///
    /// let media = MediaIndex::new();
    /// let rewriter = ContentRewriter::new(&media, MarkupMode::Trusted);
    /// assert_eq!(
    ///     rewriter.rewrite(r#"<a href="https://x.test/cat.PNG">cat</a>"#),
    ///     r#"<img src="https://x.test/cat.PNG" alt="image" />"#
    /// );
    /// ```
    pub fn rewrite(&self, content: &str) -> String {
        let mut output = match self.mode {
            MarkupMode::Trusted => ANCHOR_RE
                .replace_all(content, |caps: &Captures| link_replacement(&caps[1], false))
                .into_owned(),
            MarkupMode::Strict => rewrite_strict(content),
        };

        // Strict output has escaped quotes, so the marker is looked up in the source text
        let marker_source = match self.mode {
            MarkupMode::Trusted => output.as_str(),
            MarkupMode::Strict => content,
        };
        let media_path = MEDIA_MARKER_RE
            .captures(marker_source)
            .and_then(|caps| self.media.resolve(&caps[1]))
            .map(str::to_string);

        if let Some(path) = media_path {
            let path = match self.mode {
                MarkupMode::Trusted => path,
                MarkupMode::Strict => escape_attr(&path),
            };
            output.push_str(&format!(r#"<br><img src="{path}" alt="media" />"#));
        }
        output
    }
}

fn link_replacement(url: &str, escape: bool) -> String {
    let url = if escape { escape_attr(url) } else { url.to_string() };
    if IMAGE_URL_RE.is_match(&url) {
        format!(r#"<img src="{url}" alt="image" />"#)
    } else {
        format!(r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#)
    }
}

// Entities already in the export (`&apos;`, `&amp;`) pass through so they render once
fn rewrite_strict(content: &str) -> String {
    let mut output = String::with_capacity(content.len());
    let mut last = 0;
    for caps in ANCHOR_RE.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        output.push_str(&escape_attr(&content[last..whole.start()]));
        output.push_str(&link_replacement(&caps[1], true));
        last = whole.end();
    }
    output.push_str(&escape_attr(&content[last..]));
    output
}

/// Convert rewritten markup into plain text for the terminal viewer
///
/// Images become `[image: SRC]`, line breaks become newlines, remaining tags are
/// dropped and the common entities are decoded.
pub fn plain_text(markup: &str) -> String {
    let text = IMG_TAG_RE.replace_all(markup, "[image: $1]");
    let text = BR_TAG_RE.replace_all(&text, "\n");
    let text = ANY_TAG_RE.replace_all(&text, "");
    decode_entities(&text)
}

fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
