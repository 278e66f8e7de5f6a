//! Terminal output sanitization
//!
//! Message bodies, labels and sender names come straight from the export. Before the
//! terminal viewer or the `stats` command prints them, escape sequences are removed so
//! archive content cannot move the cursor, recolor the screen or set the window title.

use std::sync::LazyLock;

use regex::Regex;

/// CSI sequences (`ESC [ ... final`) and OSC sequences (`ESC ] ... BEL` or `ESC ] ... ESC \`)
static ESCAPE_SEQUENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)?")
        .expect("valid escape sequence regex")
});

/// Strip escape sequences and control characters, keeping tabs and newlines
///
/// # Examples
///
/// ```
/// use chat_archive_viewer::utils::terminal::sanitize_for_terminal;
///
/// assert_eq!(sanitize_for_terminal("\x1b[31mhi\x1b[0m there"), "hi there");
/// ```
pub fn sanitize_for_terminal(text: &str) -> String {
    let without_sequences = ESCAPE_SEQUENCE_RE.replace_all(text, "");
    without_sequences
        .chars()
        .filter(|&ch| !ch.is_control() || ch == '\n' || ch == '\t')
        .collect()
}
