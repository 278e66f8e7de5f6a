//! Static HTML output for the two render targets
//!
//! One page is written per conversation. Every page carries the full conversation
//! list, so following a list entry's link is the "click" that switches threads.
//! `index.html` is the page of the first conversation.
//!
//! Media paths stay archive-relative in the markup. When the site is written
//! somewhere other than the archive directory, the resolved media files are copied
//! alongside the pages so those paths still resolve.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::RenderOptions;
use crate::models::ArchiveIndex;
use crate::render::view::{ChatListItem, ChatView, MessageRow};
use crate::utils::text::escape_html;
use crate::utils::validate_relative_path;

pub const INDEX_PAGE: &str = "index.html";

const STYLE: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body {
    font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
    background: #f0f2f5;
    color: #1c1e21;
    height: 100vh;
}
#app { display: flex; height: 100vh; }
#chat-list {
    list-style: none;
    width: 320px;
    overflow-y: auto;
    background: #fff;
    border-right: 1px solid #ddd;
}
#chat-list li a {
    display: flex;
    align-items: center;
    gap: 12px;
    padding: 10px 14px;
    color: inherit;
    text-decoration: none;
}
#chat-list li.active a, #chat-list li a:hover { background: #e7f3ff; }
.chat-avatar {
    flex: none;
    width: 40px;
    height: 40px;
    border-radius: 50%;
    background: #0084ff;
    color: #fff;
    display: flex;
    align-items: center;
    justify-content: center;
    font-weight: 600;
}
.chat-info { min-width: 0; }
.chat-title { font-weight: 600; }
.chat-last { color: #65676b; font-size: 0.85em; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
#messages { flex: 1; overflow-y: auto; padding: 16px; display: flex; flex-direction: column; gap: 8px; }
.message-row { display: flex; }
.message-row.own { justify-content: flex-end; }
.bubble { max-width: 65%; padding: 8px 12px; border-radius: 14px; background: #fff; display: flex; flex-direction: column; gap: 4px; }
.message-row.own .bubble { background: #0084ff; color: #fff; }
.bubble img { max-width: 100%; border-radius: 8px; }
.author { font-size: 0.8em; font-weight: 600; color: #65676b; }
.time { font-size: 0.7em; opacity: 0.7; align-self: flex-end; }
.load-error { margin: auto; }
"#;

/// Summary of a written static viewer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSummary {
    pub out_dir: PathBuf,
    /// Conversation pages written, not counting `index.html`
    pub pages: usize,
    /// Media files copied from the archive into `out_dir`
    pub media_copied: usize,
}

/// File name of the page showing the conversation at `position`
pub fn page_file_name(position: usize) -> String {
    format!("chat-{position}.html")
}

fn document(title: &str, app: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
<div id="app">
{app}
</div>
</body>
</html>
"#,
        title = escape_html(title),
    )
}

fn render_list_item(out: &mut String, position: usize, item: &ChatListItem) {
    let class = if item.active { r#" class="active""# } else { "" };
    out.push_str(&format!(
        r#"<li{class}><a href="{href}"><div class="chat-avatar">{avatar}</div><div class="chat-info"><div class="chat-title">{title}</div><div class="chat-last">{preview}</div></div></a></li>"#,
        href = page_file_name(position),
        avatar = escape_html(&item.avatar),
        title = escape_html(&item.title),
        preview = escape_html(&item.preview),
    ));
    out.push('\n');
}

fn render_row(out: &mut String, row: &MessageRow) {
    out.push_str(&format!(r#"<div class="message-row {}"><div class="bubble">"#, row.kind.class_name()));
    if let Some(author) = &row.author {
        out.push_str(&format!(r#"<span class="author">{}</span>"#, escape_html(author)));
    }
    // Content is already rewritten for the configured markup mode
    out.push_str(&format!(
        r#"<span>{}</span><span class="time">{}</span></div></div>"#,
        row.content,
        escape_html(&row.time)
    ));
    out.push('\n');
}

/// Serialize the current state of a view into a complete HTML document
pub fn render_document(view: &ChatView<'_>) -> String {
    let mut app = String::from("<ul id=\"chat-list\">\n");
    for (position, item) in view.chat_list().iter().enumerate() {
        render_list_item(&mut app, position, item);
    }
    app.push_str("</ul>\n<div id=\"messages\">\n");
    for row in view.messages() {
        render_row(&mut app, row);
    }
    app.push_str("</div>");

    let title = view.active_conversation().map(|c| c.label()).unwrap_or("Chat Archive");
    document(title, &app)
}

/// The page shown when the root archive cannot be loaded
pub fn render_failure_page(root_file: &str) -> String {
    let message = format!(
        "Failed to load {}. Check that the archive directory contains a readable JSON export.",
        escape_html(root_file)
    );
    document("Chat Archive", &format!(r#"<div class="load-error">{message}</div>"#))
}

fn write_page(out_dir: &Path, name: &str, html: &str) -> Result<()> {
    let path = out_dir.join(name);
    fs::write(&path, html).with_context(|| format!("Failed to write {}", path.display()))
}

fn same_dir(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Copy one resolved media file from the archive into the output directory.
/// Returns false when the file is missing, not a regular file, or escapes the archive.
fn copy_media_file(archive_dir: &Path, out_dir: &Path, relative: &str) -> Result<bool> {
    if let Err(e) = validate_relative_path(Path::new(relative)) {
        tracing::warn!(path = relative, error = %e, "not copying media outside the archive");
        return Ok(false);
    }

    let source = archive_dir.join(relative);
    // symlink_metadata so links pointing out of the archive are not followed
    match fs::symlink_metadata(&source) {
        Ok(metadata) if metadata.is_file() => {}
        _ => {
            tracing::warn!(path = relative, "media file missing, page will show a broken image");
            return Ok(false);
        }
    }

    let target = out_dir.join(relative);
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create media directory {}", parent.display()))?;
    }
    fs::copy(&source, &target)
        .with_context(|| format!("Failed to copy {} to {}", source.display(), target.display()))?;
    Ok(true)
}

/// Write the static viewer: `index.html` plus one page per conversation
///
/// Media paths are relative to `archive_dir`. When `out_dir` is a different
/// directory, every resolved media file is copied under `out_dir` at the same
/// relative path.
pub fn write_site(
    index: &ArchiveIndex,
    options: RenderOptions,
    archive_dir: &Path,
    out_dir: &Path,
) -> Result<SiteSummary> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;

    let mut view = ChatView::new(index, options);
    write_page(out_dir, INDEX_PAGE, &render_document(&view))?;

    for position in 0..index.len() {
        view.select(position);
        write_page(out_dir, &page_file_name(position), &render_document(&view))?;
    }

    let mut media_copied = 0;
    if !same_dir(archive_dir, out_dir) {
        for path in index.media().paths() {
            if copy_media_file(archive_dir, out_dir, path)? {
                media_copied += 1;
            }
        }
    }

    tracing::info!(
        out_dir = %out_dir.display(),
        pages = index.len(),
        media_copied,
        "wrote static viewer"
    );
    Ok(SiteSummary { out_dir: out_dir.to_path_buf(), pages: index.len(), media_copied })
}

/// Write the failure page as `index.html`
pub fn write_failure_page(out_dir: &Path, root_file: &str) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory {}", out_dir.display()))?;
    write_page(out_dir, INDEX_PAGE, &render_failure_page(root_file))?;
    Ok(out_dir.join(INDEX_PAGE))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{MarkupMode, TimeZoneMode};
    use crate::indexer::build_index;
    use crate::parsers::parse_root;

    fn index() -> ArchiveIndex {
        build_index(parse_root(json!({
            "userId": "8:me",
            "conversations": [
                {"id": "a", "displayName": "<Alice>", "MessageList": [
                    {"from": "8:alice", "displayName": "Al & Co", "content": "<i>hey</i>"},
                    {"from": "8:me", "content": "yo"}
                ]},
                {"id": "b", "displayName": "Bob", "MessageList": []}
            ]
        })))
    }

    fn options() -> RenderOptions {
        RenderOptions { markup: MarkupMode::Trusted, time_zone: TimeZoneMode::Utc }
    }

    #[test]
    fn test_document_containers() {
        let index = index();
        let html = render_document(&ChatView::new(&index, options()));

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<div id="app">"#));
        assert!(html.contains(r#"<ul id="chat-list">"#));
        assert!(html.contains(r#"<div id="messages">"#));
    }

    #[test]
    fn test_labels_escaped_content_live() {
        let index = index();
        let html = render_document(&ChatView::new(&index, options()));

        assert!(html.contains("&lt;Alice&gt;"));
        assert!(html.contains(r#"<span class="author">Al &amp; Co</span>"#));
        assert!(html.contains("<span><i>hey</i></span>"));
        assert!(html.contains(r#"<div class="message-row own">"#));
    }

    #[test]
    fn test_active_entry_links() {
        let index = index();
        let mut view = ChatView::new(&index, options());
        view.select(1);
        let html = render_document(&view);

        assert!(html.contains(r#"<li><a href="chat-0.html">"#));
        assert!(html.contains(r#"<li class="active"><a href="chat-1.html">"#));
        assert!(html.contains("<title>Bob</title>"));
    }

    #[test]
    fn test_write_site() {
        let dir = TempDir::new().unwrap();
        let index = index();
        let summary = write_site(&index, options(), dir.path(), dir.path()).unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.media_copied, 0);
        let index_page = fs::read_to_string(dir.path().join("index.html")).unwrap();
        let first_page = fs::read_to_string(dir.path().join("chat-0.html")).unwrap();
        assert_eq!(index_page, first_page);
        assert!(dir.path().join("chat-1.html").exists());
    }

    #[test]
    fn test_write_site_empty_archive() {
        let dir = TempDir::new().unwrap();
        let index = build_index(parse_root(json!([])));
        let summary = write_site(&index, options(), dir.path(), dir.path()).unwrap();

        assert_eq!(summary.pages, 0);
        let html = fs::read_to_string(dir.path().join("index.html")).unwrap();
        assert!(html.contains("<title>Chat Archive</title>"));
    }

    fn media_index(entries: &[(&str, &str)]) -> ArchiveIndex {
        let conversations = json!([{"id": "a", "MessageList": [
            {"from": "8:x", "content": "<OriginalName v=\"photo.heic\"/>"}
        ]}]);
        let media = entries.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        build_index(parse_root(conversations)).with_media(media)
    }

    #[test]
    fn test_write_site_elsewhere_copies_media() {
        let archive = TempDir::new().unwrap();
        fs::create_dir_all(archive.path().join("media")).unwrap();
        fs::write(archive.path().join("media/abc.heic"), b"heic").unwrap();
        let out = TempDir::new().unwrap();

        let index = media_index(&[("photo.heic", "media/abc.heic"), ("gone.png", "media/gone.png")]);
        let summary = write_site(&index, options(), archive.path(), out.path()).unwrap();

        assert_eq!(summary.media_copied, 1);
        assert_eq!(fs::read(out.path().join("media/abc.heic")).unwrap(), b"heic");
        let html = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(html.contains(r#"<img src="media/abc.heic" alt="media" />"#));
    }

    #[test]
    fn test_write_site_never_copies_outside_archive() {
        let outer = TempDir::new().unwrap();
        fs::write(outer.path().join("secret.png"), b"secret").unwrap();
        let archive = outer.path().join("archive");
        fs::create_dir_all(&archive).unwrap();
        let out = TempDir::new().unwrap();

        let index = media_index(&[("photo.heic", "../secret.png")]);
        let summary = write_site(&index, options(), &archive, out.path()).unwrap();

        assert_eq!(summary.media_copied, 0);
        let written: Vec<_> = fs::read_dir(out.path()).unwrap().collect();
        assert_eq!(written.len(), 2, "only index.html and chat-0.html are written");
    }

    #[test]
    fn test_failure_page() {
        let dir = TempDir::new().unwrap();
        let path = write_failure_page(dir.path(), "messages.json").unwrap();
        let html = fs::read_to_string(path).unwrap();

        assert!(html.contains("Failed to load messages.json."));
        assert!(!html.contains(r#"<ul id="chat-list">"#));
    }
}
