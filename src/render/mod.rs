//! Render engine: the conversation list and message thread, plus their HTML serialization

pub mod page;
pub mod rewriter;
pub mod view;

pub use page::{SiteSummary, render_document, write_failure_page, write_site};
pub use rewriter::{ContentRewriter, plain_text};
pub use view::{ChatListItem, ChatView, MessageRow, RowKind};
