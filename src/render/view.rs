use crate::config::RenderOptions;
use crate::models::{ArchiveIndex, Conversation, Message};
use crate::render::rewriter::ContentRewriter;
use crate::utils::text::{conversation_preview, get_initials};
use crate::utils::timestamps::format_date;

/// One entry of the conversation list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatListItem {
    pub conversation_id: String,
    pub avatar: String,
    pub title: String,
    pub preview: String,
    pub active: bool,
}

impl ChatListItem {
    fn from_conversation(conversation: &Conversation) -> Self {
        let title = conversation.label().to_string();
        Self {
            conversation_id: conversation.id.clone(),
            avatar: get_initials(&title),
            preview: conversation_preview(conversation),
            title,
            active: false,
        }
    }
}

/// Whether a thread row was sent by the archive owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Own,
    Other,
}

impl RowKind {
    pub fn class_name(self) -> &'static str {
        match self {
            RowKind::Own => "own",
            RowKind::Other => "other",
        }
    }
}

/// One rendered message of the active thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageRow {
    pub kind: RowKind,
    /// Sender label, only on rows from other people
    pub author: Option<String>,
    /// Rewritten markup
    pub content: String,
    pub time: String,
}

/// Build the thread rows for a conversation. Unknown ids give an empty thread.
pub fn message_rows(index: &ArchiveIndex, conversation_id: &str, options: RenderOptions) -> Vec<MessageRow> {
    let rewriter = ContentRewriter::new(index.media(), options.markup);
    index
        .messages(conversation_id)
        .iter()
        .map(|message| message_row(message, index.user_id(), &rewriter, options))
        .collect()
}

fn message_row(
    message: &Message,
    user_id: Option<&str>,
    rewriter: &ContentRewriter<'_>,
    options: RenderOptions,
) -> MessageRow {
    let kind = if message.is_own(user_id) { RowKind::Own } else { RowKind::Other };
    MessageRow {
        kind,
        author: match kind {
            RowKind::Own => None,
            RowKind::Other => Some(message.author_label().to_string()),
        },
        content: rewriter.rewrite(message.content()),
        time: format_date(message.timestamp(), options.time_zone),
    }
}

/// The two render targets, the conversation list and the active thread, over a loaded index
///
/// Both targets are rebuilt from scratch on every render. Selecting a conversation only
/// reads the already-loaded index.
#[derive(Debug, Clone)]
pub struct ChatView<'a> {
    index: &'a ArchiveIndex,
    options: RenderOptions,
    chat_list: Vec<ChatListItem>,
    messages: Vec<MessageRow>,
    active: Option<usize>,
}

impl<'a> ChatView<'a> {
    /// Create a view with the conversation list rendered and the first conversation open
    pub fn new(index: &'a ArchiveIndex, options: RenderOptions) -> Self {
        let mut view =
            Self { index, options, chat_list: Vec::new(), messages: Vec::new(), active: None };
        view.render_conversation_list();
        view
    }

    /// Rebuild the conversation list, select the first entry and render its thread
    pub fn render_conversation_list(&mut self) {
        self.chat_list =
            self.index.conversations().iter().map(ChatListItem::from_conversation).collect();
        self.active = None;
        self.messages.clear();
        self.select(0);
    }

    /// Rebuild the thread pane from a conversation's messages
    pub fn render_messages(&mut self, conversation_id: &str) {
        self.messages = message_rows(self.index, conversation_id, self.options);
    }

    /// Select the list entry at `position` and render its thread
    ///
    /// Returns false, leaving the view unchanged, when there is no such entry.
    pub fn select(&mut self, position: usize) -> bool {
        let Some(conversation_id) =
            self.chat_list.get(position).map(|item| item.conversation_id.clone())
        else {
            return false;
        };

        for (i, item) in self.chat_list.iter_mut().enumerate() {
            item.active = i == position;
        }
        self.active = Some(position);
        self.render_messages(&conversation_id);
        true
    }

    pub fn select_id(&mut self, conversation_id: &str) -> bool {
        match self.index.position(conversation_id) {
            Some(position) => self.select(position),
            None => false,
        }
    }

    pub fn chat_list(&self) -> &[ChatListItem] {
        &self.chat_list
    }

    pub fn messages(&self) -> &[MessageRow] {
        &self.messages
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn active_conversation(&self) -> Option<&'a Conversation> {
        let index = self.index;
        self.active.and_then(|position| index.conversations().get(position))
    }

    pub fn index(&self) -> &'a ArchiveIndex {
        self.index
    }
}
