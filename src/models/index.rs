use std::collections::HashMap;

use super::{Conversation, MediaIndex, Message};

/// The loaded archive: conversations in index order plus everything needed to render them.
///
/// Produced once by the load step and read-only afterwards; render code borrows it.
#[derive(Debug, Clone, Default)]
pub struct ArchiveIndex {
    conversations: Vec<Conversation>,
    by_id: HashMap<String, usize>,
    media: MediaIndex,
    user_id: Option<String>,
    dropped_entries: usize,
}

impl ArchiveIndex {
    pub(crate) fn new(
        conversations: Vec<Conversation>,
        by_id: HashMap<String, usize>,
        user_id: Option<String>,
        dropped_entries: usize,
    ) -> Self {
        Self { conversations, by_id, media: MediaIndex::default(), user_id, dropped_entries }
    }

    /// Attach the media mapping built after indexing
    pub fn with_media(mut self, media: MediaIndex) -> Self {
        self.media = media;
        self
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.position(conversation_id).map(|pos| &self.conversations[pos])
    }

    /// Position of a conversation in index order
    pub fn position(&self, conversation_id: &str) -> Option<usize> {
        self.by_id.get(conversation_id).copied()
    }

    /// Messages of a conversation; unknown ids yield an empty thread
    pub fn messages(&self, conversation_id: &str) -> &[Message] {
        self.get(conversation_id).map(|c| c.messages.as_slice()).unwrap_or(&[])
    }

    pub fn message_count(&self) -> usize {
        self.conversations.iter().map(|c| c.messages.len()).sum()
    }

    pub fn media(&self) -> &MediaIndex {
        &self.media
    }

    /// Identifier of the archive owner, used to tell own messages from others
    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Root entries that matched neither conversation schema
    pub fn dropped_entries(&self) -> usize {
        self.dropped_entries
    }
}
