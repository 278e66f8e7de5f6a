//! Index builder for exported chat archives.
//!
//! # Schema Tolerance
//!
//! Root entries come in two shapes and are told apart by structural probing:
//!
//! - **Threaded** (`id` + `MessageList` array): the entry is a whole conversation and its
//!   message list is taken verbatim.
//! - **Flat log** (`conversationid`, no embedded list): the entry is one message. Messages
//!   are appended in encounter order; the conversation is created on first encounter and
//!   takes its label from that first entry.
//!
//! Entries matching neither shape are dropped without an error. They are counted so
//! callers can report them.
//!
//! Identifier collisions behave like a keyed map with stable positions: a later threaded
//! entry replaces the earlier conversation in place, and a flat-log entry appends to
//! whatever conversation already owns its id.

use std::collections::HashMap;

use serde_json::Value;

use crate::models::{ArchiveIndex, Conversation, Message};
use crate::parsers::RootDocument;
use crate::parsers::deserializers::{identifier_from_value, string_field};

const THREADED_ID_FIELD: &str = "id";
const THREADED_MESSAGES_FIELD: &str = "MessageList";
const FLAT_LOG_ID_FIELD: &str = "conversationid";
const DISPLAY_NAME_FIELD: &str = "displayName";
const TOPIC_FIELD: &str = "topic";

/// A root entry after classification
#[derive(Debug, Clone, PartialEq)]
pub enum ArchiveEntry {
    /// A complete conversation
    Threaded(Conversation),
    /// A single message of the named conversation
    FlatLog { conversation_id: String, display_name: Option<String>, message: Message },
}

/// Classify one root entry, or `None` when it matches neither schema
pub fn classify_entry(value: Value) -> Option<ArchiveEntry> {
    if !value.is_object() {
        return None;
    }

    let threaded_id = value.get(THREADED_ID_FIELD).and_then(identifier_from_value);
    if let Some(id) = threaded_id
        && let Some(Value::Array(list)) = value.get(THREADED_MESSAGES_FIELD)
    {
        let messages = list.iter().cloned().map(message_from_value).collect();
        return Some(ArchiveEntry::Threaded(Conversation {
            id,
            display_name: string_field(&value, DISPLAY_NAME_FIELD),
            topic: string_field(&value, TOPIC_FIELD),
            messages,
        }));
    }

    let conversation_id = value.get(FLAT_LOG_ID_FIELD).and_then(identifier_from_value)?;
    let display_name = string_field(&value, DISPLAY_NAME_FIELD).filter(|name| !name.is_empty());
    Some(ArchiveEntry::FlatLog { conversation_id, display_name, message: message_from_value(value) })
}

/// Messages that are not objects are kept as empty messages so thread length matches the source
fn message_from_value(value: Value) -> Message {
    serde_json::from_value(value).unwrap_or_default()
}

/// Build the conversation index from a parsed root document
///
/// Conversations keep the order of first appearance. Messages keep source order.
///
/// # Examples
///
/// ```
/// use chat_archive_viewer::indexer::build_index;
/// use chat_archive_viewer::parsers::parse_root;
/// use serde_json::json;
///
/// let root = parse_root(json!([
///     {"conversationid": "c1", "displayName": "Alice", "content": "hi"},
///     {"conversationid": "c1", "content": "again"},
/// ]));
/// let index = build_index(root);
/// assert_eq!(index.len(), 1);
/// assert_eq!(index.messages("c1").len(), 2);
/// ```
pub fn build_index(root: RootDocument) -> ArchiveIndex {
    let mut conversations: Vec<Conversation> = Vec::new();
    let mut by_id: HashMap<String, usize> = HashMap::new();
    let mut dropped = 0;

    for (position, value) in root.entries.into_iter().enumerate() {
        match classify_entry(value) {
            Some(ArchiveEntry::Threaded(conversation)) => {
                if let Some(&existing) = by_id.get(&conversation.id) {
                    conversations[existing] = conversation;
                } else {
                    by_id.insert(conversation.id.clone(), conversations.len());
                    conversations.push(conversation);
                }
            }
            Some(ArchiveEntry::FlatLog { conversation_id, display_name, message }) => {
                if let Some(&existing) = by_id.get(&conversation_id) {
                    conversations[existing].messages.push(message);
                } else {
                    let display_name = display_name.unwrap_or_else(|| conversation_id.clone());
                    by_id.insert(conversation_id.clone(), conversations.len());
                    conversations.push(Conversation {
                        id: conversation_id,
                        display_name: Some(display_name),
                        topic: None,
                        messages: vec![message],
                    });
                }
            }
            None => {
                tracing::trace!(position, "dropping entry that matches no conversation schema");
                dropped += 1;
            }
        }
    }

    let index = ArchiveIndex::new(conversations, by_id, root.user_id, dropped);
    tracing::info!(
        conversations = index.len(),
        messages = index.message_count(),
        dropped,
        "indexed archive"
    );
    index
}
