use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::deserializers::{deserialize_lenient_string, is_truthy};

/// A single chat message as it appears in the export.
///
/// Every field is optional: exports differ in which fields they carry, and a field
/// present with an unexpected JSON type is treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub from: Option<String>,
    #[serde(default, rename = "displayName", deserialize_with = "deserialize_lenient_string")]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub content: Option<String>,
    #[serde(default, rename = "originalarrivaltime", skip_serializing_if = "Option::is_none")]
    pub original_arrival_time: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Value>,
}

impl Message {
    /// Raw markup body, empty when the message has none
    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    /// The timestamp-bearing field: arrival time first, then `version`
    pub fn timestamp(&self) -> Option<&Value> {
        self.original_arrival_time
            .as_ref()
            .filter(|v| is_truthy(v))
            .or_else(|| self.version.as_ref().filter(|v| is_truthy(v)))
    }

    /// True when the sender is the archive owner. Without a known owner nothing is own.
    pub fn is_own(&self, user_id: Option<&str>) -> bool {
        match (self.from.as_deref(), user_id) {
            (Some(from), Some(user)) => from == user,
            _ => false,
        }
    }

    /// Sender label for messages from other people: display name, else sender id, else empty
    pub fn author_label(&self) -> &str {
        non_empty(self.display_name.as_deref())
            .or_else(|| non_empty(self.from.as_deref()))
            .unwrap_or("")
    }
}

/// One chat thread with its messages in source order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversation {
    pub id: String,
    pub display_name: Option<String>,
    pub topic: Option<String>,
    pub messages: Vec<Message>,
}

impl Conversation {
    /// Display label: display name, else topic, else the identifier
    pub fn label(&self) -> &str {
        non_empty(self.display_name.as_deref())
            .or_else(|| non_empty(self.topic.as_deref()))
            .unwrap_or(&self.id)
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
