//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for creating test archive directories
pub struct ArchiveDirBuilder {
    temp_dir: TempDir,
}

impl ArchiveDirBuilder {
    /// Create a new builder with an empty archive directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a file relative to the archive directory, creating parent directories
    pub fn with_file(self, relative_path: &str, content: &str) -> Self {
        let path = self.temp_dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(&path, content).expect("Failed to write archive file");
        self
    }

    /// Write `messages.json`
    pub fn with_messages(self, document: Value) -> Self {
        self.with_file("messages.json", &document.to_string())
    }

    /// Write `endpoints.json` listing the given metadata files
    pub fn with_manifest(self, metadata_files: &[&str]) -> Self {
        self.with_file("endpoints.json", &json!({ "media": metadata_files }).to_string())
    }

    /// Write `media/<metadata_file>` naming the logical filename
    pub fn with_media_metadata(self, metadata_file: &str, logical_filename: &str) -> Self {
        let document = json!({ "filename": logical_filename });
        self.with_file(&format!("media/{metadata_file}"), &document.to_string())
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ArchiveDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A threaded conversation entry with the given message bodies, all from `from`
pub fn threaded(id: &str, display_name: &str, from: &str, contents: &[&str]) -> Value {
    let messages: Vec<Value> = contents
        .iter()
        .enumerate()
        .map(|(i, content)| {
            json!({
                "from": from,
                "content": content,
                "originalarrivaltime": format!("2024-01-15T10:3{i}:00.000Z"),
            })
        })
        .collect();
    json!({ "id": id, "displayName": display_name, "MessageList": messages })
}

/// A flat-log message entry
pub fn flat(conversation_id: &str, display_name: Option<&str>, from: &str, content: &str) -> Value {
    let mut entry = json!({
        "conversationid": conversation_id,
        "from": from,
        "content": content,
        "version": 1705314600000u64,
    });
    if let Some(name) = display_name {
        entry["displayName"] = json!(name);
    }
    entry
}
