use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use walkdir::WalkDir;

use crate::utils::{validate_file_size, validate_relative_path};

/// Failure to read one archive document
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to read {path}: {reason}")]
    Rejected { path: String, reason: String },
    #[error("{path} not found")]
    NotFound { path: String },
}

impl LoadError {
    /// Relative path of the document that failed
    pub fn path(&self) -> &str {
        match self {
            LoadError::Read { path, .. }
            | LoadError::Parse { path, .. }
            | LoadError::Rejected { path, .. }
            | LoadError::NotFound { path } => path,
        }
    }
}

/// Where archive documents are read from, addressed by archive-relative paths
pub trait ArchiveSource {
    /// Read and parse one JSON document
    fn fetch_json(&self, relative_path: &str) -> Result<Value, LoadError>;

    /// Names of the `*.json` documents directly inside a directory, sorted.
    /// Sources that cannot enumerate return an empty list.
    fn list_json(&self, _relative_dir: &str) -> Result<Vec<String>, LoadError> {
        Ok(Vec::new())
    }
}

/// Reads archive documents from a directory on disk
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, relative_path: &str) -> Result<PathBuf, LoadError> {
        let relative = Path::new(relative_path);
        validate_relative_path(relative).map_err(|e| LoadError::Rejected {
            path: relative_path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self.root.join(relative))
    }
}

impl ArchiveSource for DirSource {
    fn fetch_json(&self, relative_path: &str) -> Result<Value, LoadError> {
        let path = self.resolve(relative_path)?;
        let read_error = |source| LoadError::Read { path: relative_path.to_string(), source };

        // Validate size on the open handle to avoid a TOCTOU race
        let mut file = File::open(&path).map_err(read_error)?;
        validate_file_size(&file, &path).map_err(|e| LoadError::Rejected {
            path: relative_path.to_string(),
            reason: e.to_string(),
        })?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(read_error)?;
        tracing::debug!(path = relative_path, bytes = bytes.len(), "read archive document");

        serde_json::from_slice(&bytes)
            .map_err(|source| LoadError::Parse { path: relative_path.to_string(), source })
    }

    fn list_json(&self, relative_dir: &str) -> Result<Vec<String>, LoadError> {
        let dir = self.resolve(relative_dir)?;
        if !dir.is_dir() {
            return Err(LoadError::NotFound { path: relative_dir.to_string() });
        }

        // Symlinks are not followed so the scan stays inside the archive
        let mut names: Vec<String> = WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(dir = relative_dir, error = %e, "skipping unreadable media entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.ends_with(".json"))
            .collect();
        names.sort();
        Ok(names)
    }
}

/// In-memory archive, keyed by relative path. Useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    documents: HashMap<String, Value>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, relative_path: &str, document: Value) -> Self {
        self.documents.insert(relative_path.to_string(), document);
        self
    }
}

impl ArchiveSource for MemorySource {
    fn fetch_json(&self, relative_path: &str) -> Result<Value, LoadError> {
        self.documents
            .get(relative_path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound { path: relative_path.to_string() })
    }

    fn list_json(&self, relative_dir: &str) -> Result<Vec<String>, LoadError> {
        let prefix = format!("{}/", relative_dir.trim_end_matches('/'));
        let mut names: Vec<String> = self
            .documents
            .keys()
            .filter_map(|key| key.strip_prefix(&prefix))
            .filter(|name| !name.contains('/') && name.ends_with(".json"))
            .map(str::to_string)
            .collect();
        names.sort();
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_dir_source_reads_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("messages.json"), r#"{"userId":"me"}"#).unwrap();

        let source = DirSource::new(dir.path());
        let value = source.fetch_json("messages.json").unwrap();
        assert_eq!(value, json!({"userId": "me"}));
    }

    #[test]
    fn test_dir_source_missing_file_is_read_error() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path());

        let err = source.fetch_json("messages.json").unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }));
        assert_eq!(err.path(), "messages.json");
    }

    #[test]
    fn test_dir_source_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("messages.json"), "{not json").unwrap();

        let source = DirSource::new(dir.path());
        let err = source.fetch_json("messages.json").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert!(err.to_string().contains("failed to parse messages.json"));
    }

    #[test]
    fn test_dir_source_rejects_traversal() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path());

        let err = source.fetch_json("../outside.json").unwrap_err();
        assert!(matches!(err, LoadError::Rejected { .. }));
    }

    #[test]
    fn test_dir_source_lists_json_sorted() {
        let dir = TempDir::new().unwrap();
        let media = dir.path().join("media");
        fs::create_dir(&media).unwrap();
        fs::write(media.join("b.json"), "{}").unwrap();
        fs::write(media.join("a.json"), "{}").unwrap();
        fs::write(media.join("a.jpg"), "binary").unwrap();
        fs::create_dir(media.join("nested.json")).unwrap();

        let source = DirSource::new(dir.path());
        assert_eq!(source.list_json("media").unwrap(), vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_dir_source_list_missing_dir() {
        let dir = TempDir::new().unwrap();
        let source = DirSource::new(dir.path());
        assert!(matches!(source.list_json("media"), Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn test_memory_source_lists_direct_children() {
        let source = MemorySource::new()
            .with_document("media/x.json", json!({}))
            .with_document("media/deep/y.json", json!({}))
            .with_document("messages.json", json!([]));
        assert_eq!(source.list_json("media").unwrap(), vec!["x.json"]);
        assert!(matches!(source.fetch_json("nope.json"), Err(LoadError::NotFound { .. })));
    }
}
