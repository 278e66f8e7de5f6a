use serde_json::Value;

use super::deserializers::string_field;
use super::source::{ArchiveSource, LoadError};

/// Field holding the conversation list in the wrapped root shape
const CONVERSATIONS_FIELD: &str = "conversations";
/// Top-level field naming the archive owner
const USER_ID_FIELD: &str = "userId";

/// How the root document presented its conversation entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootShape {
    /// `{"conversations": [...]}`
    Wrapped,
    /// `[...]`
    BareList,
    /// `{"<key>": entry, ...}`
    Keyed,
    /// Anything else: no entries
    Empty,
}

/// Root archive document flattened into a plain entry list
#[derive(Debug, Clone, PartialEq)]
pub struct RootDocument {
    pub shape: RootShape,
    pub user_id: Option<String>,
    pub entries: Vec<Value>,
}

/// Flatten any supported root shape into an entry list and pick up the owner id
pub fn parse_root(data: Value) -> RootDocument {
    let user_id = string_field(&data, USER_ID_FIELD).filter(|id| !id.is_empty());

    let (shape, entries) = match data {
        Value::Object(map) => {
            if matches!(map.get(CONVERSATIONS_FIELD), Some(Value::Array(_))) {
                let list = map
                    .into_iter()
                    .find_map(|(key, value)| match value {
                        Value::Array(list) if key == CONVERSATIONS_FIELD => Some(list),
                        _ => None,
                    })
                    .unwrap_or_default();
                (RootShape::Wrapped, list)
            } else {
                // Every value is an entry, in document order
                (RootShape::Keyed, map.into_iter().map(|(_, v)| v).collect())
            }
        }
        Value::Array(list) => (RootShape::BareList, list),
        _ => (RootShape::Empty, Vec::new()),
    };

    RootDocument { shape, user_id, entries }
}

/// Read the root archive document. Any failure here is fatal for startup.
pub fn load_root(source: &dyn ArchiveSource, path: &str) -> Result<RootDocument, LoadError> {
    let data = source.fetch_json(path)?;
    let root = parse_root(data);
    tracing::debug!(
        path,
        shape = ?root.shape,
        entries = root.entries.len(),
        has_user_id = root.user_id.is_some(),
        "parsed root archive"
    );
    Ok(root)
}
