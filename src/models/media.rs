use std::collections::HashMap;

/// Mapping from a logical media filename to the path the file can be read from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaIndex {
    entries: HashMap<String, String>,
}

impl MediaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolved path for a logical filename, if the manifest listed it
    pub fn resolve(&self, logical_name: &str) -> Option<&str> {
        self.entries.get(logical_name).map(String::as_str)
    }

    /// Every resolved path, in no particular order
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.values().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, logical_name: String, path: String) {
        self.entries.insert(logical_name, path);
    }
}

impl FromIterator<(String, String)> for MediaIndex {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}
