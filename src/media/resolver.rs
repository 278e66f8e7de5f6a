use serde_json::Value;

use crate::config::LoadOptions;
use crate::models::MediaIndex;
use crate::parsers::{ArchiveSource, LoadError};

const MANIFEST_MEDIA_FIELD: &str = "media";
const METADATA_FILENAME_FIELD: &str = "filename";
const METADATA_SUFFIX: &str = ".json";

/// Path of the media file described by a metadata document
///
/// The metadata document's first `.json` is swapped for the logical filename's
/// extension. A logical name without a dot is used whole as the extension.
///
/// ```
/// use chat_archive_viewer::media::resolve_media_path;
///
/// assert_eq!(resolve_media_path("media", "abc.json", "photo.heic"), "media/abc.heic");
/// ```
pub fn resolve_media_path(media_dir: &str, metadata_file: &str, logical_filename: &str) -> String {
    let extension = logical_filename.rsplit('.').next().unwrap_or(logical_filename);
    let file = metadata_file.replacen(METADATA_SUFFIX, &format!(".{extension}"), 1);
    format!("{}/{}", media_dir.trim_end_matches('/'), file)
}

/// Metadata file names listed by the manifest, or discovered by scanning when allowed
fn metadata_files(source: &dyn ArchiveSource, options: &LoadOptions) -> Option<Vec<String>> {
    let layout = &options.layout;
    match source.fetch_json(&layout.manifest_file) {
        Ok(manifest) => Some(manifest_entries(&manifest)),
        Err(LoadError::Parse { path, source: e }) => {
            tracing::debug!(path = %path, error = %e, "media manifest unparsable, skipping media");
            None
        }
        Err(e) if options.scan_media => {
            tracing::debug!(error = %e, "media manifest unavailable, scanning media directory");
            match source.list_json(&layout.media_dir) {
                Ok(files) => Some(files),
                Err(e) => {
                    tracing::debug!(error = %e, "media directory scan failed, skipping media");
                    None
                }
            }
        }
        Err(e) => {
            tracing::debug!(error = %e, "media manifest unavailable, skipping media");
            None
        }
    }
}

fn manifest_entries(manifest: &Value) -> Vec<String> {
    match manifest.get(MANIFEST_MEDIA_FIELD) {
        Some(Value::Array(entries)) => {
            entries.iter().filter_map(Value::as_str).map(str::to_string).collect()
        }
        _ => Vec::new(),
    }
}

/// Read one metadata document and return its logical filename and resolved path
fn resolve_entry(
    source: &dyn ArchiveSource,
    media_dir: &str,
    metadata_file: &str,
) -> Result<(String, String), String> {
    let metadata_path = format!("{}/{}", media_dir.trim_end_matches('/'), metadata_file);
    let metadata = source.fetch_json(&metadata_path).map_err(|e| e.to_string())?;
    let logical = metadata
        .get(METADATA_FILENAME_FIELD)
        .and_then(Value::as_str)
        .ok_or_else(|| format!("{metadata_path} has no \"{METADATA_FILENAME_FIELD}\" string"))?;

    Ok((logical.to_string(), resolve_media_path(media_dir, metadata_file, logical)))
}

/// Build the media index for an archive
///
/// Metadata documents are read one at a time in manifest order. A failing entry is
/// skipped and the entries resolved so far are kept. A later entry naming the same
/// logical file wins.
pub fn load_media_index(source: &dyn ArchiveSource, options: &LoadOptions) -> MediaIndex {
    let Some(files) = metadata_files(source, options) else {
        return MediaIndex::new();
    };

    let media_dir = options.layout.media_dir.as_str();
    let mut index = MediaIndex::new();
    let mut skipped = 0;

    for file in files.iter().filter(|f| f.ends_with(METADATA_SUFFIX)) {
        match resolve_entry(source, media_dir, file) {
            Ok((logical, path)) => index.insert(logical, path),
            Err(reason) => {
                tracing::warn!(entry = %file, %reason, "skipping media entry");
                skipped += 1;
            }
        }
    }

    tracing::debug!(resolved = index.len(), skipped, "built media index");
    index
}
