//! Viewer configuration: where archive documents live and how they are rendered.

use std::path::PathBuf;

/// Default name of the root archive document
pub const DEFAULT_ROOT_FILE: &str = "messages.json";
/// Default name of the optional media manifest
pub const DEFAULT_MANIFEST_FILE: &str = "endpoints.json";
/// Default directory holding media files and their metadata documents
pub const DEFAULT_MEDIA_DIR: &str = "media";

/// Archive-relative names of the documents the loader reads
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    pub root_file: String,
    pub manifest_file: String,
    pub media_dir: String,
}

impl Default for ArchiveLayout {
    fn default() -> Self {
        Self {
            root_file: DEFAULT_ROOT_FILE.to_string(),
            manifest_file: DEFAULT_MANIFEST_FILE.to_string(),
            media_dir: DEFAULT_MEDIA_DIR.to_string(),
        }
    }
}

/// How rewritten message markup is emitted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupMode {
    /// Message markup passes through as live HTML
    #[default]
    Trusted,
    /// Everything except the constructed image and link elements is escaped
    Strict,
}

/// Time zone used for message time labels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeZoneMode {
    #[default]
    Local,
    Utc,
}

/// Options the render engine needs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub markup: MarkupMode,
    pub time_zone: TimeZoneMode,
}

/// Options the loader needs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOptions {
    pub layout: ArchiveLayout,
    /// Discover media metadata by listing the media directory when the manifest is missing
    pub scan_media: bool,
}

/// Complete configuration for one viewer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub archive_dir: PathBuf,
    pub load: LoadOptions,
    pub render: RenderOptions,
}

impl ViewerConfig {
    pub fn new(archive_dir: impl Into<PathBuf>) -> Self {
        Self {
            archive_dir: archive_dir.into(),
            load: LoadOptions::default(),
            render: RenderOptions::default(),
        }
    }
}
