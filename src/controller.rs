//! Startup sequence: load the root archive, index it, resolve media, open the view.
//!
//! Each step runs once and in order. Only the root archive can fail the sequence;
//! there are no retries.

use crate::config::{LoadOptions, RenderOptions};
use crate::indexer::build_index;
use crate::media::load_media_index;
use crate::models::ArchiveIndex;
use crate::parsers::{ArchiveSource, LoadError, load_root};
use crate::render::ChatView;

/// Load an archive into an immutable index
pub fn load_archive(source: &dyn ArchiveSource, options: &LoadOptions) -> Result<ArchiveIndex, LoadError> {
    let root = load_root(source, &options.layout.root_file)?;
    let index = build_index(root);
    let media = load_media_index(source, options);
    Ok(index.with_media(media))
}

/// Open the view over a loaded index: list rendered, first conversation's thread rendered
pub fn open_view(index: &ArchiveIndex, options: RenderOptions) -> ChatView<'_> {
    ChatView::new(index, options)
}
