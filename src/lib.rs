//! Chat Archive Viewer - Browse exported chat archives
//!
//! This library loads a chat export from an archive directory and renders it as a
//! two-pane chat UI: a conversation list and the active conversation's thread. It
//! supports:
//!
//! - Root documents shaped as `{"conversations": [...]}`, a bare list, or a keyed object
//! - Threaded entries (`id` + `MessageList`) and flat message logs (`conversationid`)
//! - Media references resolved through an optional `endpoints.json` manifest
//! - Static HTML output and an interactive terminal viewer over the same view state
//!
//! # Example
//!
//! ```no_run
//! use chat_archive_viewer::config::{LoadOptions, RenderOptions};
//! use chat_archive_viewer::{DirSource, load_archive, open_view};
//!
//! let source = DirSource::new("/Users/alice/skype-export");
//! let index = load_archive(&source, &LoadOptions::default())?;
//! let mut view = open_view(&index, RenderOptions::default());
//! view.select(1);
//! println!("{} messages in the second conversation", view.messages().len());
//! # Ok::<(), chat_archive_viewer::LoadError>(())
//! ```

pub mod cli;
pub mod config;
pub mod controller;
pub mod indexer;
pub mod media;
pub mod models;
pub mod parsers;
pub mod render;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use controller::{load_archive, open_view};
pub use indexer::build_index;
pub use models::{ArchiveIndex, Conversation, MediaIndex, Message};
pub use parsers::{ArchiveSource, DirSource, LoadError, MemorySource, parse_root};
pub use render::{ChatView, ContentRewriter};
pub use utils::paths::format_path_with_tilde;
