//! Data models for exported chat archives.
//!
//! - [`Conversation`] - One chat thread with its ordered messages
//! - [`Message`] - A single message as it appears in the export
//! - [`MediaIndex`] - Logical media filenames mapped to readable paths
//! - [`ArchiveIndex`] - The immutable result of loading an archive
//!
//! Messages use serde with lenient field deserializers from the `parsers::deserializers`
//! module, since exports disagree on field types.

pub mod conversation;
pub mod index;
pub mod media;

pub use conversation::{Conversation, Message};
pub use index::ArchiveIndex;
pub use media::MediaIndex;
