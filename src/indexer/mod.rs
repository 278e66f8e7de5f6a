//! Index building for exported chat archives
//!
//! # Error Handling Strategy
//!
//! Indexing never fails. Once the root document has parsed, every entry is either
//! classified into a conversation or dropped:
//!
//! - **Unknown entries**: Dropped silently (trace-level log) and counted on the index.
//!
//! - **Mistyped fields**: Message fields with unexpected JSON types read as absent, so a
//!   single odd field never loses a message.
//!
//! - **Summary reporting**: An info-level log records conversation, message and drop counts.

pub mod builder;

pub use builder::{ArchiveEntry, build_index, classify_entry};
