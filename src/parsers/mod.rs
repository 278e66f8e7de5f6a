//! Readers for exported chat archives
//!
//! # Error Handling Strategy
//!
//! The archive has one required document and several optional ones:
//!
//! - **Root archive**: Any read or parse failure is a [`LoadError`] and aborts startup.
//!   There is no retry and no partial index.
//!
//! - **Optional documents** (media manifest, media metadata): Callers decide how to
//!   degrade. The media resolver logs and skips them.
//!
//! - **Entry-level tolerance**: The root document is parsed as untyped JSON first, so
//!   entries of unknown shape never fail the load; the indexer drops them.
//!
//! All reads go through [`ArchiveSource`] using archive-relative paths, which keeps
//! path validation in one place.

pub mod archive;
pub mod deserializers;
pub mod source;

pub use archive::{RootDocument, RootShape, load_root, parse_root};
pub use source::{ArchiveSource, DirSource, LoadError, MemorySource};
