//! Media resolution
//!
//! Maps logical media filenames, as referenced from message markup, to the path
//! the media file can be read from. Media is an enhancement: every failure in
//! here degrades to "no image" rather than an error.

pub mod resolver;

pub use resolver::{load_media_index, resolve_media_path};
