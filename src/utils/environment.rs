use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the default archive directory
pub const ARCHIVE_DIR_ENV: &str = "CHAT_ARCHIVE_DIR";

/// Get the archive directory: explicit argument, else `$CHAT_ARCHIVE_DIR`, else the
/// current directory
pub fn get_archive_dir(explicit: Option<PathBuf>) -> Result<PathBuf> {
    resolve_archive_dir(explicit, env::var(ARCHIVE_DIR_ENV).ok())
}

fn resolve_archive_dir(explicit: Option<PathBuf>, from_env: Option<String>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir);
    }
    if let Some(dir) = from_env.filter(|d| !d.trim().is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    env::current_dir().context("Failed to determine the current directory")
}
