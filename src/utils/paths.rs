use std::env;
use std::fs::File;
use std::path::{Component, Path};

use anyhow::{Context, Result, bail};

// Maximum size for a single archive document: 512MB
const MAX_FILE_SIZE_BYTES: u64 = 512 * 1024 * 1024;

/// Validates that an archive-relative path stays inside the archive directory
///
/// # Errors
///
/// Returns an error if:
/// - The path contains '..' components (path traversal)
/// - The path is absolute or carries a root/prefix
/// - The path is empty
pub fn validate_relative_path(path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        bail!("Path is empty");
    }

    for component in path.components() {
        match component {
            Component::ParentDir => bail!("Path contains '..' component: {}", path.display()),
            Component::RootDir | Component::Prefix(_) => {
                bail!("Path must be relative to the archive: {}", path.display())
            }
            Component::CurDir | Component::Normal(_) => {}
        }
    }

    Ok(())
}

/// Validates that a file's size is within acceptable limits (512MB)
///
/// Takes an open file handle to avoid TOCTOU (time-of-check-time-of-use)
/// race conditions where the file could be modified between the size check
/// and subsequent file operations.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than 512MB
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_FILE_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_FILE_SIZE_BYTES
        );
    }

    Ok(())
}

/// Formats a path with ~ substitution for the home directory
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use chat_archive_viewer::format_path_with_tilde;
///
/// let path = PathBuf::from("/Users/alice/Documents/skype-export");
/// // Returns "~/Documents/skype-export" if HOME=/Users/alice
/// let formatted = format_path_with_tilde(&path);
/// ```
pub fn format_path_with_tilde(path: &Path) -> String {
    let home = env::var("HOME").ok();
    tilde_relative_to(path, home.as_deref())
}

/// Replace a leading `home` with `~`, matching whole path components only
pub(crate) fn tilde_relative_to(path: &Path, home: Option<&str>) -> String {
    if let Some(home) = home.filter(|h| !h.is_empty())
        && let Ok(rest) = path.strip_prefix(home)
    {
        return if rest.as_os_str().is_empty() {
            "~".to_string()
        } else {
            format!("~/{}", rest.display())
        };
    }

    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_validate_simple_relative_path() {
        assert!(validate_relative_path(Path::new("messages.json")).is_ok());
        assert!(validate_relative_path(Path::new("media/abc.json")).is_ok());
        assert!(validate_relative_path(Path::new("./media/abc.json")).is_ok());
    }

    #[test]
    fn test_validate_path_with_parent_dir() {
        let err = validate_relative_path(Path::new("media/../../etc/passwd")).unwrap_err();
        assert!(err.to_string().contains("'..'"));
    }

    #[test]
    fn test_validate_absolute_path() {
        assert!(validate_relative_path(Path::new("/etc/passwd")).is_err());
    }

    #[test]
    fn test_validate_empty_path() {
        assert!(validate_relative_path(Path::new("")).is_err());
    }

    #[test]
    fn test_validate_file_size_small_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{}").unwrap();
        let handle = File::open(file.path()).unwrap();
        assert!(validate_file_size(&handle, file.path()).is_ok());
    }

    #[test]
    fn test_format_path_with_tilde() {
        let path = PathBuf::from("/Users/testuser/exports/skype");
        assert_eq!(tilde_relative_to(&path, Some("/Users/testuser")), "~/exports/skype");
        assert_eq!(tilde_relative_to(Path::new("/Users/testuser"), Some("/Users/testuser/")), "~");

        // Path not under home
        let other = PathBuf::from("/opt/archives");
        assert_eq!(tilde_relative_to(&other, Some("/Users/testuser")), "/opt/archives");

        // Empty home never matches
        assert_eq!(tilde_relative_to(&other, Some("")), "/opt/archives");
    }

    #[test]
    fn test_tilde_requires_component_boundary() {
        let path = PathBuf::from("/Users/alice/exports");
        assert_eq!(tilde_relative_to(&path, Some("/Users/al")), "/Users/alice/exports");
    }
}
