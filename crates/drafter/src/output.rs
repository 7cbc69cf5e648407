//! Atomic artifact writing.
//!
//! The generated code is staged in a temporary file in the destination
//! directory and renamed into place, so a failed write never leaves a
//! truncated artifact behind.

use std::fs;
use std::io::Write;
use std::path::Path;

use log::info;
use tempfile::NamedTempFile;

use crate::error::DrafterError;

/// Write `code` to `path` atomically.
///
/// Parent directories are created as needed. The temporary file lives in
/// the same directory as the destination, keeping the final rename on one
/// filesystem.
///
/// # Errors
///
/// Returns [`DrafterError::Io`] if the directory, staging file, or rename
/// fails; on error the destination is untouched.
pub fn write_artifact(path: &Path, code: &str) -> Result<(), DrafterError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent)?;
            parent
        }
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(parent)?;
    staged.write_all(code.as_bytes())?;
    staged
        .persist(path)
        .map_err(|err| DrafterError::Io(err.error))?;

    info!(path = path.display().to_string(); "Artifact written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file_with_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");

        write_artifact(&path, "print('ok')\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "print('ok')\n");
    }

    #[test]
    fn test_write_creates_missing_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a/b/out.py");

        write_artifact(&path, "x = 1\n").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_write_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.py");

        write_artifact(&path, "old\n").unwrap();
        write_artifact(&path, "new\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new\n");
    }
}
