//! File system utilities for rewriting the unpacked tree.
//!
//! Provides atomic in-place replacement and copies with automatic parent
//! directory creation.

use crate::rebrand::error::{Error, ErrorExt, Result};
use std::{fs, io::Write, path::Path};

/// Replaces the contents of `path` with `contents` without ever exposing a
/// half-written file.
///
/// The new contents go to a temporary sibling file which is flushed, synced,
/// given the original file's permissions and then renamed over `path`. On
/// failure the temporary file is removed and `path` is untouched.
pub fn replace_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = path.parent().ok_or_else(|| {
        Error::GenericError(format!("{} has no parent directory", path.display()))
    })?;

    let permissions = fs::metadata(path)
        .fs_context("reading file metadata", path)?
        .permissions();

    let mut shadow = tempfile::NamedTempFile::new_in(parent)
        .fs_context("creating shadow file", parent)?;
    shadow
        .write_all(contents)
        .fs_context("writing shadow file", shadow.path())?;
    shadow
        .as_file()
        .sync_all()
        .fs_context("syncing shadow file", shadow.path())?;
    fs::set_permissions(shadow.path(), permissions)
        .fs_context("copying permissions to shadow file", shadow.path())?;

    shadow
        .persist(path)
        .map_err(|e| e.error)
        .fs_context("swapping shadow file into place", path)?;

    Ok(())
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary. Overwrites the
/// destination.
///
/// Fails if the source path is a directory or doesn't exist.
pub fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir).fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).fs_context("copying file", to)?;
    Ok(())
}

/// Marks a file as executable (0755).
#[cfg(unix)]
pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .fs_context("setting executable permissions", path)
}

/// Marks a file as executable (no-op on platforms without mode bits).
#[cfg(not(unix))]
pub fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_atomically_swaps_contents_and_leaves_no_shadow() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("Localizable.strings");
        fs::write(&target, b"old").unwrap();

        replace_atomically(&target, b"new contents").unwrap();

        assert_eq!(fs::read(&target).unwrap(), b"new contents");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn replace_atomically_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("MainMenu.nib");
        fs::write(&target, b"old").unwrap();
        fs::set_permissions(&target, fs::Permissions::from_mode(0o644)).unwrap();

        replace_atomically(&target, b"new").unwrap();

        let mode = fs::metadata(&target).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn replace_atomically_requires_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("missing.strings");
        assert!(replace_atomically(&target, b"x").is_err());
        assert!(!target.exists());
    }

    #[test]
    fn copy_file_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("AppIcns.icns");
        let dest = dir.path().join("Contents/Resources/MunkiStatus.icns");
        fs::write(&src, b"icns").unwrap();

        copy_file(&src, &dest).unwrap();
        fs::write(&src, b"icns v2").unwrap();
        copy_file(&src, &dest).unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"icns v2");
    }

    #[test]
    fn copy_file_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let err = copy_file(dir.path(), &dir.path().join("out")).unwrap_err();
        assert!(err.to_string().contains("is not a file"));
    }
}
