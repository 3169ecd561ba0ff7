//! Scratch directory and media file fixtures.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;

/// Workspace root, derived from this crate's manifest location.
#[must_use]
pub fn workspace_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map_or(manifest_dir.clone(), Path::to_path_buf)
}

/// Directory under `target/` that hosts per-test scratch directories.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn scratch_root() -> Result<PathBuf> {
    let root = workspace_root().join("target").join("glimpse-scratch");
    fs::create_dir_all(&root)
        .with_context(|| format!("failed to create scratch root {}", root.display()))?;
    Ok(root)
}

/// Create a uniquely named scratch directory removed when the guard drops.
///
/// # Errors
///
/// Returns an error if the scratch root or the directory cannot be created.
pub fn temp_dir(prefix: &str) -> Result<TempDir> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempdir_in(scratch_root()?)
        .context("failed to create scratch directory")
}

/// Write a fake media file at `root/relative`, creating parent directories.
///
/// # Errors
///
/// Returns an error if the parent directory or the file cannot be written.
pub fn write_media_file(root: &Path, relative: &str) -> Result<PathBuf> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&path, b"not really a video")
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_dir_lives_under_scratch_root() -> Result<()> {
        let dir = temp_dir("glimpse-fixtures-")?;
        assert!(dir.path().starts_with(scratch_root()?));
        assert!(dir.path().is_dir());
        Ok(())
    }

    #[test]
    fn write_media_file_creates_parents() -> Result<()> {
        let dir = temp_dir("glimpse-fixtures-")?;
        let path = write_media_file(dir.path(), "Movies/Film (2024)/Film (2024).mkv")?;
        assert!(path.is_file());
        assert!(path.ends_with("Film (2024).mkv"));
        Ok(())
    }
}
