//! Link and directory operations for preview directories.
//!
//! # Design
//! - Every operation is idempotent against repeated or out-of-order calls.
//! - No locking: concurrent writers to the same link name resolve as last writer wins.
//! - Only symbolic links are ever removed by link operations; regular files are left alone.

use std::{
    fs, io,
    path::{Component, Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::error::{FsOpsError, FsOpsResult};
use crate::model::{ClearReport, LinkRecord};

/// Stateless handle over the filesystem operations used by the batch coordinator.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinkStore;

impl LinkStore {
    /// Construct a link store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Create (or replace) a link to `source_path` inside `target_dir`.
    ///
    /// The link is named after the source's base filename. The target directory
    /// is created when missing and any existing entry with the same name is
    /// replaced. The returned link path is absolute.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::SourceNotFound`] when the source is not an existing
    /// regular file, [`FsOpsError::InvalidInput`] when the link would land on the
    /// source itself, and [`FsOpsError::LinkCreationFailed`] when the link syscall fails.
    pub fn create_link(&self, source_path: &Path, target_dir: &Path) -> FsOpsResult<PathBuf> {
        if target_dir.as_os_str().is_empty() {
            return Err(FsOpsError::InvalidInput {
                field: "target_directory",
                reason: "empty",
                value: None,
            });
        }
        match fs::metadata(source_path) {
            Ok(metadata) if metadata.is_file() => {}
            _ => {
                return Err(FsOpsError::SourceNotFound {
                    path: source_path.to_path_buf(),
                });
            }
        }

        let file_name = source_path
            .file_name()
            .ok_or_else(|| FsOpsError::InvalidInput {
                field: "source_path",
                reason: "missing_file_name",
                value: Some(source_path.to_string_lossy().into_owned()),
            })?;
        let target = std::path::absolute(source_path)
            .map_err(|source| FsOpsError::io("create_link.absolute_source", source_path, source))?;

        let target_dir = std::path::absolute(target_dir)
            .map(|absolute| normalize_lexically(&absolute))
            .map_err(|source| {
                FsOpsError::io("create_link.absolute_target_dir", target_dir, source)
            })?;
        fs::create_dir_all(&target_dir).map_err(|source| {
            FsOpsError::io("create_link.create_target_dir", &target_dir, source)
        })?;

        let link_path = target_dir.join(file_name);
        match fs::symlink_metadata(&link_path) {
            Ok(existing) => {
                let replaces_source = if existing.file_type().is_symlink() {
                    normalize_lexically(&target) == link_path
                } else {
                    is_same_file(&link_path, source_path)?
                };
                if replaces_source {
                    return Err(FsOpsError::InvalidInput {
                        field: "target_directory",
                        reason: "contains_source",
                        value: Some(target_dir.to_string_lossy().into_owned()),
                    });
                }
                debug!(link = %link_path.display(), "replacing existing entry");
                remove_entry(&link_path).map_err(|source| {
                    FsOpsError::io("create_link.remove_existing", &link_path, source)
                })?;
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(FsOpsError::io(
                    "create_link.inspect_existing",
                    &link_path,
                    source,
                ));
            }
        }

        make_symlink(&target, &link_path).map_err(|source| FsOpsError::LinkCreationFailed {
            link: link_path.clone(),
            target: target.clone(),
            source,
        })?;

        info!(
            link = %link_path.display(),
            target = %target.display(),
            "created preview link"
        );
        Ok(link_path)
    }

    /// Remove the link at `link_path`.
    ///
    /// Returns `true` when a link was removed and `false` when nothing existed.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::NotASymlink`] when the entry is not a symbolic link
    /// and [`FsOpsError::RemovalFailed`] on other OS errors.
    pub fn remove_link(&self, link_path: &Path) -> FsOpsResult<bool> {
        let metadata = match fs::symlink_metadata(link_path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(link = %link_path.display(), "link already absent");
                return Ok(false);
            }
            Err(source) => {
                return Err(FsOpsError::RemovalFailed {
                    path: link_path.to_path_buf(),
                    source,
                });
            }
        };

        if !metadata.file_type().is_symlink() {
            return Err(FsOpsError::NotASymlink {
                path: link_path.to_path_buf(),
            });
        }

        match remove_entry(link_path) {
            Ok(()) => {
                info!(link = %link_path.display(), "removed preview link");
                Ok(true)
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(FsOpsError::RemovalFailed {
                path: link_path.to_path_buf(),
                source,
            }),
        }
    }

    /// Enumerate the symbolic links directly inside `directory`.
    ///
    /// Regular files and subdirectories are skipped, as are links whose target
    /// cannot be read. A missing directory yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Io`] when the directory exists but cannot be read.
    pub fn list_links(&self, directory: &Path) -> FsOpsResult<Vec<LinkRecord>> {
        let directory = std::path::absolute(directory)
            .map_err(|source| FsOpsError::io("list_links.absolute", directory, source))?;
        let mut records = Vec::new();
        for link_path in symlink_entries(&directory, "list_links")? {
            let raw_target = match fs::read_link(&link_path) {
                Ok(target) => target,
                Err(err) => {
                    warn!(
                        link = %link_path.display(),
                        error = %err,
                        "skipping link with unreadable target"
                    );
                    continue;
                }
            };
            let target = normalize_lexically(&directory.join(raw_target));
            let name = link_path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            records.push(LinkRecord {
                path: link_path,
                target,
                name,
            });
        }
        Ok(records)
    }

    /// Remove every symbolic link directly inside `directory`.
    ///
    /// Regular files and subdirectories are left in place. Individual link
    /// failures are collected in the report rather than aborting the sweep.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::Io`] when the directory exists but cannot be read.
    pub fn clear_links(&self, directory: &Path) -> FsOpsResult<ClearReport> {
        let mut report = ClearReport::default();
        for link_path in symlink_entries(directory, "clear_links")? {
            match self.remove_link(&link_path) {
                Ok(true) => report.removed.push(link_path),
                Ok(false) => {}
                Err(err) => {
                    warn!(link = %link_path.display(), error = %err, "failed to clear link");
                    report.failures.push((link_path, err));
                }
            }
        }
        Ok(report)
    }

    /// Create `path` (and parents) unless it already exists.
    ///
    /// Returns `true` when the directory was created.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::NotADirectory`] when something other than a
    /// directory occupies `path`, or [`FsOpsError::Io`] when creation fails.
    pub fn ensure_directory(&self, path: &Path) -> FsOpsResult<bool> {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => Ok(false),
            Ok(_) => Err(FsOpsError::NotADirectory {
                path: path.to_path_buf(),
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                fs::create_dir_all(path)
                    .map_err(|source| FsOpsError::io("ensure_directory.create", path, source))?;
                info!(directory = %path.display(), "created preview directory");
                Ok(true)
            }
            Err(source) => Err(FsOpsError::io("ensure_directory.inspect", path, source)),
        }
    }

    /// Remove the directory at `path`.
    ///
    /// A missing directory is a no-op and returns `false`. Without `force` the
    /// directory must be empty; with `force` its contents are removed recursively.
    ///
    /// # Errors
    ///
    /// Returns [`FsOpsError::DirectoryNotEmpty`] without touching anything when
    /// entries remain and `force` is false.
    pub fn remove_directory(&self, path: &Path, force: bool) -> FsOpsResult<bool> {
        let metadata = match fs::symlink_metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(source) => return Err(FsOpsError::io("remove_directory.inspect", path, source)),
        };
        if !metadata.is_dir() {
            return Err(FsOpsError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        if force {
            fs::remove_dir_all(path)
                .map_err(|source| FsOpsError::io("remove_directory.remove_all", path, source))?;
        } else {
            let mut entries = fs::read_dir(path)
                .map_err(|source| FsOpsError::io("remove_directory.read_dir", path, source))?;
            if entries.next().is_some() {
                return Err(FsOpsError::DirectoryNotEmpty {
                    path: path.to_path_buf(),
                });
            }
            fs::remove_dir(path)
                .map_err(|source| FsOpsError::io("remove_directory.remove", path, source))?;
        }

        info!(directory = %path.display(), force, "removed preview directory");
        Ok(true)
    }
}

/// Paths of the symbolic links directly inside `directory`, in enumeration order.
fn symlink_entries(directory: &Path, operation: &'static str) -> FsOpsResult<Vec<PathBuf>> {
    let reader = match fs::read_dir(directory) {
        Ok(reader) => reader,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => return Err(FsOpsError::io(operation, directory, source)),
    };

    let mut links = Vec::new();
    for entry in reader {
        let entry = entry.map_err(|source| FsOpsError::io(operation, directory, source))?;
        match entry.file_type() {
            Ok(file_type) if file_type.is_symlink() => links.push(entry.path()),
            Ok(_) => {}
            Err(err) => {
                warn!(
                    path = %entry.path().display(),
                    error = %err,
                    "skipping entry with unreadable file type"
                );
            }
        }
    }
    Ok(links)
}

/// Whether `first` and `second` resolve to the same filesystem entry.
fn is_same_file(first: &Path, second: &Path) -> FsOpsResult<bool> {
    let first = fs::canonicalize(first)
        .map_err(|source| FsOpsError::io("create_link.canonicalize_existing", first, source))?;
    let second = fs::canonicalize(second)
        .map_err(|source| FsOpsError::io("create_link.canonicalize_source", second, source))?;
    Ok(first == second)
}

/// Resolve `.` and `..` components without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

#[cfg(not(any(unix, windows)))]
fn make_symlink(_target: &Path, _link: &Path) -> io::Result<()> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "symbolic links are not supported on this platform",
    ))
}

#[cfg(windows)]
fn remove_entry(path: &Path) -> io::Result<()> {
    // Directory links on Windows are removed with `remove_dir`.
    match fs::remove_file(path) {
        Err(_) if fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir()) => {
            fs::remove_dir(path)
        }
        other => other,
    }
}

#[cfg(not(windows))]
fn remove_entry(path: &Path) -> io::Result<()> {
    fs::remove_file(path)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use anyhow::Result;
    use glimpse_test_support::fixtures::{temp_dir, write_media_file};
    use std::os::unix::fs::symlink;

    const PREFIX: &str = "glimpse-fsops-";

    #[test]
    fn create_link_points_at_source_and_creates_target_dir() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/movies/Movie.mkv")?;
        let target_dir = temp.path().join("out/nested");

        let store = LinkStore::new();
        let link = store.create_link(&source, &target_dir)?;

        assert_eq!(link, target_dir.join("Movie.mkv"));
        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        assert_eq!(fs::read_link(&link)?, source);
        Ok(())
    }

    #[test]
    fn create_link_twice_leaves_a_single_link() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/Movie.mkv")?;
        let target_dir = temp.path().join("out");

        let store = LinkStore::new();
        let first = store.create_link(&source, &target_dir)?;
        let second = store.create_link(&source, &target_dir)?;

        assert_eq!(first, second);
        assert_eq!(fs::read_dir(&target_dir)?.count(), 1);
        Ok(())
    }

    #[test]
    fn create_link_replaces_existing_file_of_same_name() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/Movie.mkv")?;
        let target_dir = temp.path().join("out");
        write_media_file(&target_dir, "Movie.mkv")?;

        let link = LinkStore::new().create_link(&source, &target_dir)?;

        assert!(fs::symlink_metadata(&link)?.file_type().is_symlink());
        Ok(())
    }

    #[test]
    fn create_link_into_the_source_directory_keeps_the_source() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "out/M.mkv")?;
        let original = fs::read(&source)?;

        let result = LinkStore::new().create_link(&source, &temp.path().join("out"));

        assert!(matches!(
            result,
            Err(FsOpsError::InvalidInput {
                field: "target_directory",
                reason: "contains_source",
                ..
            })
        ));
        assert!(fs::symlink_metadata(&source)?.file_type().is_file());
        assert_eq!(fs::read(&source)?, original);
        Ok(())
    }

    #[test]
    fn create_link_from_an_existing_link_path_onto_itself_is_refused() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let media = write_media_file(temp.path(), "media/M.mkv")?;
        let out = temp.path().join("out");
        let store = LinkStore::new();
        let link = store.create_link(&media, &out)?;

        let result = store.create_link(&link, &out);

        assert!(matches!(result, Err(FsOpsError::InvalidInput { .. })));
        assert_eq!(fs::read_link(&link)?, media);
        Ok(())
    }

    #[test]
    fn create_link_returns_absolute_path_for_relative_target() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/Movie.mkv")?;
        let cwd = std::env::current_dir()?;
        let relative: PathBuf = cwd
            .components()
            .skip(1)
            .map(|_| Component::ParentDir)
            .collect::<PathBuf>()
            .join(temp.path().strip_prefix("/")?)
            .join("out");
        assert!(relative.is_relative());

        let link = LinkStore::new().create_link(&source, &relative)?;

        assert_eq!(link, temp.path().join("out/Movie.mkv"));
        assert_eq!(fs::read_link(&link)?, source);
        Ok(())
    }

    #[test]
    fn create_link_rejects_missing_or_directory_sources() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let store = LinkStore::new();
        let target_dir = temp.path().join("out");

        let missing = store.create_link(&temp.path().join("missing.mkv"), &target_dir);
        assert!(matches!(missing, Err(FsOpsError::SourceNotFound { .. })));

        let directory = store.create_link(temp.path(), &target_dir);
        assert!(matches!(directory, Err(FsOpsError::SourceNotFound { .. })));
        assert!(!target_dir.exists());
        Ok(())
    }

    #[test]
    fn remove_link_is_idempotent() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/Movie.mkv")?;
        let store = LinkStore::new();
        let link = store.create_link(&source, &temp.path().join("out"))?;

        assert!(store.remove_link(&link)?);
        assert!(!store.remove_link(&link)?);
        assert!(!store.remove_link(&temp.path().join("never-created.mkv"))?);
        assert!(source.exists());
        Ok(())
    }

    #[test]
    fn remove_link_refuses_regular_files() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let file = write_media_file(temp.path(), "out/Movie.mkv")?;

        let result = LinkStore::new().remove_link(&file);

        assert!(matches!(result, Err(FsOpsError::NotASymlink { .. })));
        assert!(file.exists());
        Ok(())
    }

    #[test]
    fn list_links_skips_regular_files_and_directories() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/Movie.mkv")?;
        let out = temp.path().join("out");
        let store = LinkStore::new();
        store.create_link(&source, &out)?;
        write_media_file(&out, "plain.txt")?;
        fs::create_dir_all(out.join("subdir"))?;

        let links = store.list_links(&out)?;

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].name, "Movie.mkv");
        assert_eq!(links[0].target, source);
        assert_eq!(links[0].path, out.join("Movie.mkv"));
        Ok(())
    }

    #[test]
    fn list_links_resolves_relative_targets_and_reports_dangling_links() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let out = temp.path().join("out");
        fs::create_dir_all(&out)?;
        symlink("../media/gone.mkv", out.join("gone.mkv"))?;

        let links = LinkStore::new().list_links(&out)?;

        assert_eq!(links.len(), 1);
        assert_eq!(links[0].target, temp.path().join("media/gone.mkv"));
        Ok(())
    }

    #[test]
    fn normalize_lexically_folds_dot_components() {
        assert_eq!(
            normalize_lexically(Path::new("/srv/out/./../media/gone.mkv")),
            PathBuf::from("/srv/media/gone.mkv")
        );
        assert_eq!(normalize_lexically(Path::new("/..")), PathBuf::from("/"));
    }

    #[test]
    fn list_links_on_missing_directory_is_empty() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let links = LinkStore::new().list_links(&temp.path().join("absent"))?;
        assert!(links.is_empty());
        Ok(())
    }

    #[test]
    fn clear_links_only_removes_symlinks() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let out = temp.path().join("out");
        let store = LinkStore::new();
        let first = write_media_file(temp.path(), "media/One.mkv")?;
        let second = write_media_file(temp.path(), "media/Two.mkv")?;
        store.create_link(&first, &out)?;
        store.create_link(&second, &out)?;
        let keep = write_media_file(&out, "notes.txt")?;

        let report = store.clear_links(&out)?;

        assert_eq!(report.removed.len(), 2);
        assert!(report.failures.is_empty());
        assert!(keep.exists());
        assert!(store.list_links(&out)?.is_empty());

        let missing = store.clear_links(&temp.path().join("absent"))?;
        assert!(missing.removed.is_empty());
        Ok(())
    }

    #[test]
    fn ensure_directory_reports_creation_once() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let dir = temp.path().join("previews/leaving-soon");
        let store = LinkStore::new();

        assert!(store.ensure_directory(&dir)?);
        assert!(!store.ensure_directory(&dir)?);
        assert!(dir.is_dir());

        let file = write_media_file(temp.path(), "file.txt")?;
        assert!(matches!(
            store.ensure_directory(&file),
            Err(FsOpsError::NotADirectory { .. })
        ));
        Ok(())
    }

    #[test]
    fn remove_directory_guards_non_empty_directories() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let dir = temp.path().join("previews");
        let content = write_media_file(&dir, "nested/file.mkv")?;
        let store = LinkStore::new();

        let guarded = store.remove_directory(&dir, false);
        assert!(matches!(guarded, Err(FsOpsError::DirectoryNotEmpty { .. })));
        assert!(content.exists());

        assert!(store.remove_directory(&dir, true)?);
        assert!(!dir.exists());
        assert!(!store.remove_directory(&dir, false)?);
        Ok(())
    }

    #[test]
    fn remove_directory_removes_empty_directory_without_force() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir)?;

        assert!(LinkStore::new().remove_directory(&dir, false)?);
        assert!(!dir.exists());
        Ok(())
    }

    #[test]
    fn end_to_end_add_list_remove() -> Result<()> {
        let temp = temp_dir(PREFIX)?;
        let source = write_media_file(temp.path(), "media/movies/M.mkv")?;
        let out = temp.path().join("out");
        let store = LinkStore::new();

        let link = store.create_link(&source, &out)?;
        assert_eq!(link, out.join("M.mkv"));

        let listed = store.list_links(&out)?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "M.mkv");
        assert_eq!(listed[0].target, source);

        assert!(store.remove_link(&link)?);
        assert!(store.list_links(&out)?.is_empty());
        Ok(())
    }
}
