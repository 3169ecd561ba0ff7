//! # Design
//!
//! - Provide structured, constant-message errors for link and directory operations.
//! - Capture the paths involved so failures are reproducible in tests.
//! - Preserve OS errors as sources without interpolating them into messages.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for link store operations.
pub type FsOpsResult<T> = Result<T, FsOpsError>;

/// Errors produced by the link store.
#[derive(Debug, Error)]
pub enum FsOpsError {
    /// The link source does not resolve to an existing regular file.
    #[error("source file not found")]
    SourceNotFound {
        /// Source path supplied by the caller.
        path: PathBuf,
    },
    /// The symlink syscall failed.
    #[error("link creation failed")]
    LinkCreationFailed {
        /// Path the link was going to be created at.
        link: PathBuf,
        /// Path the link was going to point at.
        target: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// Removing a link failed for a reason other than it being absent.
    #[error("link removal failed")]
    RemovalFailed {
        /// Link path supplied by the caller.
        path: PathBuf,
        /// Underlying OS error.
        source: io::Error,
    },
    /// A removal was requested for an entry that is not a symbolic link.
    #[error("path is not a symbolic link")]
    NotASymlink {
        /// Offending path.
        path: PathBuf,
    },
    /// A directory removal without `force` found remaining entries.
    #[error("directory is not empty")]
    DirectoryNotEmpty {
        /// Directory that still has entries.
        path: PathBuf,
    },
    /// A directory operation found some other kind of entry at the path.
    #[error("path is not a directory")]
    NotADirectory {
        /// Offending path.
        path: PathBuf,
    },
    /// Input validation failures.
    #[error("invalid link store input")]
    InvalidInput {
        /// Field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
        /// Offending value when available.
        value: Option<String>,
    },
    /// Other IO failures while interacting with the filesystem.
    #[error("link store io failure")]
    Io {
        /// Operation that triggered the IO failure.
        operation: &'static str,
        /// Path involved in the IO failure.
        path: PathBuf,
        /// Underlying IO error.
        source: io::Error,
    },
}

impl FsOpsError {
    pub(crate) fn io(operation: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Whether the caller can correct the failure by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::SourceNotFound { .. }
                | Self::NotASymlink { .. }
                | Self::DirectoryNotEmpty { .. }
                | Self::NotADirectory { .. }
                | Self::InvalidInput { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn fsops_error_helpers_build_variants() {
        let io_err = FsOpsError::io("list_links.read_dir", "/previews", io::Error::other("io"));
        assert!(matches!(
            io_err,
            FsOpsError::Io {
                operation: "list_links.read_dir",
                ..
            }
        ));
        assert!(io_err.source().is_some());
        assert!(!io_err.is_client_error());

        let creation = FsOpsError::LinkCreationFailed {
            link: PathBuf::from("/previews/movie.mkv"),
            target: PathBuf::from("/media/movie.mkv"),
            source: io::Error::from(io::ErrorKind::PermissionDenied),
        };
        assert_eq!(creation.to_string(), "link creation failed");
        assert!(creation.source().is_some());
    }

    #[test]
    fn client_errors_are_classified() {
        let missing = FsOpsError::SourceNotFound {
            path: PathBuf::from("/media/missing.mkv"),
        };
        assert!(missing.is_client_error());
        assert_eq!(missing.to_string(), "source file not found");

        let not_empty = FsOpsError::DirectoryNotEmpty {
            path: PathBuf::from("/previews"),
        };
        assert!(not_empty.is_client_error());
        assert!(not_empty.source().is_none());
    }
}
