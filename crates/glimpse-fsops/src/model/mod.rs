//! Records produced by the link store.
//!
//! # Design
//! - Records mirror the filesystem; nothing here is persisted separately.
//! - Paths stay as `PathBuf` until the HTTP layer renders them.

use std::path::PathBuf;

use crate::error::FsOpsError;

/// A symbolic link observed during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Location of the link itself.
    pub path: PathBuf,
    /// Absolute path the link points at.
    pub target: PathBuf,
    /// Base filename of the link.
    pub name: String,
}

/// Outcome of clearing every link in a directory.
#[derive(Debug, Default)]
pub struct ClearReport {
    /// Links that were removed.
    pub removed: Vec<PathBuf>,
    /// Links that could not be removed, with the reason.
    pub failures: Vec<(PathBuf, FsOpsError)>,
}
