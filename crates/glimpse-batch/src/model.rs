//! Requests and outcomes exchanged with the coordinator.

use std::path::PathBuf;

/// One desired link: `source_path` linked into `target_directory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRequest {
    /// Media file the link points at.
    pub source_path: PathBuf,
    /// Directory the link is created in.
    pub target_directory: PathBuf,
}

impl LinkRequest {
    /// Convenience constructor.
    pub fn new(source_path: impl Into<PathBuf>, target_directory: impl Into<PathBuf>) -> Self {
        Self {
            source_path: source_path.into(),
            target_directory: target_directory.into(),
        }
    }
}

/// Aggregate result of an executed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Always true once the batch executed, even with item failures.
    pub success: bool,
    /// Link paths created (add) or actually removed (remove).
    pub succeeded_paths: Vec<PathBuf>,
    /// Rendered per-item and catalog stage failures.
    pub errors: Vec<String>,
}

impl BatchOutcome {
    pub(crate) const fn executed(succeeded_paths: Vec<PathBuf>, errors: Vec<String>) -> Self {
        Self {
            success: true,
            succeeded_paths,
            errors,
        }
    }
}

/// Result of clearing every link in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClearOutcome {
    /// Directory that was swept.
    pub directory: PathBuf,
    /// Links removed.
    pub removed: Vec<PathBuf>,
    /// Rendered per-link failures.
    pub errors: Vec<String>,
}

/// Reachability of the configured catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogHealth {
    /// The catalog answered a folder listing.
    Ok,
    /// The catalog could not be reached or refused the listing.
    Unavailable,
    /// No catalog is configured.
    Disabled,
}

impl CatalogHealth {
    /// Stable lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Unavailable => "unavailable",
            Self::Disabled => "disabled",
        }
    }
}
