//! Batch execution against the link store and the catalog.
//!
//! # Design
//! - Items run sequentially on the blocking pool; one failing item never aborts the batch.
//! - Only add-batches that created at least one link touch the catalog.
//! - Catalog locations are the absolute directories the links landed in.
//! - Catalog failures are reported next to item failures; links stay on disk.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use glimpse_catalog::Catalog;
use glimpse_fsops::{FsOpsError, LinkRecord, LinkStore};
use tracing::{debug, info, warn};

use crate::error::{BatchError, BatchResult, render_error};
use crate::model::{BatchOutcome, CatalogHealth, ClearOutcome, LinkRequest};

const STAGE_FOLDER: &str = "virtual folder";
const STAGE_REFRESH: &str = "library refresh";

/// Catalog folder the preview directories are registered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogTarget {
    /// Virtual folder name.
    pub folder_name: String,
    /// Collection type used when creating the folder.
    pub collection_type: String,
}

/// Executes link batches and keeps the catalog in step.
#[derive(Clone)]
pub struct BatchCoordinator {
    store: LinkStore,
    catalog: Option<(Arc<dyn Catalog>, CatalogTarget)>,
}

impl std::fmt::Debug for BatchCoordinator {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("BatchCoordinator")
            .field("store", &self.store)
            .field("catalog", &self.catalog.as_ref().map(|(_, target)| target))
            .finish()
    }
}

impl BatchCoordinator {
    /// Coordinator without catalog synchronisation.
    #[must_use]
    pub const fn new(store: LinkStore) -> Self {
        Self {
            store,
            catalog: None,
        }
    }

    /// Enable catalog synchronisation against `target`.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Arc<dyn Catalog>, target: CatalogTarget) -> Self {
        self.catalog = Some((catalog, target));
        self
    }

    /// Whether a catalog is configured.
    #[must_use]
    pub const fn has_catalog(&self) -> bool {
        self.catalog.is_some()
    }

    /// Create every requested link, then register and refresh the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidRequest`] for an empty batch. Item and
    /// catalog failures are reported in the outcome instead.
    pub async fn add(&self, items: Vec<LinkRequest>) -> BatchResult<BatchOutcome> {
        if items.is_empty() {
            return Err(BatchError::InvalidRequest {
                field: "items",
                reason: "empty",
            });
        }

        let store = self.store;
        let count = items.len();
        let (created, mut errors, directories) = run_blocking("add_links", move || {
            let mut created = Vec::new();
            let mut errors = Vec::new();
            let mut directories: Vec<PathBuf> = Vec::new();
            for item in items {
                match store.create_link(&item.source_path, &item.target_directory) {
                    Ok(link) => {
                        if let Some(directory) = link.parent()
                            && !directories.iter().any(|known| known == directory)
                        {
                            directories.push(directory.to_path_buf());
                        }
                        if created.contains(&link) {
                            warn!(
                                link = %link.display(),
                                source = %item.source_path.display(),
                                "link replaced by a later item in the same batch"
                            );
                        } else {
                            created.push(link);
                        }
                    }
                    Err(err) => errors.push(item_failure(&item.source_path, &err)),
                }
            }
            (created, errors, directories)
        })
        .await?;

        info!(
            requested = count,
            created = created.len(),
            failed = errors.len(),
            "add batch executed"
        );

        if !created.is_empty() {
            self.sync_catalog(&directories, &mut errors).await;
        }
        Ok(BatchOutcome::executed(created, errors))
    }

    /// Remove every requested link. Paths that held nothing are omitted from
    /// the removed list without being reported as errors.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::InvalidRequest`] for an empty batch.
    pub async fn remove(&self, paths: Vec<PathBuf>) -> BatchResult<BatchOutcome> {
        if paths.is_empty() {
            return Err(BatchError::InvalidRequest {
                field: "symlink_paths",
                reason: "empty",
            });
        }

        let store = self.store;
        let count = paths.len();
        let (removed, errors) = run_blocking("remove_links", move || {
            let mut removed = Vec::new();
            let mut errors = Vec::new();
            for path in paths {
                match store.remove_link(&path) {
                    Ok(true) => removed.push(path),
                    Ok(false) => {}
                    Err(err) => errors.push(item_failure(&path, &err)),
                }
            }
            (removed, errors)
        })
        .await?;

        info!(
            requested = count,
            removed = removed.len(),
            failed = errors.len(),
            "remove batch executed"
        );
        Ok(BatchOutcome::executed(removed, errors))
    }

    /// Enumerate the links inside `directory`.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Store`] when the directory cannot be read.
    pub async fn list(&self, directory: PathBuf) -> BatchResult<Vec<LinkRecord>> {
        require_directory(&directory)?;
        let store = self.store;
        run_blocking("list_links", move || store.list_links(&directory))
            .await?
            .map_err(|source| BatchError::Store {
                operation: "list_links",
                source,
            })
    }

    /// Remove every link inside `directory`, leaving other entries alone.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Store`] when the directory cannot be read.
    pub async fn clear(&self, directory: PathBuf) -> BatchResult<ClearOutcome> {
        require_directory(&directory)?;
        let store = self.store;
        let swept = directory.clone();
        let report = run_blocking("clear_links", move || store.clear_links(&swept))
            .await?
            .map_err(|source| BatchError::Store {
                operation: "clear_links",
                source,
            })?;

        let errors = report
            .failures
            .iter()
            .map(|(path, err)| format!("{}: {}", path.display(), render_error(err)))
            .collect();
        info!(
            directory = %directory.display(),
            removed = report.removed.len(),
            "cleared preview links"
        );
        Ok(ClearOutcome {
            directory,
            removed: report.removed,
            errors,
        })
    }

    /// Create `directory` unless it exists; returns whether it was created.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Store`] when the directory cannot be created.
    pub async fn create_directory(&self, directory: PathBuf) -> BatchResult<bool> {
        require_directory(&directory)?;
        let store = self.store;
        run_blocking("ensure_directory", move || store.ensure_directory(&directory))
            .await?
            .map_err(|source| BatchError::Store {
                operation: "ensure_directory",
                source,
            })
    }

    /// Remove `directory`; returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// Returns [`BatchError::Store`] wrapping [`FsOpsError::DirectoryNotEmpty`]
    /// when entries remain and `force` is false.
    pub async fn remove_directory(&self, directory: PathBuf, force: bool) -> BatchResult<bool> {
        require_directory(&directory)?;
        let store = self.store;
        run_blocking("remove_directory", move || {
            store.remove_directory(&directory, force)
        })
        .await?
        .map_err(|source| BatchError::Store {
            operation: "remove_directory",
            source,
        })
    }

    /// Check catalog reachability with a folder listing.
    pub async fn catalog_health(&self) -> CatalogHealth {
        let Some((catalog, _)) = &self.catalog else {
            return CatalogHealth::Disabled;
        };
        match catalog.get_folders().await {
            Ok(_) => CatalogHealth::Ok,
            Err(err) => {
                warn!(
                    operation = err.operation().unwrap_or("get_folders"),
                    error = %render_error(&err),
                    "catalog health check failed"
                );
                CatalogHealth::Unavailable
            }
        }
    }

    async fn sync_catalog(&self, directories: &[PathBuf], errors: &mut Vec<String>) {
        let Some((catalog, target)) = &self.catalog else {
            debug!("catalog sync disabled");
            return;
        };

        let mut ensured = true;
        for directory in directories {
            let location = directory.to_string_lossy();
            match catalog
                .ensure_folder(&target.folder_name, &target.collection_type, &location)
                .await
            {
                Ok(outcome) => {
                    debug!(folder = %target.folder_name, location = %location, ?outcome, "catalog folder ensured");
                }
                Err(err) => {
                    let rendered = render_error(&err);
                    warn!(
                        folder = %target.folder_name,
                        location = %location,
                        operation = err.operation().unwrap_or("ensure_folder"),
                        error = %rendered,
                        "catalog folder sync failed"
                    );
                    errors.push(format!("{STAGE_FOLDER}: {rendered}"));
                    ensured = false;
                }
            }
        }
        if !ensured {
            return;
        }

        if let Err(err) = catalog.refresh_library().await {
            let rendered = render_error(&err);
            warn!(
                operation = err.operation().unwrap_or("refresh_library"),
                error = %rendered,
                "catalog refresh failed"
            );
            errors.push(format!("{STAGE_REFRESH}: {rendered}"));
        }
    }
}

fn item_failure(path: &Path, err: &FsOpsError) -> String {
    let rendered = render_error(err);
    warn!(path = %path.display(), error = %rendered, "batch item failed");
    format!("{}: {rendered}", path.display())
}

fn require_directory(directory: &Path) -> BatchResult<()> {
    if directory.as_os_str().is_empty() {
        return Err(BatchError::InvalidRequest {
            field: "directory",
            reason: "empty",
        });
    }
    Ok(())
}

async fn run_blocking<T, F>(operation: &'static str, work: F) -> BatchResult<T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|source| BatchError::Worker { operation, source })
}
