//! Catalog abstraction and the composed ensure sequence.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::CatalogResult;
use crate::model::{CatalogFolder, EnsureOutcome};

/// Pause after folder creation before paths are appended.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(2);

/// Operations the batch coordinator needs from a catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// List the catalog's virtual folders.
    async fn get_folders(&self) -> CatalogResult<Vec<CatalogFolder>>;

    /// Create a virtual folder.
    async fn create_folder(&self, name: &str, collection_type: &str) -> CatalogResult<()>;

    /// Append `path` to the locations of `folder_name`.
    async fn add_path(&self, folder_name: &str, path: &str) -> CatalogResult<()>;

    /// Ask the catalog to rescan its libraries. Success means the request was
    /// accepted, not that the scan finished.
    async fn refresh_library(&self) -> CatalogResult<()>;

    /// Time to wait after creating a folder.
    fn settle_delay(&self) -> Duration {
        DEFAULT_SETTLE_DELAY
    }

    /// Make sure folder `name` exists and lists `path`.
    ///
    /// # Errors
    ///
    /// Propagates the first failing catalog call.
    async fn ensure_folder(
        &self,
        name: &str,
        collection_type: &str,
        path: &str,
    ) -> CatalogResult<EnsureOutcome> {
        let folders = self.get_folders().await?;
        let existing = folders.iter().find(|folder| folder.matches_name(name));

        let (folder_name, created) = match existing {
            Some(folder) if folder.has_location(path) => return Ok(EnsureOutcome::Unchanged),
            Some(folder) => (folder.name.as_str(), false),
            None => {
                self.create_folder(name, collection_type).await?;
                info!(folder = name, collection_type, "created catalog folder");
                let delay = self.settle_delay();
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                (name, true)
            }
        };

        // The path endpoint matches folder names exactly.
        self.add_path(folder_name, path).await?;
        info!(folder = folder_name, path, "added catalog folder location");
        Ok(if created {
            EnsureOutcome::FolderCreated
        } else {
            EnsureOutcome::PathAdded
        })
    }
}
