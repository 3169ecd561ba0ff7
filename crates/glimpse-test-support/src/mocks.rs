//! In-memory catalog double that records every call.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use glimpse_catalog::{Catalog, CatalogError, CatalogFolder, CatalogResult};

const MOCK_URL: &str = "memory://catalog";

/// Calls observed by a [`RecordingCatalog`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogCalls {
    /// Number of `get_folders` calls.
    pub get_folders: usize,
    /// Arguments of each `create_folder` call.
    pub create_folder: Vec<(String, String)>,
    /// Arguments of each `add_path` call.
    pub add_path: Vec<(String, String)>,
    /// Number of `refresh_library` calls.
    pub refresh_library: usize,
}

#[derive(Debug, Default)]
struct State {
    folders: Vec<CatalogFolder>,
    calls: CatalogCalls,
    unreachable: bool,
    reject_mutations: bool,
    reject_refresh: bool,
}

/// Catalog double backed by an in-memory folder list.
///
/// Folder creation and path additions mutate the list so `ensure_folder`
/// behaves like it would against a real server. The settle delay is zero.
#[derive(Debug, Default)]
pub struct RecordingCatalog {
    state: Mutex<State>,
}

impl RecordingCatalog {
    /// Empty catalog that accepts every call.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog pre-populated with `folders`.
    #[must_use]
    pub fn with_folders(folders: Vec<CatalogFolder>) -> Self {
        let catalog = Self::default();
        catalog.lock().folders = folders;
        catalog
    }

    /// Make every call fail as if the server could not be reached.
    #[must_use]
    pub fn unreachable(self) -> Self {
        self.lock().unreachable = true;
        self
    }

    /// Make folder creation and path additions fail with status 500.
    #[must_use]
    pub fn rejecting_mutations(self) -> Self {
        self.lock().reject_mutations = true;
        self
    }

    /// Make library refresh fail with status 500.
    #[must_use]
    pub fn rejecting_refresh(self) -> Self {
        self.lock().reject_refresh = true;
        self
    }

    /// Snapshot of the calls seen so far.
    #[must_use]
    pub fn calls(&self) -> CatalogCalls {
        self.lock().calls.clone()
    }

    /// Snapshot of the current folder list.
    #[must_use]
    pub fn folders(&self) -> Vec<CatalogFolder> {
        self.lock().folders.clone()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

fn unavailable(operation: &'static str) -> CatalogError {
    CatalogError::UnavailableStatus {
        operation,
        url: MOCK_URL.to_string(),
        status: 503,
        body: String::new(),
    }
}

fn rejected(operation: &'static str) -> CatalogError {
    CatalogError::OperationFailed {
        operation,
        url: MOCK_URL.to_string(),
        status: 500,
        body: "rejected by test catalog".to_string(),
    }
}

#[async_trait]
impl Catalog for RecordingCatalog {
    async fn get_folders(&self) -> CatalogResult<Vec<CatalogFolder>> {
        let mut state = self.lock();
        state.calls.get_folders += 1;
        if state.unreachable {
            return Err(unavailable("get_folders"));
        }
        Ok(state.folders.clone())
    }

    async fn create_folder(&self, name: &str, collection_type: &str) -> CatalogResult<()> {
        let mut state = self.lock();
        state
            .calls
            .create_folder
            .push((name.to_string(), collection_type.to_string()));
        if state.unreachable {
            return Err(unavailable("create_folder"));
        }
        if state.reject_mutations {
            return Err(rejected("create_folder"));
        }
        state.folders.push(CatalogFolder {
            name: name.to_string(),
            locations: Vec::new(),
            collection_type: Some(collection_type.to_string()),
        });
        Ok(())
    }

    async fn add_path(&self, folder_name: &str, path: &str) -> CatalogResult<()> {
        let mut state = self.lock();
        state
            .calls
            .add_path
            .push((folder_name.to_string(), path.to_string()));
        if state.unreachable {
            return Err(unavailable("add_path"));
        }
        if state.reject_mutations {
            return Err(rejected("add_path"));
        }
        match state
            .folders
            .iter_mut()
            .find(|folder| folder.matches_name(folder_name))
        {
            Some(folder) => {
                if !folder.has_location(path) {
                    folder.locations.push(path.to_string());
                }
                Ok(())
            }
            None => Err(CatalogError::OperationFailed {
                operation: "add_path",
                url: MOCK_URL.to_string(),
                status: 404,
                body: "folder not found".to_string(),
            }),
        }
    }

    async fn refresh_library(&self) -> CatalogResult<()> {
        let mut state = self.lock();
        state.calls.refresh_library += 1;
        if state.unreachable {
            return Err(unavailable("refresh_library"));
        }
        if state.reject_refresh {
            return Err(rejected("refresh_library"));
        }
        Ok(())
    }

    fn settle_delay(&self) -> Duration {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[tokio::test]
    async fn ensure_folder_against_recording_catalog_is_idempotent() -> Result<()> {
        let catalog = RecordingCatalog::new();

        catalog.ensure_folder("Leaving Soon", "mixed", "/out").await?;
        catalog.ensure_folder("Leaving Soon", "mixed", "/out").await?;

        let folders = catalog.folders();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].locations, vec!["/out".to_string()]);
        let calls = catalog.calls();
        assert_eq!(calls.get_folders, 2);
        assert_eq!(calls.create_folder.len(), 1);
        assert_eq!(calls.add_path.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unreachable_catalog_fails_every_call() {
        let catalog = RecordingCatalog::new().unreachable();
        let err = catalog.get_folders().await.expect_err("unreachable");
        assert!(err.is_unavailable());
        assert!(catalog.refresh_library().await.is_err());
        assert_eq!(catalog.calls().refresh_library, 1);
    }
}
