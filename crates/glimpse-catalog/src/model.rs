//! Wire types exchanged with the catalog.

use serde::{Deserialize, Serialize};

/// Virtual folder as reported by `GET Library/VirtualFolders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFolder {
    /// Display name of the folder.
    #[serde(rename = "Name")]
    pub name: String,
    /// Filesystem paths the catalog scans for this folder.
    #[serde(rename = "Locations", default)]
    pub locations: Vec<String>,
    /// Collection type, absent for legacy folders.
    #[serde(rename = "CollectionType", default)]
    pub collection_type: Option<String>,
}

impl CatalogFolder {
    /// Whether the folder's name matches `name`, ignoring case.
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.to_lowercase()
    }

    /// Whether `path` is already one of the folder's locations.
    #[must_use]
    pub fn has_location(&self, path: &str) -> bool {
        self.locations.iter().any(|location| location == path)
    }
}

/// Library options sent when creating a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct LibraryOptions {
    /// Whether photos are indexed.
    pub enable_photos: bool,
    /// Whether the catalog watches the locations for changes.
    pub enable_realtime_monitor: bool,
    /// Whether chapter images are extracted.
    pub enable_chapter_image_extraction: bool,
    /// Whether remote metadata providers are consulted.
    pub enable_internet_providers: bool,
    /// Whether metadata is written next to the media files.
    pub save_local_metadata: bool,
}

impl Default for LibraryOptions {
    fn default() -> Self {
        Self {
            enable_photos: false,
            enable_realtime_monitor: true,
            enable_chapter_image_extraction: false,
            enable_internet_providers: true,
            save_local_metadata: false,
        }
    }
}

/// Request body for folder creation.
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateFolderBody {
    pub(crate) library_options: LibraryOptions,
}

/// What an ensure call had to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnsureOutcome {
    /// Folder and path were already present.
    Unchanged,
    /// The folder existed; the path was appended.
    PathAdded,
    /// The folder was created and the path appended.
    FolderCreated,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn folder_decodes_with_missing_optional_fields() -> anyhow::Result<()> {
        let folder: CatalogFolder = serde_json::from_value(json!({ "Name": "Leaving Soon" }))?;
        assert!(folder.locations.is_empty());
        assert!(folder.collection_type.is_none());
        assert!(folder.matches_name("leaving soon"));
        Ok(())
    }

    #[test]
    fn create_body_uses_catalog_casing() -> anyhow::Result<()> {
        let body = serde_json::to_value(CreateFolderBody {
            library_options: LibraryOptions::default(),
        })?;
        assert_eq!(
            body,
            json!({
                "LibraryOptions": {
                    "EnablePhotos": false,
                    "EnableRealtimeMonitor": true,
                    "EnableChapterImageExtraction": false,
                    "EnableInternetProviders": true,
                    "SaveLocalMetadata": false
                }
            })
        );
        Ok(())
    }
}
