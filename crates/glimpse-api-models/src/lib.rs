#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

//! Request and response payloads for the Glimpse HTTP API.
//!
//! Every payload uses camelCase field names on the wire.

use std::path::{Path, PathBuf};

use glimpse_batch::{BatchOutcome, CatalogHealth, ClearOutcome, LinkRequest};
use glimpse_fsops::LinkRecord;
use serde::{Deserialize, Serialize};

/// RFC 9457 problem document returned for whole-call failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    /// URI reference identifying the problem type.
    pub kind: String,
    /// Short, human-readable summary of the issue.
    pub title: String,
    /// HTTP status code associated with the error.
    pub status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    /// Detailed diagnostic message when available.
    pub detail: Option<String>,
}

/// One desired link in an add request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SymlinkItem {
    /// Media file the link should point at.
    pub source_path: String,
    /// Directory the link is created in.
    pub target_directory: String,
}

impl From<SymlinkItem> for LinkRequest {
    fn from(item: SymlinkItem) -> Self {
        Self::new(item.source_path, item.target_directory)
    }
}

/// Body of `POST /v1/symlinks/add`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddSymlinksRequest {
    /// Links to create.
    #[serde(default)]
    pub items: Vec<SymlinkItem>,
}

/// Response of `POST /v1/symlinks/add`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddSymlinksResponse {
    /// True once the batch executed.
    pub success: bool,
    /// Link paths created by the batch.
    pub created_symlinks: Vec<String>,
    /// Per-item and catalog failures.
    pub errors: Vec<String>,
}

impl From<BatchOutcome> for AddSymlinksResponse {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            success: outcome.success,
            created_symlinks: display_paths(&outcome.succeeded_paths),
            errors: outcome.errors,
        }
    }
}

/// Body of `POST /v1/symlinks/remove`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSymlinksRequest {
    /// Link paths to remove.
    #[serde(default)]
    pub symlink_paths: Vec<String>,
}

impl RemoveSymlinksRequest {
    /// Requested paths as filesystem paths.
    #[must_use]
    pub fn paths(self) -> Vec<PathBuf> {
        self.symlink_paths.into_iter().map(PathBuf::from).collect()
    }
}

/// Response of `POST /v1/symlinks/remove`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSymlinksResponse {
    /// True once the batch executed.
    pub success: bool,
    /// Links actually removed; paths that held nothing are omitted.
    pub removed_symlinks: Vec<String>,
    /// Per-item failures.
    pub errors: Vec<String>,
}

impl From<BatchOutcome> for RemoveSymlinksResponse {
    fn from(outcome: BatchOutcome) -> Self {
        Self {
            success: outcome.success,
            removed_symlinks: display_paths(&outcome.succeeded_paths),
            errors: outcome.errors,
        }
    }
}

/// Query string of `GET /v1/symlinks/list`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSymlinksQuery {
    /// Directory to enumerate.
    pub directory: Option<String>,
}

/// One enumerated link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SymlinkView {
    /// Path of the link itself.
    pub path: String,
    /// Absolute path the link resolves to.
    pub target: String,
    /// Base filename of the link.
    pub name: String,
}

impl From<LinkRecord> for SymlinkView {
    fn from(record: LinkRecord) -> Self {
        Self {
            path: record.path.display().to_string(),
            target: record.target.display().to_string(),
            name: record.name,
        }
    }
}

/// Response of `GET /v1/symlinks/list`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListSymlinksResponse {
    /// Links found in the directory.
    pub symlinks: Vec<SymlinkView>,
    /// Number of links found.
    pub count: usize,
    /// Human-readable summary.
    pub message: String,
}

impl ListSymlinksResponse {
    /// Build the response for `directory` from enumerated records.
    #[must_use]
    pub fn from_records(directory: &Path, records: Vec<LinkRecord>) -> Self {
        let symlinks: Vec<SymlinkView> = records.into_iter().map(SymlinkView::from).collect();
        let count = symlinks.len();
        Self {
            message: format!("found {count} symlink(s) in {}", directory.display()),
            symlinks,
            count,
        }
    }
}

/// Body of `POST /v1/symlinks/clear`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClearSymlinksRequest {
    /// Directory whose links are removed.
    #[serde(default)]
    pub directory: String,
}

/// Response of `POST /v1/symlinks/clear`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClearSymlinksResponse {
    /// True once the sweep executed.
    pub success: bool,
    /// Directory that was swept.
    pub directory: String,
    /// Links removed.
    pub removed_symlinks: Vec<String>,
    /// Per-link failures.
    pub errors: Vec<String>,
}

impl From<ClearOutcome> for ClearSymlinksResponse {
    fn from(outcome: ClearOutcome) -> Self {
        Self {
            success: true,
            directory: outcome.directory.display().to_string(),
            removed_symlinks: display_paths(&outcome.removed),
            errors: outcome.errors,
        }
    }
}

/// Body of `POST /v1/directories/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDirectoryRequest {
    /// Directory to create.
    #[serde(default)]
    pub directory: String,
}

/// Response of `POST /v1/directories/create`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateDirectoryResponse {
    /// True when the directory exists afterwards.
    pub success: bool,
    /// Directory as requested.
    pub directory: String,
    /// Whether the call created it.
    pub created: bool,
    /// Human-readable summary.
    pub message: String,
}

/// Body of `DELETE /v1/directories/remove`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveDirectoryRequest {
    /// Directory to remove.
    #[serde(default)]
    pub directory: String,
    /// Remove contents recursively.
    #[serde(default)]
    pub force: bool,
}

/// Response of `DELETE /v1/directories/remove`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoveDirectoryResponse {
    /// True when the directory is gone afterwards.
    pub success: bool,
    /// Directory as requested.
    pub directory: String,
    /// Human-readable summary.
    pub message: String,
}

/// Response of `GET /v1/status`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusResponse {
    /// Service version.
    pub version: String,
}

/// Response of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    /// `ok` or `degraded`.
    pub status: String,
    /// `ok`, `unavailable`, or `disabled`.
    pub catalog: String,
}

impl From<CatalogHealth> for HealthResponse {
    fn from(catalog: CatalogHealth) -> Self {
        let status = match catalog {
            CatalogHealth::Unavailable => "degraded",
            CatalogHealth::Ok | CatalogHealth::Disabled => "ok",
        };
        Self {
            status: status.to_string(),
            catalog: catalog.as_str().to_string(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> Vec<String> {
    paths.iter().map(|path| path.display().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use serde_json::json;

    #[test]
    fn add_request_uses_camel_case_and_defaults_items() -> Result<()> {
        let request: AddSymlinksRequest = serde_json::from_value(json!({
            "items": [{ "sourcePath": "/media/M.mkv", "targetDirectory": "/out" }]
        }))?;
        let link: LinkRequest = request.items[0].clone().into();
        assert_eq!(link.source_path, PathBuf::from("/media/M.mkv"));
        assert_eq!(link.target_directory, PathBuf::from("/out"));

        let empty: AddSymlinksRequest = serde_json::from_value(json!({}))?;
        assert!(empty.items.is_empty());
        Ok(())
    }

    #[test]
    fn add_response_serialises_created_links() -> Result<()> {
        let response = AddSymlinksResponse::from(BatchOutcome {
            success: true,
            succeeded_paths: vec![PathBuf::from("/out/M.mkv")],
            errors: Vec::new(),
        });
        assert_eq!(
            serde_json::to_value(&response)?,
            json!({ "success": true, "createdSymlinks": ["/out/M.mkv"], "errors": [] })
        );
        Ok(())
    }

    #[test]
    fn remove_request_reads_symlink_paths() -> Result<()> {
        let request: RemoveSymlinksRequest =
            serde_json::from_value(json!({ "symlinkPaths": ["/out/M.mkv"] }))?;
        assert_eq!(request.paths(), vec![PathBuf::from("/out/M.mkv")]);
        Ok(())
    }

    #[test]
    fn list_response_counts_records() {
        let response = ListSymlinksResponse::from_records(
            Path::new("/out"),
            vec![LinkRecord {
                path: PathBuf::from("/out/M.mkv"),
                target: PathBuf::from("/media/M.mkv"),
                name: "M.mkv".to_string(),
            }],
        );
        assert_eq!(response.count, 1);
        assert_eq!(response.symlinks[0].target, "/media/M.mkv");
        assert_eq!(response.message, "found 1 symlink(s) in /out");
    }

    #[test]
    fn health_reports_degraded_only_when_catalog_down() {
        assert_eq!(HealthResponse::from(CatalogHealth::Ok).status, "ok");
        assert_eq!(HealthResponse::from(CatalogHealth::Disabled).catalog, "disabled");
        let down = HealthResponse::from(CatalogHealth::Unavailable);
        assert_eq!(down.status, "degraded");
        assert_eq!(down.catalog, "unavailable");
    }

    #[test]
    fn problem_details_renames_kind() -> Result<()> {
        let problem = ProblemDetails {
            kind: "https://glimpse.dev/problems/bad-request".to_string(),
            title: "bad request".to_string(),
            status: 400,
            detail: None,
        };
        let value = serde_json::to_value(&problem)?;
        assert_eq!(value["type"], "https://glimpse.dev/problems/bad-request");
        assert!(value.get("detail").is_none());
        Ok(())
    }
}
