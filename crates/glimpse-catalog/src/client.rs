//! reqwest-backed catalog client.

use std::time::Duration;

use async_trait::async_trait;
use glimpse_config::CatalogConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, warn};
use url::Url;

use crate::error::{CatalogError, CatalogResult};
use crate::model::{CatalogFolder, CreateFolderBody, LibraryOptions};
use crate::service::{Catalog, DEFAULT_SETTLE_DELAY};

pub(crate) const HEADER_TOKEN: &str = "X-Emby-Token";

const PATH_FOLDERS: &str = "Library/VirtualFolders";
const PATH_FOLDER_PATHS: &str = "Library/VirtualFolders/Paths";
const PATH_REFRESH: &str = "Library/Refresh";

/// HTTP client for a Jellyfin-compatible catalog.
#[derive(Clone)]
pub struct CatalogClient {
    http: Client,
    base_url: Url,
    api_key: String,
    settle_delay: Duration,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("CatalogClient")
            .field("base_url", &self.base_url.as_str())
            .field("settle_delay", &self.settle_delay)
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Build a client against `base_url` with a fixed request timeout.
    ///
    /// A trailing slash is appended to `base_url` so endpoint paths join below it.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is invalid or the client cannot be built.
    pub fn new(base_url: &str, api_key: impl Into<String>, timeout: Duration) -> CatalogResult<Self> {
        let normalised = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };
        let base_url = Url::parse(&normalised).map_err(|source| CatalogError::InvalidUrl {
            value: normalised.clone(),
            source,
        })?;
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| CatalogError::ClientBuild { source })?;
        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
            settle_delay: DEFAULT_SETTLE_DELAY,
        })
    }

    /// Build a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built.
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        Self::new(config.base_url.as_str(), config.api_key.clone(), config.timeout)
    }

    /// Override the pause taken after folder creation.
    #[must_use]
    pub const fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> CatalogResult<Url> {
        self.base_url
            .join(path)
            .map_err(|source| CatalogError::InvalidUrl {
                value: path.to_string(),
                source,
            })
    }

    async fn send(
        &self,
        operation: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> CatalogResult<Response> {
        debug!(operation, url = %url, "catalog request");
        request
            .header(HEADER_TOKEN, &self.api_key)
            .send()
            .await
            .map_err(|source| {
                warn!(operation, url = %url, error = %source, "catalog request failed");
                CatalogError::Unavailable {
                    operation,
                    url: url.to_string(),
                    source,
                }
            })
    }

    async fn expect_accepted(
        &self,
        operation: &'static str,
        url: &Url,
        request: RequestBuilder,
    ) -> CatalogResult<()> {
        let response = self.send(operation, url, request).await?;
        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::NO_CONTENT {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        warn!(operation, url = %url, status = status.as_u16(), "catalog rejected request");
        Err(CatalogError::OperationFailed {
            operation,
            url: url.to_string(),
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl Catalog for CatalogClient {
    async fn get_folders(&self) -> CatalogResult<Vec<CatalogFolder>> {
        const OPERATION: &str = "get_folders";
        let url = self.endpoint(PATH_FOLDERS)?;
        let response = self.send(OPERATION, &url, self.http.get(url.clone())).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::UnavailableStatus {
                operation: OPERATION,
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        response
            .json::<Vec<CatalogFolder>>()
            .await
            .map_err(|source| CatalogError::Decode {
                operation: OPERATION,
                url: url.to_string(),
                source,
            })
    }

    async fn create_folder(&self, name: &str, collection_type: &str) -> CatalogResult<()> {
        let url = self.endpoint(PATH_FOLDERS)?;
        let body = CreateFolderBody {
            library_options: LibraryOptions::default(),
        };
        let request = self
            .http
            .post(url.clone())
            .query(&[
                ("name", name),
                ("collectionType", collection_type),
                ("refreshLibrary", "true"),
            ])
            .json(&body);
        self.expect_accepted("create_folder", &url, request).await
    }

    async fn add_path(&self, folder_name: &str, path: &str) -> CatalogResult<()> {
        let url = self.endpoint(PATH_FOLDER_PATHS)?;
        let request = self.http.post(url.clone()).query(&[
            ("name", folder_name),
            ("path", path),
            ("refreshLibrary", "true"),
        ]);
        self.expect_accepted("add_path", &url, request).await
    }

    async fn refresh_library(&self) -> CatalogResult<()> {
        let url = self.endpoint(PATH_REFRESH)?;
        let request = self.http.post(url.clone());
        self.expect_accepted("refresh_library", &url, request).await
    }

    fn settle_delay(&self) -> Duration {
        self.settle_delay
    }
}
