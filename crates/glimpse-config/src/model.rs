//! Typed settings assembled by the loader.

use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use url::Url;

/// Complete start-up configuration for the service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listener IP address.
    pub bind_addr: IpAddr,
    /// Listener port; never zero.
    pub http_port: u16,
    /// Catalog synchronisation settings; `None` disables catalog calls.
    pub catalog: Option<CatalogConfig>,
    /// Logging preferences.
    pub logging: LoggingSettings,
}

impl AppConfig {
    /// Socket address the HTTP listener binds to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

/// Connection and folder settings for the remote catalog.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the catalog server, always ending in `/`.
    pub base_url: Url,
    /// Access token sent with every request.
    pub api_key: String,
    /// Virtual folder that should contain the preview directories.
    pub folder_name: String,
    /// Collection type used when the folder has to be created.
    pub collection_type: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("folder_name", &self.folder_name)
            .field("collection_type", &self.collection_type)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Logging preferences; `RUST_LOG` still overrides the level at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingSettings {
    /// Default filter directive.
    pub level: String,
    /// Explicit output format (`json` or `pretty`); inferred when `None`.
    pub format: Option<String>,
}
