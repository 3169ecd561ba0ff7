//! # Design
//!
//! - Centralize start-up and serve errors for the binary.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Preserve source errors without re-logging at call sites.

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: glimpse_config::ConfigError,
    },
    /// Telemetry could not be installed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: glimpse_telemetry::TelemetryError,
    },
    /// The catalog client could not be constructed.
    #[error("catalog operation failed")]
    Catalog {
        /// Operation identifier.
        operation: &'static str,
        /// Source catalog error.
        source: glimpse_catalog::CatalogError,
    },
    /// The API server failed.
    #[error("api server operation failed")]
    ApiServer {
        /// Operation identifier.
        operation: &'static str,
        /// Source API server error.
        source: glimpse_api::ApiServerError,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: glimpse_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: glimpse_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }

    pub(crate) const fn catalog(
        operation: &'static str,
        source: glimpse_catalog::CatalogError,
    ) -> Self {
        Self::Catalog { operation, source }
    }

    pub(crate) const fn api_server(
        operation: &'static str,
        source: glimpse_api::ApiServerError,
    ) -> Self {
        Self::ApiServer { operation, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;
    use std::io;

    #[test]
    fn app_error_helpers_build_variants() {
        let config = AppError::config(
            "load",
            glimpse_config::ConfigError::Missing {
                name: "GLIMPSE_CATALOG_API_KEY",
            },
        );
        assert!(matches!(config, AppError::Config { operation: "load", .. }));
        assert_eq!(config.to_string(), "configuration operation failed");
        assert!(config.source().is_some());

        let api = AppError::api_server(
            "serve",
            glimpse_api::ApiServerError::Serve {
                source: io::Error::other("boom"),
            },
        );
        assert!(matches!(api, AppError::ApiServer { .. }));
    }
}
