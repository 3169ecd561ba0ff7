//! # Design
//!
//! - Distinguish an unreachable catalog from a catalog that rejected a mutation.
//! - Carry the operation and URL so failures can be traced to a single request.
//! - Keep response bodies out of the message; they live in structured fields.

use thiserror::Error;

/// Result alias for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors produced while talking to the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The HTTP client could not be constructed.
    #[error("catalog client construction failed")]
    ClientBuild {
        /// Underlying client builder error.
        source: reqwest::Error,
    },
    /// An endpoint URL could not be derived from the base URL.
    #[error("catalog url invalid")]
    InvalidUrl {
        /// Path or URL that failed to parse.
        value: String,
        /// Underlying parse error.
        source: url::ParseError,
    },
    /// The request never produced a response.
    #[error("catalog unavailable")]
    Unavailable {
        /// Operation identifier.
        operation: &'static str,
        /// Request URL (without query).
        url: String,
        /// Underlying transport error.
        source: reqwest::Error,
    },
    /// A read request returned a non-success status.
    #[error("catalog unavailable (status {status})")]
    UnavailableStatus {
        /// Operation identifier.
        operation: &'static str,
        /// Request URL (without query).
        url: String,
        /// HTTP status code returned.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// A mutation returned a non-success status.
    #[error("catalog operation failed (status {status})")]
    OperationFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Request URL (without query).
        url: String,
        /// HTTP status code returned.
        status: u16,
        /// Response body, possibly empty.
        body: String,
    },
    /// A success response could not be decoded.
    #[error("catalog response decode failed")]
    Decode {
        /// Operation identifier.
        operation: &'static str,
        /// Request URL (without query).
        url: String,
        /// Underlying decode error.
        source: reqwest::Error,
    },
}

impl CatalogError {
    /// Whether the failure means the catalog could not be reached or read.
    #[must_use]
    pub const fn is_unavailable(&self) -> bool {
        matches!(
            self,
            Self::Unavailable { .. } | Self::UnavailableStatus { .. }
        )
    }

    /// Operation identifier when the failure is tied to a request.
    #[must_use]
    pub const fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Unavailable { operation, .. }
            | Self::UnavailableStatus { operation, .. }
            | Self::OperationFailed { operation, .. }
            | Self::Decode { operation, .. } => Some(operation),
            Self::ClientBuild { .. } | Self::InvalidUrl { .. } => None,
        }
    }
}
