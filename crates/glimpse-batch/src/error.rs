//! # Design
//!
//! - Whole-call failures only; per-item failures are rendered into the batch outcome.
//! - Rendered item errors walk the full source chain so OS causes are visible.

use std::error::Error as StdError;

use glimpse_fsops::FsOpsError;
use thiserror::Error;

/// Result alias for coordinator operations.
pub type BatchResult<T> = Result<T, BatchError>;

/// Failures that abort a whole call without partial results.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The request cannot be executed as given.
    #[error("invalid batch request")]
    InvalidRequest {
        /// Request field that failed validation.
        field: &'static str,
        /// Static reason for the failure.
        reason: &'static str,
    },
    /// A single-target link store operation failed.
    #[error("link store operation failed")]
    Store {
        /// Operation identifier.
        operation: &'static str,
        /// Source link store error.
        source: FsOpsError,
    },
    /// The blocking worker running filesystem work did not complete.
    #[error("blocking worker failed")]
    Worker {
        /// Operation identifier.
        operation: &'static str,
        /// Source join error.
        source: tokio::task::JoinError,
    },
}

impl BatchError {
    /// Whether the caller can correct the failure by changing the request.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidRequest { .. } => true,
            Self::Store { source, .. } => source.is_client_error(),
            Self::Worker { .. } => false,
        }
    }
}

/// Render `error` and each of its sources as `"outer: inner: ..."`.
#[must_use]
pub fn render_error(error: &(dyn StdError + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}
