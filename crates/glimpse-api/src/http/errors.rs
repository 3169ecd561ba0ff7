//! RFC9457-style API error wrapper.

use std::fmt::{self, Display, Formatter};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use glimpse_api_models::ProblemDetails;
use glimpse_batch::{BatchError, render_error};
use tracing::error;

use crate::http::constants::{PROBLEM_BAD_REQUEST, PROBLEM_INTERNAL};

/// Structured API error rendered as a problem document.
#[derive(Debug)]
pub(crate) struct ApiError {
    status: StatusCode,
    kind: &'static str,
    title: &'static str,
    detail: Option<String>,
}

impl ApiError {
    const fn new(status: StatusCode, kind: &'static str, title: &'static str) -> Self {
        Self {
            status,
            kind,
            title,
            detail: None,
        }
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            PROBLEM_INTERNAL,
            "internal server error",
        )
        .with_detail(message)
    }

    pub(crate) fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, PROBLEM_BAD_REQUEST, "bad request").with_detail(detail)
    }

    #[cfg(test)]
    pub(crate) const fn status(&self) -> StatusCode {
        self.status
    }

    #[cfg(test)]
    pub(crate) fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl From<BatchError> for ApiError {
    fn from(err: BatchError) -> Self {
        match &err {
            BatchError::InvalidRequest { field, reason } => {
                Self::bad_request(format!("{field}: {reason}"))
            }
            _ if err.is_client_error() => Self::bad_request(render_error(&err)),
            _ => {
                let detail = render_error(&err);
                error!(error = %detail, "request failed");
                Self::internal(detail)
            }
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.title)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ProblemDetails {
            kind: self.kind.to_string(),
            title: self.title.to_string(),
            status: self.status.as_u16(),
            detail: self.detail,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glimpse_fsops::FsOpsError;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn invalid_request_maps_to_bad_request() {
        let err = ApiError::from(BatchError::InvalidRequest {
            field: "items",
            reason: "empty",
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.detail(), Some("items: empty"));
    }

    #[test]
    fn store_failures_split_by_classification() {
        let not_empty = ApiError::from(BatchError::Store {
            operation: "remove_directory",
            source: FsOpsError::DirectoryNotEmpty {
                path: PathBuf::from("/out"),
            },
        });
        assert_eq!(not_empty.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            not_empty.detail(),
            Some("link store operation failed: directory is not empty")
        );

        let io_failure = ApiError::from(BatchError::Store {
            operation: "list_links",
            source: FsOpsError::Io {
                operation: "list_links",
                path: PathBuf::from("/out"),
                source: io::Error::other("denied"),
            },
        });
        assert_eq!(io_failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn into_response_sets_status() {
        let response = ApiError::bad_request("nope").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
