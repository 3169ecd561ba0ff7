//! Router construction and server host for the API.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    Router,
    http::{HeaderName, Method, Request, header::CONTENT_TYPE},
    routing::{delete, get, post},
};
use glimpse_telemetry::build_sha;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{Span, info};

use crate::app::state::ApiState;
use crate::error::{ApiServerError, ApiServerResult};
use crate::http::constants::HEADER_REQUEST_ID;
use crate::http::directories::{create_directory, remove_directory};
use crate::http::health::{health, status};
use crate::http::symlinks::{add_symlinks, clear_symlinks, list_symlinks, remove_symlinks};

/// Axum router wrapper that hosts the Glimpse API.
pub struct ApiServer {
    router: Router,
}

impl ApiServer {
    /// Construct the server with its routes and middleware.
    #[must_use]
    pub fn new(state: ApiState) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, HeaderName::from_static(HEADER_REQUEST_ID)]);
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &Request<_>| {
                let request_id = request
                    .headers()
                    .get(HEADER_REQUEST_ID)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                tracing::info_span!(
                    "http.request",
                    method = %request.method(),
                    route = %request.uri().path(),
                    request_id = %request_id,
                    build_sha = %build_sha(),
                    status_code = tracing::field::Empty,
                    latency_ms = tracing::field::Empty
                )
            })
            .on_request(|_request: &Request<_>, _span: &Span| {})
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &Span| {
                    span.record("status_code", response.status().as_u16());
                    let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                    span.record("latency_ms", latency_ms);
                },
            );
        let layered = ServiceBuilder::new()
            .layer(glimpse_telemetry::propagate_request_id_layer())
            .layer(glimpse_telemetry::set_request_id_layer())
            .layer(trace_layer);

        let router = Self::build_router()
            .layer(cors_layer)
            .route_layer(layered)
            .with_state(state);

        Self { router }
    }

    fn build_router() -> Router<ApiState> {
        Self::public_routes().merge(Self::v1_routes())
    }

    fn public_routes() -> Router<ApiState> {
        Router::new().route("/health", get(health))
    }

    fn v1_routes() -> Router<ApiState> {
        Router::new()
            .route("/v1/status", get(status))
            .route("/v1/symlinks/add", post(add_symlinks))
            .route("/v1/symlinks/remove", post(remove_symlinks))
            .route("/v1/symlinks/list", get(list_symlinks))
            .route("/v1/symlinks/clear", post(clear_symlinks))
            .route("/v1/directories/create", post(create_directory))
            .route("/v1/directories/remove", delete(remove_directory))
    }

    /// Access the configured router.
    #[must_use]
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `addr` until `shutdown` resolves.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind or the server terminates abnormally.
    pub async fn serve<F>(self, addr: SocketAddr, shutdown: F) -> ApiServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ApiServerError::Bind { addr, source })?;
        let local = listener.local_addr().unwrap_or(addr);
        info!(addr = %local, "api listening");
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|source| ApiServerError::Serve { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use axum::body::{Body, to_bytes};
    use axum::http::StatusCode;
    use glimpse_batch::BatchCoordinator;
    use glimpse_fsops::LinkStore;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn server() -> ApiServer {
        ApiServer::new(ApiState::with_version(
            BatchCoordinator::new(LinkStore::new()),
            "0.0.0-test",
        ))
    }

    async fn json_body(response: axum::response::Response) -> Result<Value> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    #[tokio::test]
    async fn health_route_sets_request_id() -> Result<()> {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/health").body(Body::empty())?)
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(HEADER_REQUEST_ID));
        let body = json_body(response).await?;
        assert_eq!(body, json!({ "status": "ok", "catalog": "disabled" }));
        Ok(())
    }

    #[tokio::test]
    async fn status_route_reports_version() -> Result<()> {
        let response = server()
            .router()
            .oneshot(Request::builder().uri("/v1/status").body(Body::empty())?)
            .await?;

        assert_eq!(json_body(response).await?, json!({ "version": "0.0.0-test" }));
        Ok(())
    }

    #[tokio::test]
    async fn empty_add_returns_problem_document() -> Result<()> {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/v1/symlinks/add")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"items":[]}"#))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await?;
        assert_eq!(body["type"], "https://glimpse.dev/problems/bad-request");
        assert_eq!(body["status"], 400);
        Ok(())
    }

    #[tokio::test]
    async fn list_without_directory_is_bad_request() -> Result<()> {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/v1/symlinks/list")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }

    #[tokio::test]
    async fn request_id_is_propagated() -> Result<()> {
        let response = server()
            .router()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(HEADER_REQUEST_ID, "req-123")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(
            response
                .headers()
                .get(HEADER_REQUEST_ID)
                .and_then(|value| value.to_str().ok()),
            Some("req-123")
        );
        Ok(())
    }
}
