//! Health and status endpoints.

use axum::{Json, extract::State};
use glimpse_api_models::{HealthResponse, StatusResponse};
use tracing::warn;

use crate::app::state::ApiState;

pub(crate) async fn health(State(state): State<ApiState>) -> Json<HealthResponse> {
    let response = HealthResponse::from(state.coordinator.catalog_health().await);
    if response.status != "ok" {
        warn!(catalog = %response.catalog, "health degraded");
    }
    Json(response)
}

pub(crate) async fn status(State(state): State<ApiState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: state.version.to_string(),
    })
}
