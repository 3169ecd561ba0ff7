//! Link batch endpoints.
//!
//! # Design
//! - Whole-call validation failures are problem documents; item failures ride in `errors`.
//! - Handlers only translate payloads; the coordinator owns the semantics.

use std::path::PathBuf;

use axum::{
    Json,
    extract::{Query, State},
};
use glimpse_api_models::{
    AddSymlinksRequest, AddSymlinksResponse, ClearSymlinksRequest, ClearSymlinksResponse,
    ListSymlinksQuery, ListSymlinksResponse, RemoveSymlinksRequest, RemoveSymlinksResponse,
};
use glimpse_batch::LinkRequest;

use crate::app::state::ApiState;
use crate::http::errors::ApiError;

pub(crate) async fn add_symlinks(
    State(state): State<ApiState>,
    Json(request): Json<AddSymlinksRequest>,
) -> Result<Json<AddSymlinksResponse>, ApiError> {
    let items: Vec<LinkRequest> = request.items.into_iter().map(LinkRequest::from).collect();
    let outcome = state.coordinator.add(items).await?;
    Ok(Json(AddSymlinksResponse::from(outcome)))
}

pub(crate) async fn remove_symlinks(
    State(state): State<ApiState>,
    Json(request): Json<RemoveSymlinksRequest>,
) -> Result<Json<RemoveSymlinksResponse>, ApiError> {
    let outcome = state.coordinator.remove(request.paths()).await?;
    Ok(Json(RemoveSymlinksResponse::from(outcome)))
}

pub(crate) async fn list_symlinks(
    State(state): State<ApiState>,
    Query(query): Query<ListSymlinksQuery>,
) -> Result<Json<ListSymlinksResponse>, ApiError> {
    let directory = query
        .directory
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| ApiError::bad_request("directory query parameter is required"))?;

    let records = state.coordinator.list(directory.clone()).await?;
    Ok(Json(ListSymlinksResponse::from_records(&directory, records)))
}

pub(crate) async fn clear_symlinks(
    State(state): State<ApiState>,
    Json(request): Json<ClearSymlinksRequest>,
) -> Result<Json<ClearSymlinksResponse>, ApiError> {
    let outcome = state
        .coordinator
        .clear(PathBuf::from(request.directory))
        .await?;
    Ok(Json(ClearSymlinksResponse::from(outcome)))
}
