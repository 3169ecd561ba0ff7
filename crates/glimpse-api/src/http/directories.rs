//! Directory lifecycle endpoints.

use std::path::PathBuf;

use axum::{Json, extract::State};
use glimpse_api_models::{
    CreateDirectoryRequest, CreateDirectoryResponse, RemoveDirectoryRequest,
    RemoveDirectoryResponse,
};

use crate::app::state::ApiState;
use crate::http::errors::ApiError;

pub(crate) async fn create_directory(
    State(state): State<ApiState>,
    Json(request): Json<CreateDirectoryRequest>,
) -> Result<Json<CreateDirectoryResponse>, ApiError> {
    let created = state
        .coordinator
        .create_directory(PathBuf::from(&request.directory))
        .await?;
    let message = if created {
        "directory created"
    } else {
        "directory already exists"
    };
    Ok(Json(CreateDirectoryResponse {
        success: true,
        directory: request.directory,
        created,
        message: message.to_string(),
    }))
}

pub(crate) async fn remove_directory(
    State(state): State<ApiState>,
    Json(request): Json<RemoveDirectoryRequest>,
) -> Result<Json<RemoveDirectoryResponse>, ApiError> {
    let removed = state
        .coordinator
        .remove_directory(PathBuf::from(&request.directory), request.force)
        .await?;
    let message = if removed {
        "directory removed"
    } else {
        "directory did not exist"
    };
    Ok(Json(RemoveDirectoryResponse {
        success: true,
        directory: request.directory,
        message: message.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, anyhow};
    use axum::http::StatusCode;
    use glimpse_batch::BatchCoordinator;
    use glimpse_fsops::LinkStore;
    use glimpse_test_support::fixtures::{temp_dir, write_media_file};

    fn test_state() -> ApiState {
        ApiState::new(BatchCoordinator::new(LinkStore::new()))
    }

    #[tokio::test]
    async fn create_directory_reports_whether_it_created() -> Result<()> {
        let temp = temp_dir("glimpse-api-dirs-")?;
        let directory = temp.path().join("previews").display().to_string();
        let request = CreateDirectoryRequest {
            directory: directory.clone(),
        };

        let Json(first) = create_directory(State(test_state()), Json(request.clone())).await?;
        let Json(second) = create_directory(State(test_state()), Json(request)).await?;

        assert!(first.created);
        assert!(!second.created);
        assert_eq!(second.message, "directory already exists");
        assert_eq!(second.directory, directory);
        Ok(())
    }

    #[tokio::test]
    async fn remove_directory_without_force_rejects_non_empty() -> Result<()> {
        let temp = temp_dir("glimpse-api-dirs-")?;
        let directory = temp.path().join("previews");
        let content = write_media_file(&directory, "M.mkv")?;

        let err = remove_directory(
            State(test_state()),
            Json(RemoveDirectoryRequest {
                directory: directory.display().to_string(),
                force: false,
            }),
        )
        .await
        .err()
        .ok_or_else(|| anyhow!("expected non-empty rejection"))?;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(content.exists());

        let Json(response) = remove_directory(
            State(test_state()),
            Json(RemoveDirectoryRequest {
                directory: directory.display().to_string(),
                force: true,
            }),
        )
        .await?;
        assert!(response.success);
        assert!(!directory.exists());
        Ok(())
    }

    #[tokio::test]
    async fn empty_directory_is_rejected() -> Result<()> {
        let err = create_directory(State(test_state()), Json(CreateDirectoryRequest::default()))
            .await
            .err()
            .ok_or_else(|| anyhow!("expected empty directory rejection"))?;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        Ok(())
    }
}
