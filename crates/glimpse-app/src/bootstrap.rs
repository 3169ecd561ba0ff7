use std::sync::Arc;

use glimpse_api::{ApiServer, ApiState};
use glimpse_batch::{BatchCoordinator, CatalogTarget};
use glimpse_catalog::{Catalog, CatalogClient};
use glimpse_config::AppConfig;
use glimpse_fsops::LinkStore;
use glimpse_telemetry::{LoggingConfig, build_sha, log_format_from_name};
use tracing::{error, info};

use crate::error::{AppError, AppResult};

/// Entry point for the Glimpse boot sequence.
///
/// # Errors
///
/// Returns an error if configuration, telemetry, or the HTTP server fail.
pub async fn run_app() -> AppResult<()> {
    let config =
        glimpse_config::load_from_env().map_err(|err| AppError::config("config.load_env", err))?;
    run_app_with(config).await
}

/// Boot sequence driven entirely by an already loaded configuration.
pub(crate) async fn run_app_with(config: AppConfig) -> AppResult<()> {
    glimpse_telemetry::init_logging(&logging_config(&config))
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;

    info!(
        build_sha = build_sha(),
        catalog = config.catalog.is_some(),
        "Glimpse bootstrap starting"
    );

    let state = build_state(&config)?;
    let addr = config.socket_addr();
    ApiServer::new(state)
        .serve(addr, shutdown_signal())
        .await
        .map_err(|err| AppError::api_server("api_server.serve", err))?;

    info!("Glimpse shut down cleanly");
    Ok(())
}

fn logging_config(config: &AppConfig) -> LoggingConfig<'_> {
    LoggingConfig {
        level: &config.logging.level,
        format: log_format_from_name(config.logging.format.as_deref()),
        build_sha: option_env!("GLIMPSE_BUILD_SHA").unwrap_or("dev"),
    }
}

/// Wire the link store, optional catalog client, and coordinator.
pub(crate) fn build_state(config: &AppConfig) -> AppResult<ApiState> {
    let coordinator = BatchCoordinator::new(LinkStore::new());
    let coordinator = match &config.catalog {
        Some(catalog) => {
            let client = CatalogClient::from_config(catalog)
                .map_err(|err| AppError::catalog("catalog_client.new", err))?;
            info!(
                url = %client.base_url(),
                folder = %catalog.folder_name,
                "catalog synchronisation enabled"
            );
            let client: Arc<dyn Catalog> = Arc::new(client);
            coordinator.with_catalog(
                client,
                CatalogTarget {
                    folder_name: catalog.folder_name.clone(),
                    collection_type: catalog.collection_type.clone(),
                },
            )
        }
        None => {
            info!("catalog synchronisation disabled");
            coordinator
        }
    };
    Ok(ApiState::new(coordinator))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("ctrl-c received; shutting down"),
        () = terminate => info!("SIGTERM received; shutting down"),
    }
}
