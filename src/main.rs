//! Drivebox server — file and folder management backend.
//!
//! Entry point that wires configuration, logging, the metadata store, the
//! object store, and the HTTP router together.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use drivebox_api::{AppState, build_router};
use drivebox_core::config::AppConfig;
use drivebox_core::error::AppError;
use drivebox_core::traits::ObjectStore;
use drivebox_database::DatabasePool;
use drivebox_database::repositories::{FileRepository, FolderRepository, UserRepository};
use drivebox_storage::S3ObjectStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("DRIVEBOX_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Drivebox v{}", env!("CARGO_PKG_VERSION"));

    let db = DatabasePool::connect(&config.database).await?;
    drivebox_database::migration::run_migrations(db.pool()).await?;

    let objects: Arc<dyn ObjectStore> = Arc::new(S3ObjectStore::new(&config.storage).await?);
    if !objects.bucket_exists().await? {
        objects.create_bucket().await?;
    }

    let users = Arc::new(UserRepository::new(db.pool().clone()));
    let folders = Arc::new(FolderRepository::new(db.pool().clone()));
    let files = Arc::new(FileRepository::new(db.pool().clone()));

    let addr = config.server.bind_addr();
    let state = AppState::new(Arc::new(config), users, folders, files, objects);
    let router = build_router(state);

    tracing::info!("Listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    axum::serve(listener, router)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    db.close().await;
    Ok(())
}
