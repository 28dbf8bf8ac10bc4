//! Application state shared across all handlers.

use std::sync::Arc;

use drivebox_auth::TokenCodec;
use drivebox_core::config::AppConfig;
use drivebox_core::traits::ObjectStore;
use drivebox_database::store::{FileStore, FolderStore, UserStore};
use drivebox_service::{DownloadService, FileService, FolderService, UploadService};

/// Application state containing all shared dependencies.
///
/// Passed to every axum handler via `State<AppState>`. All fields are
/// `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// User account store (register/login).
    pub users: Arc<dyn UserStore>,
    /// Token signing and verification.
    pub token_codec: Arc<TokenCodec>,
    /// Folder hierarchy operations.
    pub folder_service: Arc<FolderService>,
    /// File CRUD operations.
    pub file_service: Arc<FileService>,
    /// File uploads.
    pub upload_service: Arc<UploadService>,
    /// File downloads.
    pub download_service: Arc<DownloadService>,
}

impl AppState {
    /// Assemble the full state from configuration and injected adapters.
    ///
    /// This is the single construction point used by both the server binary
    /// and the integration tests; only the adapter implementations differ.
    pub fn new(
        config: Arc<AppConfig>,
        users: Arc<dyn UserStore>,
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        let token_codec = Arc::new(TokenCodec::new(&config.auth));
        let folder_service = Arc::new(FolderService::new(
            Arc::clone(&folders),
            Arc::clone(&files),
            Arc::clone(&objects),
        ));
        let file_service = Arc::new(FileService::new(
            Arc::clone(&files),
            Arc::clone(&folders),
            Arc::clone(&objects),
        ));
        let upload_service = Arc::new(UploadService::new(
            Arc::clone(&files),
            Arc::clone(&folders),
            Arc::clone(&objects),
            config.storage.max_upload_size_bytes,
        ));
        let download_service = Arc::new(DownloadService::new(files, objects));

        Self {
            config,
            users,
            token_codec,
            folder_service,
            file_service,
            upload_service,
            download_service,
        }
    }
}
