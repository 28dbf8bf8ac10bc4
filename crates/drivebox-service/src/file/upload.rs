//! File upload: size gating, blob write, then metadata insert.

use std::sync::Arc;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use drivebox_core::traits::ObjectStore;
use drivebox_core::types::FolderId;
use drivebox_core::{AppError, AppResult};
use drivebox_database::store::{FileStore, FolderStore};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::validate::validate_file_name;

use crate::context::Principal;
use crate::guard;

/// Parameters for a single-request upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// File name as supplied by the caller.
    pub filename: String,
    /// MIME type, if the caller provided one.
    pub content_type: Option<String>,
    /// Target folder (None for root-level).
    pub folder_id: Option<FolderId>,
    /// File content.
    pub data: Bytes,
}

/// Handles file uploads.
#[derive(Clone)]
pub struct UploadService {
    /// File metadata store.
    files: Arc<dyn FileStore>,
    /// Folder metadata store (target lookups).
    folders: Arc<dyn FolderStore>,
    /// Blob store.
    objects: Arc<dyn ObjectStore>,
    /// Maximum accepted upload size in bytes.
    max_upload_size: u64,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("max_upload_size", &self.max_upload_size)
            .finish()
    }
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        objects: Arc<dyn ObjectStore>,
        max_upload_size: u64,
    ) -> Self {
        Self {
            files,
            folders,
            objects,
            max_upload_size,
        }
    }

    /// Uploads a file.
    ///
    /// The blob is written before the metadata row, so no row ever points
    /// at a blob that was never stored. Oversized content is rejected
    /// before anything is written.
    pub async fn upload(&self, principal: &Principal, params: UploadParams) -> AppResult<File> {
        let filename = validate_file_name(&params.filename)?;

        let path = match params.folder_id {
            Some(folder_id) => {
                let folder = guard::authorize(
                    self.folders.find_by_id(folder_id).await?,
                    principal,
                    "Folder not found",
                )?;
                folder.path
            }
            None => "/".to_string(),
        };

        let size = params.data.len() as u64;
        if size > self.max_upload_size {
            return Err(AppError::validation(format!(
                "File exceeds maximum upload size of {} bytes",
                self.max_upload_size
            )));
        }

        let content_type = params
            .content_type
            .unwrap_or_else(|| "application/octet-stream".to_string());

        // Keyed by a fresh UUID plus the original name: globally unique,
        // still recognizable when inspecting the bucket directly.
        let object_key = format!("{}-{}", Uuid::new_v4(), filename);

        self.objects
            .put(&object_key, params.data, &content_type)
            .await?;

        let file = self
            .files
            .insert(&CreateFile {
                filename,
                size: size as i64,
                content_type,
                object_key,
                folder_id: params.folder_id,
                path,
                owner: Some(principal.username.clone()),
            })
            .await?;

        info!(
            owner = %principal.username,
            file_id = %file.id,
            filename = %file.filename,
            size = file.size,
            "File uploaded"
        );

        Ok(file)
    }
}
