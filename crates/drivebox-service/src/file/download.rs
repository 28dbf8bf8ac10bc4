//! File download: metadata lookup plus a chunked content stream.

use std::sync::Arc;

use drivebox_core::error::ErrorKind;
use drivebox_core::traits::{ByteStream, ObjectStore};
use drivebox_core::types::FileId;
use drivebox_core::{AppError, AppResult};
use drivebox_database::store::FileStore;
use drivebox_entity::file::File;

use crate::context::Principal;
use crate::guard;

/// A file ready to stream: the metadata row plus its content stream.
///
/// Disposition (inline vs attachment) is the transport layer's decision;
/// the engine hands back the raw pair.
pub struct DownloadResult {
    /// File metadata.
    pub file: File,
    /// Chunked content stream.
    pub stream: ByteStream,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("file", &self.file)
            .finish()
    }
}

/// Handles file downloads.
#[derive(Clone)]
pub struct DownloadService {
    /// File metadata store.
    files: Arc<dyn FileStore>,
    /// Blob store.
    objects: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(files: Arc<dyn FileStore>, objects: Arc<dyn ObjectStore>) -> Self {
        Self { files, objects }
    }

    /// Opens a download for a file.
    ///
    /// A blob missing for an existing row is an internal inconsistency,
    /// not a NotFound: the caller was already authorized against the row.
    pub async fn download(
        &self,
        principal: &Principal,
        file_id: FileId,
    ) -> AppResult<DownloadResult> {
        let file = guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )?;

        let stream = self
            .objects
            .get_stream(&file.object_key)
            .await
            .map_err(|e| {
                if e.kind == ErrorKind::NotFound {
                    AppError::internal(format!("Blob missing for file {}", file.id))
                } else {
                    e
                }
            })?;

        Ok(DownloadResult { file, stream })
    }
}
