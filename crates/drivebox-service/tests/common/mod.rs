//! Shared harness for hierarchy engine tests: services wired over
//! in-memory adapters, plus a failure-injecting object store.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use futures::StreamExt;

use drivebox_core::AppResult;
use drivebox_core::error::AppError;
use drivebox_core::traits::{ByteStream, ObjectStore};
use drivebox_core::types::FolderId;
use drivebox_database::memory::{MemoryFileStore, MemoryFolderStore};
use drivebox_entity::{File, Folder};
use drivebox_service::folder::service::CreateFolderRequest;
use drivebox_service::{
    DownloadService, FileService, FolderService, Principal, UploadParams, UploadService,
};
use drivebox_storage::MemoryObjectStore;

pub const DEFAULT_MAX_UPLOAD: u64 = 50 * 1024 * 1024;

/// Everything a test needs: the services plus direct handles on the
/// underlying stores for assertions.
pub struct Harness {
    pub folders: Arc<MemoryFolderStore>,
    pub files: Arc<MemoryFileStore>,
    pub blobs: MemoryObjectStore,
    pub folder_service: FolderService,
    pub file_service: FileService,
    pub upload_service: UploadService,
    pub download_service: DownloadService,
}

impl Harness {
    pub fn new() -> Self {
        let blobs = MemoryObjectStore::new();
        let objects: Arc<dyn ObjectStore> = Arc::new(blobs.clone());
        Self::build(blobs, objects, DEFAULT_MAX_UPLOAD)
    }

    pub fn with_max_upload(max_upload: u64) -> Self {
        let blobs = MemoryObjectStore::new();
        let objects: Arc<dyn ObjectStore> = Arc::new(blobs.clone());
        Self::build(blobs, objects, max_upload)
    }

    /// Harness whose object store fails `copy`/`remove` for keys ending in
    /// one of the given suffixes.
    pub fn with_failing_keys(suffixes: &[&str]) -> Self {
        let blobs = MemoryObjectStore::new();
        let objects: Arc<dyn ObjectStore> = Arc::new(FlakyObjectStore {
            inner: blobs.clone(),
            fail_suffixes: Arc::new(suffixes.iter().map(|s| s.to_string()).collect()),
        });
        Self::build(blobs, objects, DEFAULT_MAX_UPLOAD)
    }

    fn build(blobs: MemoryObjectStore, objects: Arc<dyn ObjectStore>, max_upload: u64) -> Self {
        let folders = Arc::new(MemoryFolderStore::new());
        let files = Arc::new(MemoryFileStore::new());

        let folder_service = FolderService::new(
            Arc::clone(&folders) as _,
            Arc::clone(&files) as _,
            Arc::clone(&objects),
        );
        let file_service = FileService::new(
            Arc::clone(&files) as _,
            Arc::clone(&folders) as _,
            Arc::clone(&objects),
        );
        let upload_service = UploadService::new(
            Arc::clone(&files) as _,
            Arc::clone(&folders) as _,
            Arc::clone(&objects),
            max_upload,
        );
        let download_service = DownloadService::new(Arc::clone(&files) as _, objects);

        Self {
            folders,
            files,
            blobs,
            folder_service,
            file_service,
            upload_service,
            download_service,
        }
    }

    /// Create a folder for `principal`, panicking on failure.
    pub async fn mkdir(
        &self,
        principal: &Principal,
        name: &str,
        parent: Option<FolderId>,
    ) -> Folder {
        self.folder_service
            .create_folder(
                principal,
                CreateFolderRequest {
                    name: name.to_string(),
                    parent_id: parent,
                },
            )
            .await
            .expect("create folder")
    }

    /// Upload a small file for `principal`, panicking on failure.
    pub async fn put_file(
        &self,
        principal: &Principal,
        filename: &str,
        folder: Option<FolderId>,
        content: &[u8],
    ) -> File {
        self.upload_service
            .upload(
                principal,
                UploadParams {
                    filename: filename.to_string(),
                    content_type: Some("application/octet-stream".to_string()),
                    folder_id: folder,
                    data: Bytes::copy_from_slice(content),
                },
            )
            .await
            .expect("upload file")
    }
}

pub fn alice() -> Principal {
    Principal::new("alice", false)
}

pub fn bob() -> Principal {
    Principal::new("bob", false)
}

pub fn admin() -> Principal {
    Principal::new("root", true)
}

/// Drain a download stream into a byte vector.
pub async fn collect_stream(mut stream: ByteStream) -> Vec<u8> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next().await {
        out.extend_from_slice(&chunk.expect("stream chunk"));
    }
    out
}

/// Object store that fails `copy` and `remove` for selected keys, used to
/// exercise the partial-failure paths of the recursive operations.
#[derive(Debug, Clone)]
pub struct FlakyObjectStore {
    inner: MemoryObjectStore,
    fail_suffixes: Arc<Vec<String>>,
}

impl FlakyObjectStore {
    fn should_fail(&self, key: &str) -> bool {
        self.fail_suffixes.iter().any(|s| key.ends_with(s.as_str()))
    }
}

#[async_trait]
impl ObjectStore for FlakyObjectStore {
    fn store_type(&self) -> &str {
        "flaky"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.inner.put(key, data, content_type).await
    }

    async fn get_stream(&self, key: &str) -> AppResult<ByteStream> {
        self.inner.get_stream(key).await
    }

    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()> {
        if self.should_fail(source_key) {
            return Err(AppError::storage(format!(
                "injected copy failure: {source_key}"
            )));
        }
        self.inner.copy(source_key, dest_key).await
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        if self.should_fail(key) {
            return Err(AppError::storage(format!(
                "injected remove failure: {key}"
            )));
        }
        self.inner.remove(key).await
    }

    async fn bucket_exists(&self) -> AppResult<bool> {
        self.inner.bucket_exists().await
    }

    async fn create_bucket(&self) -> AppResult<()> {
        self.inner.create_bucket().await
    }
}
