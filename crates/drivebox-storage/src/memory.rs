//! In-memory object store for tests and single-process use.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::Mutex;

use drivebox_core::error::AppError;
use drivebox_core::result::AppResult;
use drivebox_core::traits::object_store::{ByteStream, ObjectStore};

use crate::DOWNLOAD_CHUNK_SIZE;

/// A stored blob: content plus its content type.
#[derive(Debug, Clone)]
struct Blob {
    data: Bytes,
    content_type: String,
}

/// In-memory object store backed by a map.
///
/// The "bucket" exists from construction; `create_bucket` is a no-op kept
/// for contract parity with the S3 backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryObjectStore {
    blobs: Arc<Mutex<HashMap<String, Blob>>>,
}

impl MemoryObjectStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blobs (test helper).
    pub async fn len(&self) -> usize {
        self.blobs.lock().await.len()
    }

    /// Whether no blobs are stored (test helper).
    pub async fn is_empty(&self) -> bool {
        self.blobs.lock().await.is_empty()
    }

    /// Whether a blob exists under the given key (test helper).
    pub async fn contains(&self, key: &str) -> bool {
        self.blobs.lock().await.contains_key(key)
    }

    /// Content type recorded for a blob, if present (test helper).
    pub async fn content_type_of(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .await
            .get(key)
            .map(|b| b.content_type.clone())
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn store_type(&self) -> &str {
        "memory"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        self.blobs.lock().await.insert(
            key.to_string(),
            Blob {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn get_stream(&self, key: &str) -> AppResult<ByteStream> {
        let blobs = self.blobs.lock().await;
        let blob = blobs
            .get(key)
            .ok_or_else(|| AppError::not_found(format!("Object not found: {key}")))?;

        let chunks: Vec<Result<Bytes, std::io::Error>> = blob
            .data
            .chunks(DOWNLOAD_CHUNK_SIZE)
            .map(|chunk| Ok(Bytes::copy_from_slice(chunk)))
            .collect();

        Ok(Box::pin(futures::stream::iter(chunks)))
    }

    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()> {
        let mut blobs = self.blobs.lock().await;
        let blob = blobs
            .get(source_key)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Object not found: {source_key}")))?;
        blobs.insert(dest_key.to_string(), blob);
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.blobs.lock().await.remove(key);
        Ok(())
    }

    async fn bucket_exists(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn create_bucket(&self) -> AppResult<()> {
        Ok(())
    }
}
