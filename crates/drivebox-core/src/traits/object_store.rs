//! Object store trait for blob storage backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// Trait for blob storage backends.
///
/// All content lives in a single bucket; callers address blobs by opaque
/// object key. The [`ObjectStore`] trait is defined here in `drivebox-core`
/// and implemented in `drivebox-storage`.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the backend type name (e.g., "s3", "memory").
    fn store_type(&self) -> &str;

    /// Write a blob under the given key with the given content type.
    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()>;

    /// Open a lazy, chunked read stream over a blob.
    async fn get_stream(&self, key: &str) -> AppResult<ByteStream>;

    /// Duplicate a blob server-side under a new key.
    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()>;

    /// Delete a blob. Deleting a missing key is not an error.
    async fn remove(&self, key: &str) -> AppResult<()>;

    /// Check whether the configured bucket exists.
    async fn bucket_exists(&self) -> AppResult<bool>;

    /// Create the configured bucket.
    async fn create_bucket(&self) -> AppResult<()>;
}
