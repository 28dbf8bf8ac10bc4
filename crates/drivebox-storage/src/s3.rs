//! S3-compatible object store (AWS S3 or MinIO).

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{BehaviorVersion, Credentials, Region};
use bytes::Bytes;
use tokio_util::io::ReaderStream;
use tracing::{debug, info};

use drivebox_core::config::storage::StorageConfig;
use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::traits::object_store::{ByteStream, ObjectStore};

use crate::DOWNLOAD_CHUNK_SIZE;

/// Object store backed by an S3-compatible service.
///
/// All blobs live in a single configured bucket; MinIO deployments use
/// path-style addressing.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a new store from storage configuration.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        info!(
            endpoint = %config.endpoint,
            bucket = %config.bucket,
            "Initializing S3 object store"
        );

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "drivebox",
        );

        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .endpoint_url(&config.endpoint)
            .credentials_provider(credentials)
            .load()
            .await;

        let s3_config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(config.use_path_style)
            .build();

        Ok(Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        })
    }
}

/// Percent-encode an object key for use in the `x-amz-copy-source` header.
///
/// Slashes are kept literal; everything outside the unreserved set is
/// encoded, as the S3 API requires.
fn encode_copy_source(bucket: &str, key: &str) -> String {
    let mut encoded = String::with_capacity(bucket.len() + key.len() + 1);
    encoded.push_str(bucket);
    encoded.push('/');
    for byte in key.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' | b'/' => {
                encoded.push(byte as char);
            }
            other => {
                encoded.push_str(&format!("%{other:02X}"));
            }
        }
    }
    encoded
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    fn store_type(&self) -> &str {
        "s3"
    }

    async fn put(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<()> {
        let len = data.len();
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(aws_sdk_s3::primitives::ByteStream::from(data))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to store object: {key}"),
                    e.into_service_error(),
                )
            })?;

        debug!(key, bytes = len, "Stored object");
        Ok(())
    }

    async fn get_stream(&self, key: &str) -> AppResult<ByteStream> {
        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let service = e.into_service_error();
                if service.is_no_such_key() {
                    AppError::not_found(format!("Object not found: {key}"))
                } else {
                    AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to open object: {key}"),
                        service,
                    )
                }
            })?;

        let reader = response.body.into_async_read();
        let stream = ReaderStream::with_capacity(reader, DOWNLOAD_CHUNK_SIZE);
        Ok(Box::pin(stream))
    }

    async fn copy(&self, source_key: &str, dest_key: &str) -> AppResult<()> {
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .key(dest_key)
            .copy_source(encode_copy_source(&self.bucket, source_key))
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to copy object {source_key} -> {dest_key}"),
                    e.into_service_error(),
                )
            })?;

        debug!(source_key, dest_key, "Copied object");
        Ok(())
    }

    async fn remove(&self, key: &str) -> AppResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to delete object: {key}"),
                    e.into_service_error(),
                )
            })?;

        debug!(key, "Deleted object");
        Ok(())
    }

    async fn bucket_exists(&self) -> AppResult<bool> {
        match self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service = e.into_service_error();
                if service.is_not_found() {
                    Ok(false)
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to check bucket: {}", self.bucket),
                        service,
                    ))
                }
            }
        }
    }

    async fn create_bucket(&self) -> AppResult<()> {
        match self
            .client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
        {
            Ok(_) => {
                info!(bucket = %self.bucket, "Created bucket");
                Ok(())
            }
            Err(e) => {
                let service = e.into_service_error();
                if service.is_bucket_already_owned_by_you() || service.is_bucket_already_exists() {
                    Ok(())
                } else {
                    Err(AppError::with_source(
                        ErrorKind::Storage,
                        format!("Failed to create bucket: {}", self.bucket),
                        service,
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::encode_copy_source;

    #[test]
    fn test_copy_source_plain_key() {
        assert_eq!(
            encode_copy_source("files", "abc-report.pdf"),
            "files/abc-report.pdf"
        );
    }

    #[test]
    fn test_copy_source_encodes_spaces_and_unicode() {
        assert_eq!(
            encode_copy_source("files", "id-annual report.pdf"),
            "files/id-annual%20report.pdf"
        );
        assert_eq!(encode_copy_source("files", "id-ü.txt"), "files/id-%C3%BC.txt");
    }
}
