//! Object storage configuration.

use serde::{Deserialize, Serialize};

/// S3-compatible object storage configuration.
///
/// All file content lives in a single bucket; metadata rows reference
/// blobs by opaque object key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Endpoint URL (for non-AWS services like MinIO).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Region name. MinIO accepts any value here.
    #[serde(default = "default_region")]
    pub region: String,
    /// Bucket holding every stored blob.
    #[serde(default = "default_bucket")]
    pub bucket: String,
    /// Access key ID.
    #[serde(default = "default_access_key")]
    pub access_key: String,
    /// Secret access key.
    #[serde(default = "default_secret_key")]
    pub secret_key: String,
    /// Use path-style addressing (required by MinIO).
    #[serde(default = "default_true")]
    pub use_path_style: bool,
    /// Maximum accepted upload size in bytes (default 50 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            region: default_region(),
            bucket: default_bucket(),
            access_key: default_access_key(),
            secret_key: default_secret_key(),
            use_path_style: default_true(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:9000".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_bucket() -> String {
    "files".to_string()
}

fn default_access_key() -> String {
    "minioadmin".to_string()
}

fn default_secret_key() -> String {
    "minioadmin".to_string()
}

fn default_true() -> bool {
    true
}

fn default_max_upload() -> u64 {
    50 * 1024 * 1024
}
