//! File entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use drivebox_core::types::{FileId, FolderId};

/// A file stored in Drivebox.
///
/// `path` is the materialized path of the *containing folder* at the time
/// of last placement (`/` for root-level files); `object_key` points at the
/// single blob in the object store that holds the content.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    /// Unique file identifier.
    pub id: FileId,
    /// Display name (including extension).
    pub filename: String,
    /// Content length in bytes, fixed at creation/copy.
    pub size: i64,
    /// MIME type.
    pub content_type: String,
    /// Opaque key of the blob in the object store. Unique per blob.
    pub object_key: String,
    /// Containing folder (null for root-level files).
    pub folder_id: Option<FolderId>,
    /// Materialized path of the containing folder, e.g. `/Projects/2024/`.
    pub path: String,
    /// Owner username. Rows without an owner are invisible to non-admins.
    pub owner: Option<String>,
    /// When the file was uploaded (or copied into existence).
    pub uploaded_at: DateTime<Utc>,
}

impl File {
    /// Check if this file sits at the root level (no containing folder).
    pub fn is_root(&self) -> bool {
        self.folder_id.is_none()
    }
}

/// Data required to create a new file row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFile {
    /// Display name (already validated).
    pub filename: String,
    /// Content length in bytes.
    pub size: i64,
    /// MIME type.
    pub content_type: String,
    /// Blob key in the object store.
    pub object_key: String,
    /// Containing folder (None for root-level).
    pub folder_id: Option<FolderId>,
    /// Materialized path of the containing folder.
    pub path: String,
    /// Owner username.
    pub owner: Option<String>,
}
