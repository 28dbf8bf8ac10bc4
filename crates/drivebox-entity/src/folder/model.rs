//! Folder entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use drivebox_core::types::FolderId;

/// A folder in the file hierarchy.
///
/// `path` is the materialized path of this folder itself, always
/// trailing-slash-terminated (e.g. `/Projects/2024/`). It must stay equal
/// to the parent chain; every move re-stamps it across the subtree.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Folder {
    /// Unique folder identifier.
    pub id: FolderId,
    /// Folder name.
    pub name: String,
    /// Parent folder ID (null for root-level folders).
    pub parent_id: Option<FolderId>,
    /// Materialized path of this folder, e.g. `/Projects/2024/`.
    pub path: String,
    /// Owner username. Rows without an owner are invisible to non-admins.
    pub owner: Option<String>,
    /// When the folder was created.
    pub created_at: DateTime<Utc>,
}

impl Folder {
    /// Check if this is a root-level folder (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Data required to create a new folder row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolder {
    /// Folder name (already validated).
    pub name: String,
    /// Parent folder (None for root-level).
    pub parent_id: Option<FolderId>,
    /// Materialized path, `parent.path + name + "/"`.
    pub path: String,
    /// Owner username.
    pub owner: Option<String>,
}
