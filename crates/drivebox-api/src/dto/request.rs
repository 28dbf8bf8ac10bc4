//! Request DTOs with validation.
//!
//! Folder references arrive as raw strings here (`"root"`, a UUID, or
//! absent) and are parsed by the engine's `FolderRef` rules in handlers,
//! so malformed IDs become validation errors rather than routing misses.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Username.
    #[validate(length(min = 1, max = 50, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username.
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (absent for root-level).
    pub parent_folder_id: Option<String>,
}

/// Move folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFolderRequest {
    /// Destination parent (absent or `"root"` for the top level).
    pub parent_folder_id: Option<String>,
}

/// Copy folder request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFolderRequest {
    /// Destination parent (absent or `"root"` for the top level).
    pub parent_folder_id: Option<String>,
}

/// Rename file request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameFileRequest {
    /// New display name.
    pub new_filename: String,
}

/// Move file request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveFileRequest {
    /// Destination folder (absent or `"root"` for the top level).
    pub folder_id: Option<String>,
}

/// Copy file request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyFileRequest {
    /// Destination folder (absent or `"root"` for the top level).
    pub folder_id: Option<String>,
}

/// Query parameters for folder listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListFoldersQuery {
    /// Parent to list under (absent or `"root"` for the top level).
    pub parent_folder_id: Option<String>,
}

/// Query parameters for file listings.
#[derive(Debug, Clone, Deserialize)]
pub struct ListFilesQuery {
    /// Folder constraint (absent = everywhere, `"root"` = top level).
    pub folder_id: Option<String>,
    /// Case-insensitive filename substring filter.
    pub search: Option<String>,
}

/// Query parameters for downloads.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadQuery {
    /// Request inline display instead of an attachment download.
    #[serde(default)]
    pub inline: bool,
}
