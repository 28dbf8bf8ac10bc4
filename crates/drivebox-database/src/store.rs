//! Metadata store traits consumed by the hierarchy engine.
//!
//! The engine never talks to a database directly; it sees these traits,
//! injected at construction time. `repositories` implements them on
//! PostgreSQL, `memory` implements them on in-process maps.

use async_trait::async_trait;

use drivebox_core::AppResult;
use drivebox_core::types::{FileId, FolderId};
use drivebox_entity::{CreateFile, CreateFolder, CreateUser, File, Folder, User};

/// Cap applied to every multi-row query.
pub const FIND_MANY_LIMIT: i64 = 1000;

/// Folder constraint for file queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderScope {
    /// No folder constraint.
    Any,
    /// Only root-level rows (`folder_id IS NULL`).
    Root,
    /// Only rows directly inside the given folder.
    In(FolderId),
}

/// Store for folder metadata rows.
#[async_trait]
pub trait FolderStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new folder and return the canonical persisted row.
    async fn insert(&self, data: &CreateFolder) -> AppResult<Folder>;

    /// Find a folder by ID.
    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>>;

    /// Direct children of `parent` (None = root level), optionally filtered
    /// by owner. `owner = None` is the admin's unfiltered view.
    async fn find_children(
        &self,
        parent: Option<FolderId>,
        owner: Option<&str>,
    ) -> AppResult<Vec<Folder>>;

    /// Sibling of `parent` with exactly this name, owned by `owner`,
    /// excluding `exclude` (used when a folder is compared against itself
    /// during a move).
    async fn find_sibling(
        &self,
        parent: Option<FolderId>,
        owner: &str,
        name: &str,
        exclude: Option<FolderId>,
    ) -> AppResult<Option<Folder>>;

    /// Re-parent a folder and stamp its new path. Returns the updated row,
    /// or None if the row vanished in the meantime.
    async fn update_placement(
        &self,
        id: FolderId,
        parent: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<Folder>>;

    /// Re-stamp only the materialized path. Returns false if the row
    /// vanished.
    async fn update_path(&self, id: FolderId, path: &str) -> AppResult<bool>;

    /// Delete a folder row. Returns true if a row was removed.
    async fn delete(&self, id: FolderId) -> AppResult<bool>;
}

/// Store for file metadata rows.
#[async_trait]
pub trait FileStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new file row and return the canonical persisted row.
    async fn insert(&self, data: &CreateFile) -> AppResult<File>;

    /// Find a file by ID.
    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>>;

    /// Files matching a folder scope, optionally filtered by owner and by
    /// case-insensitive filename substring.
    async fn find_many(
        &self,
        scope: FolderScope,
        owner: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<File>>;

    /// Rename a file. Returns the updated row, or None if it vanished.
    async fn update_name(&self, id: FileId, filename: &str) -> AppResult<Option<File>>;

    /// Re-home a file into a folder (or the root) and stamp its new path.
    /// Returns the updated row, or None if it vanished.
    async fn update_placement(
        &self,
        id: FileId,
        folder: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<File>>;

    /// Bulk path re-stamp for every file directly inside `folder`.
    async fn update_paths_in_folder(&self, folder: FolderId, path: &str) -> AppResult<()>;

    /// Delete a file row. Returns true if a row was removed.
    async fn delete(&self, id: FileId) -> AppResult<bool>;
}

/// Store for user accounts.
#[async_trait]
pub trait UserStore: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new account. Duplicate usernames are a Conflict.
    async fn insert(&self, data: &CreateUser) -> AppResult<User>;

    /// Look up an account by username.
    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>>;
}
