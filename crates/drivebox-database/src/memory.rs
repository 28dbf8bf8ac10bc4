//! In-memory store implementations for tests and single-process use.
//!
//! Behavior mirrors the PostgreSQL repositories, including the sibling
//! uniqueness backstop and the 1000-row listing cap.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use drivebox_core::AppResult;
use drivebox_core::error::AppError;
use drivebox_core::types::{FileId, FolderId, UserId};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::folder::{CreateFolder, Folder};
use drivebox_entity::user::{CreateUser, User};

use crate::store::{FIND_MANY_LIMIT, FileStore, FolderScope, FolderStore, UserStore};

/// In-memory folder store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryFolderStore {
    rows: Arc<Mutex<HashMap<FolderId, Folder>>>,
}

impl MemoryFolderStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FolderStore for MemoryFolderStore {
    async fn insert(&self, data: &CreateFolder) -> AppResult<Folder> {
        let mut rows = self.rows.lock().await;
        let duplicate = rows.values().any(|f| {
            f.parent_id == data.parent_id && f.owner == data.owner && f.name == data.name
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "A folder named '{}' already exists in this directory",
                data.name
            )));
        }

        let folder = Folder {
            id: FolderId::new(),
            name: data.name.clone(),
            parent_id: data.parent_id,
            path: data.path.clone(),
            owner: data.owner.clone(),
            created_at: Utc::now(),
        };
        rows.insert(folder.id, folder.clone());
        Ok(folder)
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_children(
        &self,
        parent: Option<FolderId>,
        owner: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        let rows = self.rows.lock().await;
        let mut children: Vec<Folder> = rows
            .values()
            .filter(|f| f.parent_id == parent)
            .filter(|f| owner.is_none_or(|o| f.owner.as_deref() == Some(o)))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children.truncate(FIND_MANY_LIMIT as usize);
        Ok(children)
    }

    async fn find_sibling(
        &self,
        parent: Option<FolderId>,
        owner: &str,
        name: &str,
        exclude: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        let rows = self.rows.lock().await;
        Ok(rows
            .values()
            .find(|f| {
                f.parent_id == parent
                    && f.owner.as_deref() == Some(owner)
                    && f.name == name
                    && exclude != Some(f.id)
            })
            .cloned())
    }

    async fn update_placement(
        &self,
        id: FolderId,
        parent: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<Folder>> {
        let mut rows = self.rows.lock().await;
        Ok(rows.get_mut(&id).map(|f| {
            f.parent_id = parent;
            f.path = path.to_string();
            f.clone()
        }))
    }

    async fn update_path(&self, id: FolderId, path: &str) -> AppResult<bool> {
        let mut rows = self.rows.lock().await;
        Ok(rows
            .get_mut(&id)
            .map(|f| f.path = path.to_string())
            .is_some())
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        Ok(self.rows.lock().await.remove(&id).is_some())
    }
}

/// In-memory file store backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileStore {
    rows: Arc<Mutex<HashMap<FileId, File>>>,
}

impl MemoryFileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileStore for MemoryFileStore {
    async fn insert(&self, data: &CreateFile) -> AppResult<File> {
        let file = File {
            id: FileId::new(),
            filename: data.filename.clone(),
            size: data.size,
            content_type: data.content_type.clone(),
            object_key: data.object_key.clone(),
            folder_id: data.folder_id,
            path: data.path.clone(),
            owner: data.owner.clone(),
            uploaded_at: Utc::now(),
        };
        self.rows.lock().await.insert(file.id, file.clone());
        Ok(file)
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        Ok(self.rows.lock().await.get(&id).cloned())
    }

    async fn find_many(
        &self,
        scope: FolderScope,
        owner: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<File>> {
        let needle = search.map(str::to_lowercase);
        let rows = self.rows.lock().await;
        let mut files: Vec<File> = rows
            .values()
            .filter(|f| match scope {
                FolderScope::Any => true,
                FolderScope::Root => f.folder_id.is_none(),
                FolderScope::In(folder) => f.folder_id == Some(folder),
            })
            .filter(|f| owner.is_none_or(|o| f.owner.as_deref() == Some(o)))
            .filter(|f| {
                needle
                    .as_deref()
                    .is_none_or(|n| f.filename.to_lowercase().contains(n))
            })
            .cloned()
            .collect();
        files.sort_by(|a, b| a.filename.cmp(&b.filename));
        files.truncate(FIND_MANY_LIMIT as usize);
        Ok(files)
    }

    async fn update_name(&self, id: FileId, filename: &str) -> AppResult<Option<File>> {
        let mut rows = self.rows.lock().await;
        Ok(rows.get_mut(&id).map(|f| {
            f.filename = filename.to_string();
            f.clone()
        }))
    }

    async fn update_placement(
        &self,
        id: FileId,
        folder: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<File>> {
        let mut rows = self.rows.lock().await;
        Ok(rows.get_mut(&id).map(|f| {
            f.folder_id = folder;
            f.path = path.to_string();
            f.clone()
        }))
    }

    async fn update_paths_in_folder(&self, folder: FolderId, path: &str) -> AppResult<()> {
        let mut rows = self.rows.lock().await;
        for f in rows.values_mut() {
            if f.folder_id == Some(folder) {
                f.path = path.to_string();
            }
        }
        Ok(())
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        Ok(self.rows.lock().await.remove(&id).is_some())
    }
}

/// In-memory user store backed by a map keyed on username.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserStore {
    rows: Arc<Mutex<HashMap<String, User>>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, data: &CreateUser) -> AppResult<User> {
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&data.username) {
            return Err(AppError::conflict("Username already taken"));
        }
        let user = User {
            id: UserId::new(),
            username: data.username.clone(),
            password_hash: data.password_hash.clone(),
            role: data.role,
            created_at: Utc::now(),
        };
        rows.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(self.rows.lock().await.get(username).cloned())
    }
}
