//! Folder CRUD and the recursive tree operations.
//!
//! Move re-stamps the materialized path of every descendant; delete
//! cascades depth-first and removes blobs before metadata; copy is a deep
//! copy that tolerates individual file failures but aborts on folder-row
//! failures. None of the recursive operations is transactional: a failure
//! partway leaves a partially-deleted subtree or stale descendant paths,
//! and callers retry (already-removed children are simply absent).

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use drivebox_core::traits::ObjectStore;
use drivebox_core::types::FolderId;
use drivebox_core::{AppError, AppResult};
use drivebox_database::store::{FileStore, FolderScope, FolderStore};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::folder::{CreateFolder, Folder};
use drivebox_entity::validate::validate_folder_name;

use crate::context::Principal;
use crate::guard;
use crate::paths::child_path;
use crate::selector::FolderRef;

/// Maximum supported folder nesting. Guards every recursive walk against
/// pathological trees and against cycles that slipped past validation.
const MAX_TREE_DEPTH: usize = 128;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Request to create a new folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFolderRequest {
    /// Folder name.
    pub name: String,
    /// Parent folder ID (None for root-level).
    pub parent_id: Option<FolderId>,
}

/// Non-recursive listing of a folder's direct children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderContent {
    /// Direct child folders.
    pub folders: Vec<Folder>,
    /// Direct child files.
    pub files: Vec<File>,
    /// The requested folder reference, echoed back (`"root"` or a UUID).
    pub folder_id: String,
    /// Total number of direct children.
    pub total_items: usize,
}

/// Manages folder CRUD and the recursive tree operations.
#[derive(Clone)]
pub struct FolderService {
    /// Folder metadata store.
    folders: Arc<dyn FolderStore>,
    /// File metadata store (cascade and copy touch files too).
    files: Arc<dyn FileStore>,
    /// Blob store.
    objects: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for FolderService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FolderService").finish()
    }
}

impl FolderService {
    /// Creates a new folder service.
    pub fn new(
        folders: Arc<dyn FolderStore>,
        files: Arc<dyn FileStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            folders,
            files,
            objects,
        }
    }

    /// Creates a new folder under an optional parent.
    pub async fn create_folder(
        &self,
        principal: &Principal,
        req: CreateFolderRequest,
    ) -> AppResult<Folder> {
        let name = validate_folder_name(&req.name)?;

        let parent_path = match req.parent_id {
            Some(parent_id) => {
                let parent = guard::authorize(
                    self.folders.find_by_id(parent_id).await?,
                    principal,
                    "Parent folder not found",
                )?;
                parent.path
            }
            None => "/".to_string(),
        };

        if self
            .folders
            .find_sibling(req.parent_id, &principal.username, &name, None)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A folder named '{name}' already exists in this directory"
            )));
        }

        let folder = self
            .folders
            .insert(&CreateFolder {
                path: child_path(&parent_path, &name),
                name,
                parent_id: req.parent_id,
                owner: Some(principal.username.clone()),
            })
            .await?;

        info!(
            owner = %principal.username,
            folder_id = %folder.id,
            path = %folder.path,
            "Folder created"
        );

        Ok(folder)
    }

    /// Lists folders at a level: the root (default) or under a parent.
    pub async fn list_folders(
        &self,
        principal: &Principal,
        parent: Option<FolderRef>,
    ) -> AppResult<Vec<Folder>> {
        let parent_id = parent.and_then(|p| p.folder_id());
        self.folders
            .find_children(parent_id, principal.owner_filter())
            .await
    }

    /// Gets a folder by ID.
    pub async fn get_folder(
        &self,
        principal: &Principal,
        folder_id: FolderId,
    ) -> AppResult<Folder> {
        guard::authorize(
            self.folders.find_by_id(folder_id).await?,
            principal,
            "Folder not found",
        )
    }

    /// Lists the direct children (folders and files) of a folder or of the
    /// root level.
    pub async fn folder_content(
        &self,
        principal: &Principal,
        target: FolderRef,
    ) -> AppResult<FolderContent> {
        let parent_id = target.folder_id();
        let owner = principal.owner_filter();

        let folders = self.folders.find_children(parent_id, owner).await?;
        let scope = match parent_id {
            Some(id) => FolderScope::In(id),
            None => FolderScope::Root,
        };
        let files = self.files.find_many(scope, owner, None).await?;

        let folder_id = match target {
            FolderRef::Root => "root".to_string(),
            FolderRef::Folder(id) => id.to_string(),
        };

        Ok(FolderContent {
            total_items: folders.len() + files.len(),
            folders,
            files,
            folder_id,
        })
    }

    /// Deletes a folder and everything transitively inside it.
    ///
    /// Depth-first: blobs and file rows go first, then subfolders, then the
    /// folder's own row. Any blob failure aborts the remainder; retrying is
    /// safe because already-deleted children are simply gone.
    pub async fn delete_folder(
        &self,
        principal: &Principal,
        folder_id: FolderId,
    ) -> AppResult<()> {
        self.delete_recursive(principal, folder_id, 0).await
    }

    fn delete_recursive<'a>(
        &'a self,
        principal: &'a Principal,
        folder_id: FolderId,
        depth: usize,
    ) -> BoxFuture<'a, AppResult<()>> {
        Box::pin(async move {
            if depth > MAX_TREE_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum supported depth",
                ));
            }

            let folder = guard::authorize(
                self.folders.find_by_id(folder_id).await?,
                principal,
                "Folder not found",
            )?;

            let files = self
                .files
                .find_many(FolderScope::In(folder_id), None, None)
                .await?;
            for file in files {
                self.objects.remove(&file.object_key).await?;
                self.files.delete(file.id).await?;
            }

            let subfolders = self.folders.find_children(Some(folder_id), None).await?;
            for sub in subfolders {
                self.delete_recursive(principal, sub.id, depth + 1).await?;
            }

            self.folders.delete(folder_id).await?;

            info!(
                owner = %principal.username,
                folder_id = %folder_id,
                path = %folder.path,
                "Folder deleted"
            );

            Ok(())
        })
    }

    /// Moves a folder to a new parent (None = root) and re-stamps the
    /// materialized path of every descendant.
    pub async fn move_folder(
        &self,
        principal: &Principal,
        folder_id: FolderId,
        new_parent: Option<FolderId>,
    ) -> AppResult<Folder> {
        let folder = guard::authorize(
            self.folders.find_by_id(folder_id).await?,
            principal,
            "Folder not found",
        )?;

        let new_parent_path = match new_parent {
            Some(dest_id) => {
                if dest_id == folder_id {
                    return Err(AppError::validation(
                        "Cannot move a folder into itself",
                    ));
                }
                let dest = guard::authorize(
                    self.folders.find_by_id(dest_id).await?,
                    principal,
                    "Destination folder not found",
                )?;
                self.ensure_not_descendant(folder_id, &dest).await?;
                dest.path
            }
            None => "/".to_string(),
        };

        if self
            .folders
            .find_sibling(new_parent, &principal.username, &folder.name, Some(folder_id))
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "A folder named '{}' already exists at the destination",
                folder.name
            )));
        }

        let new_path = child_path(&new_parent_path, &folder.name);

        let updated = self
            .folders
            .update_placement(folder_id, new_parent, &new_path)
            .await?
            .ok_or_else(|| AppError::not_found("Folder not found"))?;

        self.restamp_subtree(folder_id, &new_path, 0).await?;

        info!(
            owner = %principal.username,
            folder_id = %folder_id,
            path = %updated.path,
            "Folder moved"
        );

        Ok(updated)
    }

    /// Reject a destination that sits inside the folder being moved.
    ///
    /// Walks the destination's ancestor chain; together with the direct
    /// self-check this keeps parent chains acyclic.
    async fn ensure_not_descendant(
        &self,
        folder_id: FolderId,
        dest: &Folder,
    ) -> AppResult<()> {
        let mut current = dest.parent_id;
        let mut hops = 0;
        while let Some(ancestor_id) = current {
            if ancestor_id == folder_id {
                return Err(AppError::validation(
                    "Cannot move a folder into its own subtree",
                ));
            }
            hops += 1;
            if hops > MAX_TREE_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum supported depth",
                ));
            }
            current = self
                .folders
                .find_by_id(ancestor_id)
                .await?
                .and_then(|f| f.parent_id);
        }
        Ok(())
    }

    /// Re-stamp paths below a folder whose own path just changed.
    ///
    /// Files directly inside get the folder's path wholesale; each
    /// subfolder gets its own recomputed path and recurses.
    fn restamp_subtree<'a>(
        &'a self,
        folder_id: FolderId,
        new_path: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, AppResult<()>> {
        Box::pin(async move {
            if depth > MAX_TREE_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum supported depth",
                ));
            }

            self.files
                .update_paths_in_folder(folder_id, new_path)
                .await?;

            let subfolders = self.folders.find_children(Some(folder_id), None).await?;
            for sub in subfolders {
                let sub_path = child_path(new_path, &sub.name);
                self.folders.update_path(sub.id, &sub_path).await?;
                self.restamp_subtree(sub.id, &sub_path, depth + 1).await?;
            }

            Ok(())
        })
    }

    /// Deep-copies a folder (and its whole subtree) under a new parent
    /// (None = root).
    ///
    /// The new top-level folder gets a collision-free name by probing
    /// `name`, `name (1)`, `name (2)`, … Individual file copies that fail
    /// are skipped with a warning; a folder-row failure aborts the rest.
    pub async fn copy_folder(
        &self,
        principal: &Principal,
        folder_id: FolderId,
        dest_parent: Option<FolderId>,
    ) -> AppResult<Folder> {
        let source = guard::authorize(
            self.folders.find_by_id(folder_id).await?,
            principal,
            "Folder not found",
        )?;

        let dest_parent_path = match dest_parent {
            Some(dest_id) => {
                let dest = guard::authorize(
                    self.folders.find_by_id(dest_id).await?,
                    principal,
                    "Destination folder not found",
                )?;
                dest.path
            }
            None => "/".to_string(),
        };

        let name = self
            .unique_copy_name(dest_parent, &principal.username, &source.name)
            .await?;

        let created = self
            .folders
            .insert(&CreateFolder {
                path: child_path(&dest_parent_path, &name),
                name,
                parent_id: dest_parent,
                owner: Some(principal.username.clone()),
            })
            .await?;

        self.copy_contents(principal, source.id, created.id, &created.path, 0)
            .await?;

        info!(
            owner = %principal.username,
            source_id = %source.id,
            folder_id = %created.id,
            path = %created.path,
            "Folder copied"
        );

        Ok(created)
    }

    /// Probe sibling names at the destination until one is free.
    async fn unique_copy_name(
        &self,
        parent: Option<FolderId>,
        owner: &str,
        base: &str,
    ) -> AppResult<String> {
        let mut candidate = base.to_string();
        let mut counter = 1;
        while self
            .folders
            .find_sibling(parent, owner, &candidate, None)
            .await?
            .is_some()
        {
            candidate = format!("{base} ({counter})");
            counter += 1;
        }
        Ok(candidate)
    }

    fn copy_contents<'a>(
        &'a self,
        principal: &'a Principal,
        source_id: FolderId,
        dest_id: FolderId,
        dest_path: &'a str,
        depth: usize,
    ) -> BoxFuture<'a, AppResult<()>> {
        Box::pin(async move {
            if depth > MAX_TREE_DEPTH {
                return Err(AppError::internal(
                    "Folder tree exceeds maximum supported depth",
                ));
            }

            let files = self
                .files
                .find_many(FolderScope::In(source_id), None, None)
                .await?;
            for file in files {
                // Per-file failures are tolerated; the rest of the copy
                // proceeds. Folder-row failures below still abort.
                if let Err(error) = self
                    .copy_file_into(principal, &file, dest_id, dest_path)
                    .await
                {
                    warn!(
                        file_id = %file.id,
                        filename = %file.filename,
                        %error,
                        "Skipping file during folder copy"
                    );
                }
            }

            let subfolders = self.folders.find_children(Some(source_id), None).await?;
            for sub in subfolders {
                let created = self
                    .folders
                    .insert(&CreateFolder {
                        name: sub.name.clone(),
                        parent_id: Some(dest_id),
                        path: child_path(dest_path, &sub.name),
                        owner: Some(principal.username.clone()),
                    })
                    .await?;
                self.copy_contents(principal, sub.id, created.id, &created.path, depth + 1)
                    .await?;
            }

            Ok(())
        })
    }

    /// Duplicate one file's blob and metadata into a destination folder.
    async fn copy_file_into(
        &self,
        principal: &Principal,
        file: &File,
        dest_id: FolderId,
        dest_path: &str,
    ) -> AppResult<File> {
        let object_key = format!("{}-{}", Uuid::new_v4(), file.filename);
        self.objects.copy(&file.object_key, &object_key).await?;

        self.files
            .insert(&CreateFile {
                filename: file.filename.clone(),
                size: file.size,
                content_type: file.content_type.clone(),
                object_key,
                folder_id: Some(dest_id),
                path: dest_path.to_string(),
                owner: Some(principal.username.clone()),
            })
            .await
    }
}
