//! File CRUD: listing, rename, delete, move, copy.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use drivebox_core::traits::ObjectStore;
use drivebox_core::types::{FileId, FolderId};
use drivebox_core::{AppError, AppResult};
use drivebox_database::store::{FileStore, FolderScope, FolderStore};
use drivebox_entity::file::{CreateFile, File};
use drivebox_entity::validate::validate_file_name;

use crate::context::Principal;
use crate::guard;
use crate::selector::FolderRef;

/// Manages file metadata CRUD and blob lifecycle for single files.
#[derive(Clone)]
pub struct FileService {
    /// File metadata store.
    files: Arc<dyn FileStore>,
    /// Folder metadata store (destination lookups).
    folders: Arc<dyn FolderStore>,
    /// Blob store.
    objects: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for FileService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileService").finish()
    }
}

impl FileService {
    /// Creates a new file service.
    pub fn new(
        files: Arc<dyn FileStore>,
        folders: Arc<dyn FolderStore>,
        objects: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            files,
            folders,
            objects,
        }
    }

    /// Lists files, optionally constrained to a folder (or the root level)
    /// and filtered by a case-insensitive filename substring.
    ///
    /// With no folder reference, files from everywhere are returned.
    pub async fn list_files(
        &self,
        principal: &Principal,
        folder: Option<FolderRef>,
        search: Option<&str>,
    ) -> AppResult<Vec<File>> {
        let scope = match folder {
            None => FolderScope::Any,
            Some(FolderRef::Root) => FolderScope::Root,
            Some(FolderRef::Folder(id)) => FolderScope::In(id),
        };
        self.files
            .find_many(scope, principal.owner_filter(), search)
            .await
    }

    /// Gets a file by ID.
    pub async fn get_file(&self, principal: &Principal, file_id: FileId) -> AppResult<File> {
        guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )
    }

    /// Renames a file.
    pub async fn rename_file(
        &self,
        principal: &Principal,
        file_id: FileId,
        new_filename: &str,
    ) -> AppResult<File> {
        let filename = validate_file_name(new_filename)?;

        guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )?;

        let updated = self
            .files
            .update_name(file_id, &filename)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(
            owner = %principal.username,
            file_id = %file_id,
            filename = %updated.filename,
            "File renamed"
        );

        Ok(updated)
    }

    /// Deletes a file: blob first, then the metadata row.
    ///
    /// If the blob deletion fails the row is left intact, so a retry can
    /// still reach the blob through it.
    pub async fn delete_file(&self, principal: &Principal, file_id: FileId) -> AppResult<()> {
        let file = guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )?;

        self.objects.remove(&file.object_key).await?;
        self.files.delete(file_id).await?;

        info!(
            owner = %principal.username,
            file_id = %file_id,
            filename = %file.filename,
            "File deleted"
        );

        Ok(())
    }

    /// Moves a file into a folder (None = root).
    pub async fn move_file(
        &self,
        principal: &Principal,
        file_id: FileId,
        dest: Option<FolderId>,
    ) -> AppResult<File> {
        guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )?;

        let (folder_id, path) = self.resolve_destination(principal, dest).await?;

        let updated = self
            .files
            .update_placement(file_id, folder_id, &path)
            .await?
            .ok_or_else(|| AppError::not_found("File not found"))?;

        info!(
            owner = %principal.username,
            file_id = %file_id,
            path = %updated.path,
            "File moved"
        );

        Ok(updated)
    }

    /// Copies a file into a folder (None = root): the blob is duplicated
    /// server-side under a fresh object key, then a new row is inserted.
    /// No metadata row exists until the blob copy has succeeded.
    pub async fn copy_file(
        &self,
        principal: &Principal,
        file_id: FileId,
        dest: Option<FolderId>,
    ) -> AppResult<File> {
        let source = guard::authorize(
            self.files.find_by_id(file_id).await?,
            principal,
            "File not found",
        )?;

        let (folder_id, path) = self.resolve_destination(principal, dest).await?;

        let object_key = format!("{}-{}", Uuid::new_v4(), source.filename);
        self.objects.copy(&source.object_key, &object_key).await?;

        let copy = self
            .files
            .insert(&CreateFile {
                filename: source.filename.clone(),
                size: source.size,
                content_type: source.content_type.clone(),
                object_key,
                folder_id,
                path,
                owner: Some(principal.username.clone()),
            })
            .await?;

        info!(
            owner = %principal.username,
            source_id = %file_id,
            file_id = %copy.id,
            path = %copy.path,
            "File copied"
        );

        Ok(copy)
    }

    /// Resolve an optional destination folder into its ID and path.
    async fn resolve_destination(
        &self,
        principal: &Principal,
        dest: Option<FolderId>,
    ) -> AppResult<(Option<FolderId>, String)> {
        match dest {
            Some(dest_id) => {
                let folder = guard::authorize(
                    self.folders.find_by_id(dest_id).await?,
                    principal,
                    "Destination folder not found",
                )?;
                Ok((Some(dest_id), folder.path))
            }
            None => Ok((None, "/".to_string())),
        }
    }
}
