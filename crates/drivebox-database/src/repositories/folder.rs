//! Folder repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::types::FolderId;
use drivebox_entity::folder::{CreateFolder, Folder};

use crate::store::{FIND_MANY_LIMIT, FolderStore};

/// Repository for folder CRUD and sibling queries.
#[derive(Debug, Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new folder repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn insert(&self, data: &CreateFolder) -> AppResult<Folder> {
        sqlx::query_as::<_, Folder>(
            "INSERT INTO folders (name, parent_id, path, owner) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.name)
        .bind(data.parent_id)
        .bind(&data.path)
        .bind(&data.owner)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("folders_owner_parent_name_key") =>
            {
                AppError::conflict(format!(
                    "A folder named '{}' already exists in this directory",
                    data.name
                ))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create folder", e),
        })
    }

    async fn find_by_id(&self, id: FolderId) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>("SELECT * FROM folders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find folder", e))
    }

    async fn find_children(
        &self,
        parent: Option<FolderId>,
        owner: Option<&str>,
    ) -> AppResult<Vec<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE parent_id IS NOT DISTINCT FROM $1 \
               AND ($2::text IS NULL OR owner = $2) \
             ORDER BY name ASC LIMIT $3",
        )
        .bind(parent)
        .bind(owner)
        .bind(FIND_MANY_LIMIT)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list folders", e))
    }

    async fn find_sibling(
        &self,
        parent: Option<FolderId>,
        owner: &str,
        name: &str,
        exclude: Option<FolderId>,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "SELECT * FROM folders \
             WHERE parent_id IS NOT DISTINCT FROM $1 \
               AND owner = $2 AND name = $3 \
               AND ($4::uuid IS NULL OR id <> $4)",
        )
        .bind(parent)
        .bind(owner)
        .bind(name)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find sibling", e))
    }

    async fn update_placement(
        &self,
        id: FolderId,
        parent: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<Folder>> {
        sqlx::query_as::<_, Folder>(
            "UPDATE folders SET parent_id = $2, path = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(parent)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move folder", e))
    }

    async fn update_path(&self, id: FolderId, path: &str) -> AppResult<bool> {
        let result = sqlx::query("UPDATE folders SET path = $2 WHERE id = $1")
            .bind(id)
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update folder path", e)
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: FolderId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM folders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete folder", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
