//! File repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use drivebox_core::error::{AppError, ErrorKind};
use drivebox_core::result::AppResult;
use drivebox_core::types::{FileId, FolderId};
use drivebox_entity::file::{CreateFile, File};

use crate::store::{FIND_MANY_LIMIT, FileStore, FolderScope};

/// Repository for file metadata CRUD and filtered listings.
#[derive(Debug, Clone)]
pub struct FileRepository {
    pool: PgPool,
}

impl FileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Turn a raw search term into an ILIKE pattern, escaping wildcards.
fn ilike_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl FileStore for FileRepository {
    async fn insert(&self, data: &CreateFile) -> AppResult<File> {
        sqlx::query_as::<_, File>(
            "INSERT INTO files (filename, size, content_type, object_key, folder_id, path, owner) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(&data.filename)
        .bind(data.size)
        .bind(&data.content_type)
        .bind(&data.object_key)
        .bind(data.folder_id)
        .bind(&data.path)
        .bind(&data.owner)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create file", e))
    }

    async fn find_by_id(&self, id: FileId) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("SELECT * FROM files WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn find_many(
        &self,
        scope: FolderScope,
        owner: Option<&str>,
        search: Option<&str>,
    ) -> AppResult<Vec<File>> {
        let pattern = search.map(ilike_pattern);

        let query = match scope {
            FolderScope::Any => sqlx::query_as::<_, File>(
                "SELECT * FROM files \
                 WHERE ($1::text IS NULL OR owner = $1) \
                   AND ($2::text IS NULL OR filename ILIKE $2) \
                 ORDER BY filename ASC LIMIT $3",
            )
            .bind(owner)
            .bind(pattern)
            .bind(FIND_MANY_LIMIT),
            FolderScope::Root => sqlx::query_as::<_, File>(
                "SELECT * FROM files \
                 WHERE folder_id IS NULL \
                   AND ($1::text IS NULL OR owner = $1) \
                   AND ($2::text IS NULL OR filename ILIKE $2) \
                 ORDER BY filename ASC LIMIT $3",
            )
            .bind(owner)
            .bind(pattern)
            .bind(FIND_MANY_LIMIT),
            FolderScope::In(folder) => sqlx::query_as::<_, File>(
                "SELECT * FROM files \
                 WHERE folder_id = $1 \
                   AND ($2::text IS NULL OR owner = $2) \
                   AND ($3::text IS NULL OR filename ILIKE $3) \
                 ORDER BY filename ASC LIMIT $4",
            )
            .bind(folder)
            .bind(owner)
            .bind(pattern)
            .bind(FIND_MANY_LIMIT),
        };

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn update_name(&self, id: FileId, filename: &str) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>("UPDATE files SET filename = $2 WHERE id = $1 RETURNING *")
            .bind(id)
            .bind(filename)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to rename file", e))
    }

    async fn update_placement(
        &self,
        id: FileId,
        folder: Option<FolderId>,
        path: &str,
    ) -> AppResult<Option<File>> {
        sqlx::query_as::<_, File>(
            "UPDATE files SET folder_id = $2, path = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(folder)
        .bind(path)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move file", e))
    }

    async fn update_paths_in_folder(&self, folder: FolderId, path: &str) -> AppResult<()> {
        sqlx::query("UPDATE files SET path = $2 WHERE folder_id = $1")
            .bind(folder)
            .bind(path)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update file paths", e)
            })?;
        Ok(())
    }

    async fn delete(&self, id: FileId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete file", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::ilike_pattern;

    #[test]
    fn test_ilike_pattern_escapes_wildcards() {
        assert_eq!(ilike_pattern("report"), "%report%");
        assert_eq!(ilike_pattern("100%"), "%100\\%%");
        assert_eq!(ilike_pattern("a_b"), "%a\\_b%");
    }
}
