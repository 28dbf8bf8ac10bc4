//! Folder CRUD, content listing, move, and copy handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use uuid::Uuid;

use drivebox_core::types::FolderId;
use drivebox_entity::Folder;
use drivebox_service::folder::service::CreateFolderRequest as SvcCreateFolder;
use drivebox_service::{FolderContent, FolderRef};

use crate::dto::request::{
    CopyFolderRequest, CreateFolderRequest, ListFoldersQuery, MoveFolderRequest,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Parse an optional destination reference, collapsing `"root"` to None.
fn parse_parent(value: Option<&str>) -> Result<Option<FolderId>, ApiError> {
    Ok(FolderRef::parse_opt(value)?.and_then(|r| r.folder_id()))
}

/// POST /api/folders
pub async fn create_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), ApiError> {
    let parent_id = parse_parent(req.parent_folder_id.as_deref())?;
    let folder = state
        .folder_service
        .create_folder(
            &auth,
            SvcCreateFolder {
                name: req.name,
                parent_id,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/folders?parent_folder_id=...
pub async fn list_folders(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFoldersQuery>,
) -> Result<Json<Vec<Folder>>, ApiError> {
    let parent = FolderRef::parse_opt(query.parent_folder_id.as_deref())?;
    let folders = state.folder_service.list_folders(&auth, parent).await?;
    Ok(Json(folders))
}

/// GET /api/folders/{id}
pub async fn get_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Folder>, ApiError> {
    let folder = state
        .folder_service
        .get_folder(&auth, FolderId::from_uuid(id))
        .await?;
    Ok(Json(folder))
}

/// GET /api/folders/{id}/content — `{id}` may be `"root"`.
pub async fn folder_content(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<FolderContent>, ApiError> {
    let target = FolderRef::parse(&id)?;
    let content = state.folder_service.folder_content(&auth, target).await?;
    Ok(Json(content))
}

/// DELETE /api/folders/{id}
pub async fn delete_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .folder_service
        .delete_folder(&auth, FolderId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/folders/{id}/move
pub async fn move_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFolderRequest>,
) -> Result<Json<Folder>, ApiError> {
    let new_parent = parse_parent(req.parent_folder_id.as_deref())?;
    let folder = state
        .folder_service
        .move_folder(&auth, FolderId::from_uuid(id), new_parent)
        .await?;
    Ok(Json(folder))
}

/// POST /api/folders/{id}/copy
pub async fn copy_folder(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CopyFolderRequest>,
) -> Result<(StatusCode, Json<Folder>), ApiError> {
    let dest_parent = parse_parent(req.parent_folder_id.as_deref())?;
    let folder = state
        .folder_service
        .copy_folder(&auth, FolderId::from_uuid(id), dest_parent)
        .await?;
    Ok((StatusCode::CREATED, Json(folder)))
}
