//! File upload, listing, download, rename, delete, move, and copy handlers.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use uuid::Uuid;

use drivebox_core::AppError;
use drivebox_core::types::{FileId, FolderId};
use drivebox_entity::File;
use drivebox_service::{FolderRef, UploadParams};

use crate::dto::request::{
    CopyFileRequest, DownloadQuery, ListFilesQuery, MoveFileRequest, RenameFileRequest,
};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// Content types eligible for inline display on download.
const INLINE_CONTENT_TYPES: &[&str] = &[
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/svg+xml",
];

/// Parse an optional destination reference, collapsing `"root"` to None.
fn parse_destination(value: Option<&str>) -> Result<Option<FolderId>, ApiError> {
    Ok(FolderRef::parse_opt(value)?.and_then(|r| r.folder_id()))
}

/// POST /api/files/upload — multipart with a `file` part and an optional
/// `folder_id` part.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<File>), ApiError> {
    let mut filename: Option<String> = None;
    let mut content_type: Option<String> = None;
    let mut data: Option<bytes::Bytes> = None;
    let mut folder_ref: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("file") => {
                filename = field.file_name().map(str::to_string);
                content_type = field.content_type().map(str::to_string);
                data = Some(field.bytes().await.map_err(|e| {
                    AppError::validation(format!("Failed to read upload body: {e}"))
                })?);
            }
            Some("folder_id") => {
                let value = field.text().await.map_err(|e| {
                    AppError::validation(format!("Failed to read folder_id: {e}"))
                })?;
                if !value.is_empty() {
                    folder_ref = Some(value);
                }
            }
            _ => {}
        }
    }

    let data = data.ok_or_else(|| AppError::validation("Missing 'file' field"))?;
    let filename = filename.ok_or_else(|| AppError::validation("The file must have a name"))?;
    let folder_id = parse_destination(folder_ref.as_deref())?;

    let file = state
        .upload_service
        .upload(
            &auth,
            UploadParams {
                filename,
                content_type,
                folder_id,
                data,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(file)))
}

/// GET /api/files?folder_id=...&search=...
pub async fn list_files(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<Vec<File>>, ApiError> {
    let folder = FolderRef::parse_opt(query.folder_id.as_deref())?;
    let files = state
        .file_service
        .list_files(&auth, folder, query.search.as_deref())
        .await?;
    Ok(Json(files))
}

/// GET /api/files/{id}
pub async fn get_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<File>, ApiError> {
    let file = state
        .file_service
        .get_file(&auth, FileId::from_uuid(id))
        .await?;
    Ok(Json(file))
}

/// GET /api/files/download/{id}?inline=true
///
/// Streams the blob. `inline` disposition is honored only for a small
/// whitelist of displayable content types; everything else downloads as
/// an attachment.
pub async fn download_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Query(query): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let result = state
        .download_service
        .download(&auth, FileId::from_uuid(id))
        .await?;
    let file = &result.file;

    let disposition = if query.inline && INLINE_CONTENT_TYPES.contains(&file.content_type.as_str())
    {
        format!("inline; filename=\"{}\"", file.filename)
    } else {
        format!("attachment; filename=\"{}\"", file.filename)
    };

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, file.content_type.as_str())
        .header(header::CONTENT_LENGTH, file.size.to_string())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from_stream(result.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))?;

    Ok(response)
}

/// PUT /api/files/{id}/rename
pub async fn rename_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<RenameFileRequest>,
) -> Result<Json<File>, ApiError> {
    let file = state
        .file_service
        .rename_file(&auth, FileId::from_uuid(id), &req.new_filename)
        .await?;
    Ok(Json(file))
}

/// DELETE /api/files/{id}
pub async fn delete_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .file_service
        .delete_file(&auth, FileId::from_uuid(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/files/{id}/move
pub async fn move_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveFileRequest>,
) -> Result<Json<File>, ApiError> {
    let dest = parse_destination(req.folder_id.as_deref())?;
    let file = state
        .file_service
        .move_file(&auth, FileId::from_uuid(id), dest)
        .await?;
    Ok(Json(file))
}

/// POST /api/files/{id}/copy
pub async fn copy_file(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<CopyFileRequest>,
) -> Result<(StatusCode, Json<File>), ApiError> {
    let dest = parse_destination(req.folder_id.as_deref())?;
    let file = state
        .file_service
        .copy_file(&auth, FileId::from_uuid(id), dest)
        .await?;
    Ok((StatusCode::CREATED, Json(file)))
}
