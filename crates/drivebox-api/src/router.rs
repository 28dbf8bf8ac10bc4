//! Route definitions for the Drivebox HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The router
//! receives `AppState` and passes it to all handlers via axum's `State`
//! extractor.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    // Slack above the engine's upload cap so oversized uploads reach the
    // engine's own validation instead of dying at the framing layer.
    let max_body = state.config.storage.max_upload_size_bytes as usize + 64 * 1024;

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(folder_routes())
        .merge(file_routes())
        .route("/health", get(handlers::health::health));

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Auth endpoints: register, login, me.
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/me", get(handlers::auth::me))
}

/// Folder CRUD, content listing, move, copy.
fn folder_routes() -> Router<AppState> {
    Router::new()
        .route("/folders", post(handlers::folder::create_folder))
        .route("/folders", get(handlers::folder::list_folders))
        .route("/folders/{id}", get(handlers::folder::get_folder))
        .route("/folders/{id}", delete(handlers::folder::delete_folder))
        .route("/folders/{id}/content", get(handlers::folder::folder_content))
        .route("/folders/{id}/move", put(handlers::folder::move_folder))
        .route("/folders/{id}/copy", post(handlers::folder::copy_folder))
}

/// File upload, listing, download, rename, delete, move, copy.
fn file_routes() -> Router<AppState> {
    Router::new()
        .route("/files/upload", post(handlers::file::upload_file))
        .route("/files", get(handlers::file::list_files))
        .route("/files/{id}", get(handlers::file::get_file))
        .route("/files/{id}", delete(handlers::file::delete_file))
        .route("/files/download/{id}", get(handlers::file::download_file))
        .route("/files/{id}/rename", put(handlers::file::rename_file))
        .route("/files/{id}/move", put(handlers::file::move_file))
        .route("/files/{id}/copy", post(handlers::file::copy_file))
}
