//! Registration, login, and identity handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use drivebox_auth::jwt::AccessToken;
use drivebox_auth::{hash_password, verify_password};
use drivebox_core::AppError;
use drivebox_database::store::UserStore;
use drivebox_entity::user::{CreateUser, UserRole};

use crate::dto::request::{LoginRequest, RegisterRequest};
use crate::dto::response::UserResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AccessToken>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let password_hash = hash_password(&req.password)?;
    let user = state
        .users
        .insert(&CreateUser {
            username: req.username,
            password_hash,
            role: UserRole::User,
        })
        .await?;

    tracing::info!(username = %user.username, "User registered");

    let token = state.token_codec.issue(&user.username, user.role)?;
    Ok(Json(token))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AccessToken>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(|| AppError::authentication("Invalid credentials"))?;

    if !verify_password(&req.password, &user.password_hash)? {
        return Err(AppError::authentication("Invalid credentials").into());
    }

    let token = state.token_codec.issue(&user.username, user.role)?;
    Ok(Json(token))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .users
        .find_by_username(&auth.username)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(user.into()))
}
