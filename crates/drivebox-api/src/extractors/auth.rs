//! `AuthUser` extractor — pulls the JWT from the Authorization header,
//! verifies it, and injects the acting principal.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use drivebox_core::error::AppError;
use drivebox_service::Principal;

use crate::error::ApiError;
use crate::state::AppState;

/// Extracted authenticated principal available in handlers.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl std::ops::Deref for AuthUser {
    type Target = Principal;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let claims = state.token_codec.verify(token)?;

        Ok(AuthUser(Principal::new(claims.sub, claims.role.is_admin())))
    }
}
