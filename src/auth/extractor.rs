use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;

use crate::error::ApiError;
use crate::models::User;
use crate::AppState;

use super::db::user_from_token;

/// Extractor for endpoints that require an authenticated user.
/// Rejects with 401 when the bearer token is missing or invalid.
pub struct AuthUser(pub User);

/// Extractor for endpoints that personalize output but remain readable
/// anonymously. A missing or invalid token yields `None`, never an error.
pub struct MaybeAuthUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(ApiError::Unauthorized)?.to_string();
        let mut conn = state.get()?;
        let user = user_from_token(&mut conn, &token).ok_or(ApiError::Unauthorized)?;
        Ok(AuthUser(user))
    }
}

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts).map(str::to_string) else {
            return Ok(MaybeAuthUser(None));
        };
        let mut conn = state.get()?;
        Ok(MaybeAuthUser(user_from_token(&mut conn, &token)))
    }
}
