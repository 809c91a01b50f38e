use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schema::users;
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetAvatarRequest {
    /// Opaque image reference (URL or storage key)
    pub avatar: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SetAvatarResponse {
    pub avatar: String,
}

#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    tag = "users",
    request_body = SetAvatarRequest,
    responses(
        (status = 200, description = "Avatar updated", body = SetAvatarResponse),
        (status = 400, description = "Empty avatar", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn set_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Json(req): Json<SetAvatarRequest>,
) -> Result<Json<SetAvatarResponse>, ApiError> {
    if req.avatar.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "avatar",
            message: "Avatar cannot be empty",
        });
    }

    let mut conn = pool.get()?;

    diesel::update(users::table.find(user.id))
        .set(users::avatar.eq(&req.avatar))
        .execute(&mut conn)?;

    Ok(Json(SetAvatarResponse { avatar: req.avatar }))
}

#[utoipa::path(
    delete,
    path = "/api/users/me/avatar",
    tag = "users",
    responses(
        (status = 204, description = "Avatar removed"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_avatar(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    diesel::update(users::table.find(user.id))
        .set(users::avatar.eq(None::<String>))
        .execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
