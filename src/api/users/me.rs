use axum::{extract::State, Json};

use crate::api::users::profile::{build_profile, UserProfile};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "users",
    responses(
        (status = 200, description = "Current user's profile", body = UserProfile),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    let mut conn = pool.get()?;
    let profile = build_profile(&mut conn, Some(user.id), &user)?;
    Ok(Json(profile))
}
