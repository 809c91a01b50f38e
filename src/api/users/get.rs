use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::users::profile::{build_profile, find_user, UserProfile};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "users",
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserProfile),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError> {
    let mut conn = pool.get()?;
    let user = find_user(&mut conn, id)?;
    let profile = build_profile(&mut conn, viewer.map(|u| u.id), &user)?;
    Ok(Json(profile))
}
