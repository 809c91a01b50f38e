use axum::extract::{Query, State};
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::users::profile::{build_profile, UserProfile};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::error::ApiError;
use crate::models::User;
use crate::pagination::{page_bounds, PageMetadata};
use crate::schema::users;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListUsersParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size (default: 6, max: 100)
    pub limit: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListUsersResponse {
    pub users: Vec<UserProfile>,
    pub pagination: PageMetadata,
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Paginated list of users", body = ListUsersResponse)
    )
)]
pub async fn list_users(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<ListUsersResponse>, ApiError> {
    let (page, limit, offset) = page_bounds(params.page, params.limit);
    let viewer_id = viewer.map(|u| u.id);

    let mut conn = pool.get()?;

    let total: i64 = users::table.count().get_result(&mut conn)?;

    let rows: Vec<User> = users::table
        .order(users::created_at.asc())
        .limit(limit)
        .offset(offset)
        .select(User::as_select())
        .load(&mut conn)?;

    let mut profiles = Vec::with_capacity(rows.len());
    for user in &rows {
        profiles.push(build_profile(&mut conn, viewer_id, user)?);
    }

    Ok(Json(ListUsersResponse {
        users: profiles,
        pagination: PageMetadata { total, page, limit },
    }))
}
