use axum::extract::{Path, State};
use axum::{http::StatusCode, Json};
use uuid::Uuid;

use crate::api::recipes::view::{find_recipe, ShortRecipeView};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::relations::{self, Favorites};
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Recipe added to favorites", body = ShortRecipeView),
        (status = 400, description = "Already in favorites", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn add_favorite(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<(StatusCode, Json<ShortRecipeView>), ApiError> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    relations::add::<Favorites>(&mut conn, user.id, recipe.id)?;

    Ok((StatusCode::CREATED, Json(ShortRecipeView::from_recipe(&recipe))))
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe removed from favorites"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Recipe or favorite not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_favorite(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    relations::remove::<Favorites>(&mut conn, user.id, recipe.id)?;

    Ok(StatusCode::NO_CONTENT)
}
