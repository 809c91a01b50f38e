use axum::extract::{Path, State};
use axum::http::StatusCode;
use diesel::prelude::*;
use uuid::Uuid;

use crate::api::recipes::view::find_recipe;
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schema::recipes;
use crate::AppState;

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;

    let recipe = find_recipe(&mut conn, id)?;
    if recipe.author_id != user.id {
        return Err(ApiError::Forbidden("Only the author can delete this recipe"));
    }

    // Ingredient links, favorites and cart rows go with it via ON DELETE CASCADE
    diesel::delete(recipes::table.find(recipe.id)).execute(&mut conn)?;

    Ok(StatusCode::NO_CONTENT)
}
