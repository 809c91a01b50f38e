use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::api::recipes::view::{build_recipe_view, find_recipe, RecipeView};
use crate::api::ErrorResponse;
use crate::auth::MaybeAuthUser;
use crate::error::ApiError;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = RecipeView),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_recipe(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RecipeView>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;
    let view = build_recipe_view(&mut conn, viewer.map(|u| u.id), &recipe)?;
    Ok(Json(view))
}
