use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use uuid::Uuid;

use crate::api::ingredients::IngredientResponse;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}",
    tag = "ingredients",
    params(("id" = Uuid, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient details", body = IngredientResponse),
        (status = 404, description = "Ingredient not found", body = ErrorResponse)
    )
)]
pub async fn get_ingredient(
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IngredientResponse>, ApiError> {
    let mut conn = pool.get()?;

    let ingredient: Ingredient = ingredients::table
        .find(id)
        .select(Ingredient::as_select())
        .first(&mut conn)
        .optional()?
        .ok_or(ApiError::NotFound("Ingredient not found"))?;

    Ok(Json(ingredient.into()))
}
