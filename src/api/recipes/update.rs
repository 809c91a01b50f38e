use axum::extract::{Path, State};
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::recipes::create::{ingredient_links, validate_recipe, RecipeIngredientInput};
use crate::api::recipes::view::{build_recipe_view, find_recipe, RecipeView};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schema::{recipe_ingredients, recipes};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateRecipeRequest {
    pub name: Option<String>,
    pub text: Option<String>,
    pub image: Option<String>,
    pub cooking_time: Option<i32>,
    /// Full replacement for the recipe's ingredient set
    pub ingredients: Vec<RecipeIngredientInput>,
}

#[utoipa::path(
    patch,
    path = "/api/recipes/{id}",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    request_body = UpdateRecipeRequest,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 403, description = "Not the author", body = ErrorResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateRecipeRequest>,
) -> Result<Json<RecipeView>, ApiError> {
    let mut conn = pool.get()?;

    let recipe = find_recipe(&mut conn, id)?;
    if recipe.author_id != user.id {
        return Err(ApiError::Forbidden("Only the author can edit this recipe"));
    }

    // Merge request with current values, then validate the merged state
    let name = request.name.unwrap_or(recipe.name);
    let text = request.text.unwrap_or(recipe.text);
    let image = request.image.unwrap_or(recipe.image);
    let cooking_time = request.cooking_time.unwrap_or(recipe.cooking_time);

    validate_recipe(&name, &image, cooking_time, &request.ingredients)?;

    // The ingredient set is replaced inside one transaction: concurrent
    // readers see either the old set or the new one, never a partial mix.
    conn.transaction::<(), ApiError, _>(|conn| {
        diesel::update(recipes::table.find(recipe.id))
            .set((
                recipes::name.eq(&name),
                recipes::text.eq(&text),
                recipes::image.eq(&image),
                recipes::cooking_time.eq(cooking_time),
            ))
            .execute(conn)?;

        diesel::delete(
            recipe_ingredients::table.filter(recipe_ingredients::recipe_id.eq(recipe.id)),
        )
        .execute(conn)?;

        diesel::insert_into(recipe_ingredients::table)
            .values(&ingredient_links(recipe.id, &request.ingredients))
            .execute(conn)?;

        Ok(())
    })?;

    let updated = find_recipe(&mut conn, recipe.id)?;
    let view = build_recipe_view(&mut conn, Some(user.id), &updated)?;
    Ok(Json(view))
}
