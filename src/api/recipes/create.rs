use std::collections::HashSet;

use axum::{extract::State, http::StatusCode, Json};
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::recipes::view::{build_recipe_view, RecipeView};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::models::{NewRecipe, NewRecipeIngredient, Recipe};
use crate::schema::{recipe_ingredients, recipes};
use crate::AppState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RecipeIngredientInput {
    /// Catalog ingredient ID
    pub id: Uuid,
    pub amount: i32,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateRecipeRequest {
    pub name: String,
    pub text: String,
    /// Opaque image reference (URL or storage key)
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<RecipeIngredientInput>,
}

pub(crate) fn validate_recipe(
    name: &str,
    image: &str,
    cooking_time: i32,
    ingredients: &[RecipeIngredientInput],
) -> Result<(), ApiError> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "name",
            message: "Recipe name cannot be empty",
        });
    }
    if image.trim().is_empty() {
        return Err(ApiError::Validation {
            field: "image",
            message: "Recipe image cannot be empty",
        });
    }
    if cooking_time < 1 {
        return Err(ApiError::Validation {
            field: "cooking_time",
            message: "Cooking time must be at least 1",
        });
    }
    if ingredients.is_empty() {
        return Err(ApiError::Validation {
            field: "ingredients",
            message: "Recipe must contain at least one ingredient",
        });
    }
    let unique_ids: HashSet<Uuid> = ingredients.iter().map(|i| i.id).collect();
    if unique_ids.len() != ingredients.len() {
        return Err(ApiError::Validation {
            field: "ingredients",
            message: "Recipe cannot contain the same ingredient twice",
        });
    }
    if ingredients.iter().any(|i| i.amount < 1) {
        return Err(ApiError::Validation {
            field: "amount",
            message: "Ingredient amount must be at least 1",
        });
    }
    Ok(())
}

pub(crate) fn ingredient_links(
    recipe_id: Uuid,
    ingredients: &[RecipeIngredientInput],
) -> Vec<NewRecipeIngredient> {
    ingredients
        .iter()
        .map(|i| NewRecipeIngredient {
            recipe_id,
            ingredient_id: i.id,
            amount: i.amount,
        })
        .collect()
}

#[utoipa::path(
    post,
    path = "/api/recipes",
    tag = "recipes",
    request_body = CreateRecipeRequest,
    responses(
        (status = 201, description = "Recipe created", body = RecipeView),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 409, description = "Unknown ingredient referenced", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_recipe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Json(request): Json<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeView>), ApiError> {
    validate_recipe(
        &request.name,
        &request.image,
        request.cooking_time,
        &request.ingredients,
    )?;

    let mut conn = pool.get()?;

    // Recipe row and its ingredient links land in one transaction so a
    // concurrent reader never sees the recipe without its ingredients.
    let recipe: Recipe = conn.transaction::<Recipe, ApiError, _>(|conn| {
        let new_recipe = NewRecipe {
            author_id: user.id,
            name: &request.name,
            text: &request.text,
            image: &request.image,
            cooking_time: request.cooking_time,
        };

        let recipe: Recipe = diesel::insert_into(recipes::table)
            .values(&new_recipe)
            .returning(Recipe::as_returning())
            .get_result(conn)?;

        diesel::insert_into(recipe_ingredients::table)
            .values(&ingredient_links(recipe.id, &request.ingredients))
            .execute(conn)?;

        Ok(recipe)
    })?;

    let view = build_recipe_view(&mut conn, Some(user.id), &recipe)?;

    Ok((StatusCode::CREATED, Json(view)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ing(id: Uuid, amount: i32) -> RecipeIngredientInput {
        RecipeIngredientInput { id, amount }
    }

    #[test]
    fn test_valid_payload_passes() {
        let items = vec![ing(Uuid::new_v4(), 200), ing(Uuid::new_v4(), 2)];
        assert!(validate_recipe("Pancakes", "img/1.png", 20, &items).is_ok());
    }

    #[test]
    fn test_empty_image_rejected() {
        let items = vec![ing(Uuid::new_v4(), 1)];
        assert!(matches!(
            validate_recipe("Pancakes", "   ", 20, &items),
            Err(ApiError::Validation { field: "image", .. })
        ));
    }

    #[test]
    fn test_empty_ingredients_rejected() {
        assert!(matches!(
            validate_recipe("Pancakes", "img.png", 20, &[]),
            Err(ApiError::Validation {
                field: "ingredients",
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_ingredient_rejected() {
        let id = Uuid::new_v4();
        let items = vec![ing(id, 100), ing(id, 50)];
        assert!(matches!(
            validate_recipe("Pancakes", "img.png", 20, &items),
            Err(ApiError::Validation {
                field: "ingredients",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_cooking_time_rejected() {
        let items = vec![ing(Uuid::new_v4(), 1)];
        assert!(matches!(
            validate_recipe("Pancakes", "img.png", 0, &items),
            Err(ApiError::Validation {
                field: "cooking_time",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let items = vec![ing(Uuid::new_v4(), 0)];
        assert!(matches!(
            validate_recipe("Pancakes", "img.png", 20, &items),
            Err(ApiError::Validation {
                field: "amount",
                ..
            })
        ));
    }
}
