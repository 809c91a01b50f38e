//! Read views of a recipe. `build_recipe_view` assembles the full aggregate:
//! recipe fields, the author's profile with `is_subscribed`, the ingredient
//! list with amounts, and the viewer-relative `is_favorited` /
//! `is_in_shopping_cart` flags (always false for anonymous viewers).

use diesel::prelude::*;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::users::profile::{build_profile, UserProfile};
use crate::db::DbConn;
use crate::error::ApiError;
use crate::models::{Recipe, User};
use crate::relations::{Cart, Favorites, Relation};
use crate::schema::{ingredients, recipe_ingredients, recipes, users};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeIngredientView {
    pub id: Uuid,
    pub name: String,
    pub measurement_unit: String,
    pub amount: i32,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecipeView {
    pub id: Uuid,
    pub author: UserProfile,
    pub name: String,
    pub text: String,
    pub image: String,
    pub cooking_time: i32,
    pub ingredients: Vec<RecipeIngredientView>,
    pub is_favorited: bool,
    pub is_in_shopping_cart: bool,
}

/// Compact recipe representation used in relation-toggle responses and
/// subscription feeds.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortRecipeView {
    pub id: Uuid,
    pub name: String,
    pub image: String,
    pub cooking_time: i32,
}

impl ShortRecipeView {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        ShortRecipeView {
            id: recipe.id,
            name: recipe.name.clone(),
            image: recipe.image.clone(),
            cooking_time: recipe.cooking_time,
        }
    }
}

pub fn find_recipe(conn: &mut DbConn, id: Uuid) -> Result<Recipe, ApiError> {
    recipes::table
        .find(id)
        .select(Recipe::as_select())
        .first(conn)
        .optional()?
        .ok_or(ApiError::NotFound("Recipe not found"))
}

pub fn build_recipe_view(
    conn: &mut DbConn,
    viewer: Option<Uuid>,
    recipe: &Recipe,
) -> Result<RecipeView, ApiError> {
    let author: User = users::table
        .find(recipe.author_id)
        .select(User::as_select())
        .first(conn)?;
    let author = build_profile(conn, viewer, &author)?;

    let ingredient_rows: Vec<(Uuid, String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(recipe_ingredients::recipe_id.eq(recipe.id))
        .order(ingredients::name.asc())
        .select((
            ingredients::id,
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(conn)?;

    let (is_favorited, is_in_shopping_cart) = match viewer {
        Some(uid) => (
            Favorites::exists(conn, uid, recipe.id)?,
            Cart::exists(conn, uid, recipe.id)?,
        ),
        None => (false, false),
    };

    Ok(RecipeView {
        id: recipe.id,
        author,
        name: recipe.name.clone(),
        text: recipe.text.clone(),
        image: recipe.image.clone(),
        cooking_time: recipe.cooking_time,
        ingredients: ingredient_rows
            .into_iter()
            .map(|(id, name, measurement_unit, amount)| RecipeIngredientView {
                id,
                name,
                measurement_unit,
                amount,
            })
            .collect(),
        is_favorited,
        is_in_shopping_cart,
    })
}
