use axum::extract::{Query, State};
use axum::Json;
use diesel::prelude::*;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::ingredients::IngredientResponse;
use crate::error::ApiError;
use crate::models::Ingredient;
use crate::schema::ingredients;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListIngredientsParams {
    /// Case-insensitive name prefix filter
    pub name: Option<String>,
}

fn prefix_pattern(name: &str) -> String {
    format!(
        "{}%",
        name.replace('\\', "\\\\").replace('%', "\\%").replace('_', "\\_")
    )
}

#[utoipa::path(
    get,
    path = "/api/ingredients",
    tag = "ingredients",
    params(ListIngredientsParams),
    responses(
        (status = 200, description = "Ingredient catalog, unpaginated", body = [IngredientResponse])
    )
)]
pub async fn list_ingredients(
    State(pool): State<AppState>,
    Query(params): Query<ListIngredientsParams>,
) -> Result<Json<Vec<IngredientResponse>>, ApiError> {
    let mut conn = pool.get()?;

    let mut query = ingredients::table
        .order(ingredients::name.asc())
        .select(Ingredient::as_select())
        .into_boxed();

    if let Some(ref name) = params.name {
        query = query.filter(ingredients::name.ilike(prefix_pattern(name)));
    }

    let rows: Vec<Ingredient> = query.load(&mut conn)?;

    Ok(Json(rows.into_iter().map(IngredientResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_pattern_appends_wildcard() {
        assert_eq!(prefix_pattern("flo"), "flo%");
    }

    #[test]
    fn test_prefix_pattern_escapes_like_metachars() {
        assert_eq!(prefix_pattern("50%_a"), "50\\%\\_a%");
    }
}
