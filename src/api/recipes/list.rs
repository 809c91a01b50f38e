use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Utc};
use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::BigInt;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::recipes::view::{build_recipe_view, RecipeView};
use crate::auth::MaybeAuthUser;
use crate::error::ApiError;
use crate::models::Recipe;
use crate::pagination::{page_bounds, page_total, PageMetadata};
use crate::schema::{favorites, recipes, shopping_cart};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ListRecipesParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Only recipes by this author
    pub author: Option<Uuid>,
    /// "1" or "true": only recipes the viewer favorited
    pub is_favorited: Option<String>,
    /// "1" or "true": only recipes in the viewer's shopping cart
    pub is_in_shopping_cart: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ListRecipesResponse {
    pub recipes: Vec<RecipeView>,
    pub pagination: PageMetadata,
}

/// Query-string boolean: only "1" and "true" switch a filter on.
pub(crate) fn flag(raw: Option<&str>) -> bool {
    matches!(raw, Some("1") | Some("true"))
}

#[derive(Queryable)]
struct RecipeForList {
    id: Uuid,
    author_id: Uuid,
    name: String,
    text: String,
    image: String,
    cooking_time: i32,
    pub_date: DateTime<Utc>,
    /// Total count of all matching rows (from window function)
    total_count: i64,
}

#[utoipa::path(
    get,
    path = "/api/recipes",
    tag = "recipes",
    params(ListRecipesParams),
    responses(
        (status = 200, description = "Paginated recipe list, newest first", body = ListRecipesResponse)
    )
)]
pub async fn list_recipes(
    MaybeAuthUser(viewer): MaybeAuthUser,
    State(pool): State<AppState>,
    Query(params): Query<ListRecipesParams>,
) -> Result<Json<ListRecipesResponse>, ApiError> {
    let (page, limit, offset) = page_bounds(params.page, params.limit);
    let viewer_id = viewer.map(|u| u.id);

    let only_favorited = flag(params.is_favorited.as_deref());
    let only_in_cart = flag(params.is_in_shopping_cart.as_deref());

    // Personal filters make no sense without an identity: an anonymous
    // request gets an empty page, not an error.
    if (only_favorited || only_in_cart) && viewer_id.is_none() {
        return Ok(Json(ListRecipesResponse {
            recipes: Vec::new(),
            pagination: PageMetadata {
                total: 0,
                page,
                limit,
            },
        }));
    }

    let mut conn = pool.get()?;

    let filtered = || {
        let mut query = recipes::table.into_boxed();
        if let Some(author) = params.author {
            query = query.filter(recipes::author_id.eq(author));
        }
        if only_favorited {
            if let Some(uid) = viewer_id {
                query = query.filter(
                    recipes::id.eq_any(
                        favorites::table
                            .filter(favorites::user_id.eq(uid))
                            .select(favorites::recipe_id),
                    ),
                );
            }
        }
        if only_in_cart {
            if let Some(uid) = viewer_id {
                query = query.filter(
                    recipes::id.eq_any(
                        shopping_cart::table
                            .filter(shopping_cart::user_id.eq(uid))
                            .select(shopping_cart::recipe_id),
                    ),
                );
            }
        }
        query
    };

    // COUNT(*) OVER() carries the total across all matching rows
    let rows: Vec<RecipeForList> = filtered()
        .order(recipes::pub_date.desc())
        .select((
            recipes::id,
            recipes::author_id,
            recipes::name,
            recipes::text,
            recipes::image,
            recipes::cooking_time,
            recipes::pub_date,
            sql::<BigInt>("COUNT(*) OVER()"),
        ))
        .limit(limit)
        .offset(offset)
        .load(&mut conn)?;

    let total = page_total(rows.first().map(|r| r.total_count), || {
        filtered().count().get_result(&mut conn)
    })
    .map_err(ApiError::from)?;

    let mut views = Vec::with_capacity(rows.len());
    for row in rows {
        let recipe = Recipe {
            id: row.id,
            author_id: row.author_id,
            name: row.name,
            text: row.text,
            image: row.image,
            cooking_time: row.cooking_time,
            pub_date: row.pub_date,
        };
        views.push(build_recipe_view(&mut conn, viewer_id, &recipe)?);
    }

    Ok(Json(ListRecipesResponse {
        recipes: views,
        pagination: PageMetadata { total, page, limit },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_accepts_one_and_true() {
        assert!(flag(Some("1")));
        assert!(flag(Some("true")));
    }

    #[test]
    fn test_flag_rejects_everything_else() {
        assert!(!flag(Some("0")));
        assert!(!flag(Some("false")));
        assert!(!flag(Some("yes")));
        assert!(!flag(None));
    }
}
