use axum::extract::{Query, State};
use axum::Json;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::api::recipes::view::ShortRecipeView;
use crate::api::users::profile::{build_profile, UserProfile};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::db::DbConn;
use crate::error::ApiError;
use crate::models::{Recipe, User};
use crate::pagination::{page_bounds, PageMetadata};
use crate::schema::{recipes, subscriptions, users};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubscriptionsParams {
    /// 1-based page number (default: 1)
    pub page: Option<i64>,
    /// Page size (default: 6, max: 100)
    pub limit: Option<i64>,
    /// Caps the number of recipes embedded per author.
    /// Non-numeric values are ignored.
    pub recipes_limit: Option<String>,
}

/// An author the viewer follows, with a preview of their recipes.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub profile: UserProfile,
    pub recipes: Vec<ShortRecipeView>,
    pub recipes_count: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SubscriptionsPage {
    pub authors: Vec<SubscriptionResponse>,
    pub pagination: PageMetadata,
}

/// Lenient parse of the `recipes_limit` query parameter: anything that is
/// not a positive integer means "no limit".
pub(crate) fn parse_recipes_limit(raw: Option<&str>) -> Option<i64> {
    raw?.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

pub fn build_subscription(
    conn: &mut DbConn,
    viewer: Uuid,
    author: &User,
    recipes_limit: Option<i64>,
) -> Result<SubscriptionResponse, ApiError> {
    let profile = build_profile(conn, Some(viewer), author)?;

    let recipes_count: i64 = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .count()
        .get_result(conn)?;

    let mut query = recipes::table
        .filter(recipes::author_id.eq(author.id))
        .order(recipes::pub_date.desc())
        .select(Recipe::as_select())
        .into_boxed();
    if let Some(limit) = recipes_limit {
        query = query.limit(limit);
    }
    let author_recipes: Vec<Recipe> = query.load(conn)?;

    Ok(SubscriptionResponse {
        profile,
        recipes: author_recipes.iter().map(ShortRecipeView::from_recipe).collect(),
        recipes_count,
    })
}

#[utoipa::path(
    get,
    path = "/api/users/subscriptions",
    tag = "users",
    params(SubscriptionsParams),
    responses(
        (status = 200, description = "Authors the current user follows", body = SubscriptionsPage),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_subscriptions(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Query(params): Query<SubscriptionsParams>,
) -> Result<Json<SubscriptionsPage>, ApiError> {
    let (page, limit, offset) = page_bounds(params.page, params.limit);
    let recipes_limit = parse_recipes_limit(params.recipes_limit.as_deref());

    let mut conn = pool.get()?;

    let total: i64 = users::table
        .filter(
            users::id.eq_any(
                subscriptions::table
                    .filter(subscriptions::user_id.eq(user.id))
                    .select(subscriptions::author_id),
            ),
        )
        .count()
        .get_result(&mut conn)?;

    let authors: Vec<User> = users::table
        .filter(
            users::id.eq_any(
                subscriptions::table
                    .filter(subscriptions::user_id.eq(user.id))
                    .select(subscriptions::author_id),
            ),
        )
        .order(users::username.asc())
        .limit(limit)
        .offset(offset)
        .select(User::as_select())
        .load(&mut conn)?;

    let mut entries = Vec::with_capacity(authors.len());
    for author in &authors {
        entries.push(build_subscription(&mut conn, user.id, author, recipes_limit)?);
    }

    Ok(Json(SubscriptionsPage {
        authors: entries,
        pagination: PageMetadata { total, page, limit },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipes_limit_plain_number() {
        assert_eq!(parse_recipes_limit(Some("3")), Some(3));
    }

    #[test]
    fn test_recipes_limit_missing() {
        assert_eq!(parse_recipes_limit(None), None);
    }

    #[test]
    fn test_recipes_limit_non_numeric_is_ignored() {
        assert_eq!(parse_recipes_limit(Some("abc")), None);
        assert_eq!(parse_recipes_limit(Some("")), None);
        assert_eq!(parse_recipes_limit(Some("1.5")), None);
    }

    #[test]
    fn test_recipes_limit_non_positive_is_ignored() {
        assert_eq!(parse_recipes_limit(Some("0")), None);
        assert_eq!(parse_recipes_limit(Some("-2")), None);
    }
}
