use axum::extract::{Path, Query, State};
use axum::{http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::users::profile::find_user;
use crate::api::users::subscriptions::{build_subscription, parse_recipes_limit, SubscriptionResponse};
use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::relations::{self, Subscriptions};
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SubscribeParams {
    /// Caps the number of recipes embedded in the response.
    /// Non-numeric values are ignored.
    pub recipes_limit: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(("id" = Uuid, Path, description = "Author ID"), SubscribeParams),
    responses(
        (status = 201, description = "Subscribed", body = SubscriptionResponse),
        (status = 400, description = "Already subscribed or self-subscription", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn subscribe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<SubscribeParams>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let mut conn = pool.get()?;
    let author = find_user(&mut conn, id)?;

    // Self-subscription is rejected before any existence check
    if author.id == user.id {
        return Err(ApiError::SelfReference);
    }

    relations::add::<Subscriptions>(&mut conn, user.id, author.id)?;

    let recipes_limit = parse_recipes_limit(params.recipes_limit.as_deref());
    let body = build_subscription(&mut conn, user.id, &author, recipes_limit)?;

    Ok((StatusCode::CREATED, Json(body)))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe",
    tag = "users",
    params(("id" = Uuid, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Self-unsubscription", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = ErrorResponse),
        (status = 404, description = "Author or subscription not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn unsubscribe(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let mut conn = pool.get()?;
    let author = find_user(&mut conn, id)?;

    if author.id == user.id {
        return Err(ApiError::SelfReference);
    }

    relations::remove::<Subscriptions>(&mut conn, user.id, author.id)?;

    Ok(StatusCode::NO_CONTENT)
}
