use axum::extract::{Path, State};
use axum::response::Redirect;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::recipes::view::find_recipe;
use crate::api::ErrorResponse;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShortLinkResponse {
    #[serde(rename = "short-link")]
    pub short_link: String,
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/get-link",
    tag = "recipes",
    params(("id" = Uuid, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Short link for the recipe", body = ShortLinkResponse),
        (status = 404, description = "Recipe not found", body = ErrorResponse)
    )
)]
pub async fn get_link(
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ShortLinkResponse>, ApiError> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    Ok(Json(ShortLinkResponse {
        short_link: format!("/s/{}", recipe.id),
    }))
}

/// Resolves /s/{id} to the canonical recipe page.
pub async fn resolve_short_link(
    State(pool): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Redirect, ApiError> {
    let mut conn = pool.get()?;
    let recipe = find_recipe(&mut conn, id)?;

    Ok(Redirect::to(&format!("/recipes/{}", recipe.id)))
}
