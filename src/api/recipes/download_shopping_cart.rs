//! Shopping list export. Joins the viewer's cart recipes to their
//! ingredient links, folds the rows by (name, measurement_unit) with a
//! 64-bit total, and renders a plain-text attachment. The grouping key is
//! the (name, unit) pair, matching the catalog's own uniqueness constraint:
//! "flour (g)" from two recipes merges into one line, while "flour (g)" and
//! "flour (kg)" stay separate. Read-only; the cart itself is untouched.

use std::collections::BTreeMap;

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use diesel::prelude::*;

use crate::api::ErrorResponse;
use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schema::{ingredients, recipe_ingredients, shopping_cart};
use crate::AppState;

const SHOPPING_LIST_HEADER: &str = "Shopping list:";
const SHOPPING_LIST_FILENAME: &str = "shopping_list.txt";

/// Folds raw (name, unit, amount) rows into per-(name, unit) totals.
/// BTreeMap keys give the byte-wise ascending name order for free, which is
/// stable and locale-independent.
pub(crate) fn aggregate(rows: Vec<(String, String, i32)>) -> Vec<((String, String), i64)> {
    let mut totals: BTreeMap<(String, String), i64> = BTreeMap::new();
    for (name, unit, amount) in rows {
        *totals.entry((name, unit)).or_insert(0) += i64::from(amount);
    }
    totals.into_iter().collect()
}

pub(crate) fn render(groups: &[((String, String), i64)]) -> String {
    let mut lines = Vec::with_capacity(groups.len() + 1);
    lines.push(SHOPPING_LIST_HEADER.to_string());
    for ((name, unit), total) in groups {
        lines.push(format!("{} ({}) — {}", name, unit, total));
    }
    lines.join("\n")
}

#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart",
    tag = "recipes",
    responses(
        (status = 200, description = "Aggregated shopping list as a text attachment", content_type = "text/plain"),
        (status = 401, description = "Unauthorized", body = ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
pub async fn download_shopping_cart(
    AuthUser(user): AuthUser,
    State(pool): State<AppState>,
) -> Result<Response, ApiError> {
    let mut conn = pool.get()?;

    let rows: Vec<(String, String, i32)> = recipe_ingredients::table
        .inner_join(ingredients::table)
        .filter(
            recipe_ingredients::recipe_id.eq_any(
                shopping_cart::table
                    .filter(shopping_cart::user_id.eq(user.id))
                    .select(shopping_cart::recipe_id),
            ),
        )
        .select((
            ingredients::name,
            ingredients::measurement_unit,
            recipe_ingredients::amount,
        ))
        .load(&mut conn)?;

    let body = render(&aggregate(rows));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "text/plain; charset=utf-8")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
        )
        .body(Body::from(body))
        .unwrap();

    Ok(response.into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, unit: &str, amount: i32) -> (String, String, i32) {
        (name.to_string(), unit.to_string(), amount)
    }

    #[test]
    fn test_same_name_and_unit_merge() {
        // cart = {A: [(flour g 200), (egg pcs 2)], B: [(flour g 100), (milk ml 50)]}
        let rows = vec![
            row("flour", "g", 200),
            row("egg", "pcs", 2),
            row("flour", "g", 100),
            row("milk", "ml", 50),
        ];
        let groups = aggregate(rows);
        assert_eq!(
            groups,
            vec![
                (("egg".to_string(), "pcs".to_string()), 2),
                (("flour".to_string(), "g".to_string()), 300),
                (("milk".to_string(), "ml".to_string()), 50),
            ]
        );
    }

    #[test]
    fn test_same_name_different_unit_stay_separate() {
        let rows = vec![row("flour", "g", 200), row("flour", "kg", 1)];
        let groups = aggregate(rows);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_totals_use_wide_accumulator() {
        let rows = vec![row("flour", "g", i32::MAX), row("flour", "g", i32::MAX)];
        let groups = aggregate(rows);
        assert_eq!(groups[0].1, 2 * i64::from(i32::MAX));
    }

    #[test]
    fn test_render_sorted_output() {
        let rows = vec![
            row("flour", "g", 200),
            row("egg", "pcs", 2),
            row("flour", "g", 100),
            row("milk", "ml", 50),
        ];
        let text = render(&aggregate(rows));
        assert_eq!(
            text,
            "Shopping list:\negg (pcs) — 2\nflour (g) — 300\nmilk (ml) — 50"
        );
    }

    #[test]
    fn test_empty_cart_renders_header_only() {
        let text = render(&aggregate(Vec::new()));
        assert_eq!(text, "Shopping list:");
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let rows = vec![row("b", "g", 1), row("a", "g", 2), row("b", "g", 3)];
        let first = aggregate(rows.clone());
        let second = aggregate(rows);
        assert_eq!(first, second);
        assert_eq!(first[0].0 .0, "a");
    }
}
