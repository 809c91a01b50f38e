use serde::Serialize;
use utoipa::ToSchema;

pub const DEFAULT_PAGE_SIZE: i64 = 6;
pub const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageMetadata {
    /// Total number of items across all pages
    pub total: i64,
    /// 1-based page number
    pub page: i64,
    /// Page size after clamping
    pub limit: i64,
}

/// Resolves raw `page`/`limit` query parameters to `(page, limit, offset)`.
/// Page size defaults to 6 and is capped at 100.
pub fn page_bounds(page: Option<i64>, limit: Option<i64>) -> (i64, i64, i64) {
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let page = page.unwrap_or(1).max(1);
    (page, limit, (page - 1) * limit)
}

/// Total for a list backed by a `COUNT(*) OVER()` window column. The window
/// total rides on the returned rows, so an empty page carries none; `recount`
/// runs only then.
pub fn page_total<E>(
    carried: Option<i64>,
    recount: impl FnOnce() -> Result<i64, E>,
) -> Result<i64, E> {
    match carried {
        Some(total) => Ok(total),
        None => recount(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(page_bounds(None, None), (1, 6, 0));
    }

    #[test]
    fn test_limit_capped_at_max() {
        assert_eq!(page_bounds(None, Some(1000)), (1, 100, 0));
    }

    #[test]
    fn test_limit_floor_is_one() {
        assert_eq!(page_bounds(None, Some(0)), (1, 1, 0));
        assert_eq!(page_bounds(None, Some(-5)), (1, 1, 0));
    }

    #[test]
    fn test_offset_from_page() {
        assert_eq!(page_bounds(Some(3), Some(10)), (3, 10, 20));
    }

    #[test]
    fn test_negative_page_treated_as_first() {
        assert_eq!(page_bounds(Some(-1), None), (1, 6, 0));
    }

    #[test]
    fn test_page_total_prefers_carried_value() {
        let total: Result<i64, ()> = page_total(Some(42), || Ok(0));
        assert_eq!(total, Ok(42));
    }

    #[test]
    fn test_page_total_recounts_when_page_is_empty() {
        let total: Result<i64, ()> = page_total(None, || Ok(7));
        assert_eq!(total, Ok(7));
    }
}
