pub mod ingredients;
pub mod recipes;
pub mod token;
pub mod users;

use serde::Serialize;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{OpenApi, ToSchema};

use crate::pagination::PageMetadata;

/// Shared error response used by all endpoints
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    // Base spec with shared components and security
    #[derive(OpenApi)]
    #[openapi(components(schemas(ErrorResponse, PageMetadata)))]
    struct BaseApi;

    let mut spec = BaseApi::openapi();

    if let Some(components) = spec.components.as_mut() {
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }

    // Merge in each module's spec
    let modules: Vec<utoipa::openapi::OpenApi> = vec![
        users::ApiDoc::openapi(),
        token::ApiDoc::openapi(),
        ingredients::ApiDoc::openapi(),
        recipes::ApiDoc::openapi(),
    ];

    for module_spec in modules {
        spec.paths.paths.extend(module_spec.paths.paths);

        if let Some(module_components) = module_spec.components {
            if let Some(spec_components) = spec.components.as_mut() {
                spec_components.schemas.extend(module_components.schemas);
            }
        }
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_merges_all_modules() {
        let spec = serde_json::to_value(openapi()).unwrap();
        let paths = spec["paths"].as_object().unwrap();

        assert!(paths.contains_key("/api/users"));
        assert!(paths.contains_key("/api/auth/token/login"));
        assert!(paths.contains_key("/api/ingredients"));
        assert!(paths.contains_key("/api/recipes"));
        assert!(paths.contains_key("/api/recipes/download_shopping_cart"));
    }

    #[test]
    fn test_openapi_has_bearer_scheme() {
        let spec = serde_json::to_value(openapi()).unwrap();
        assert!(spec["components"]["securitySchemes"]["bearer_auth"].is_object());
    }
}
