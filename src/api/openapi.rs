//! OpenAPI documentation and schema generation

use utoipa::OpenApi;

/// OpenAPI documentation for the numbers-api HTTP surface
///
/// Served at `/openapi.json`, and through Swagger UI at `/swagger-ui` when enabled.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "numbers-api",
        description = "Fetches integer lists from caller-supplied URLs concurrently and returns their sorted union",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    paths(
        crate::api::routes::get_numbers,
        crate::api::routes::usage,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(crate::types::NumberSet)
    ),
    tags(
        (name = "numbers", description = "Number aggregation"),
        (name = "system", description = "Usage, health and API documentation")
    )
)]
pub struct ApiDoc;

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_numbers_path_and_schema() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();

        assert!(doc["paths"]["/numbers"]["get"].is_object());
        assert!(doc["paths"]["/health"]["get"].is_object());
        assert!(doc["components"]["schemas"]["NumberSet"].is_object());
        assert_eq!(doc["info"]["title"], "numbers-api");
    }
}
