/// OpenAPI documentation for the Community API
use crate::error::ErrorResponse;
use crate::models::{
    CreatePostRequest, MessageResponse, Post, StatsResponse, UpdatePostRequest, API_VERSION,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Community API",
        version = "1.0.0",
        description = "Community board API: create, read, update and delete posts.",
        license(
            name = "MIT"
        )
    ),
    servers(
        (url = "http://localhost:8000", description = "Development server"),
    ),
    components(schemas(
        Post,
        CreatePostRequest,
        UpdatePostRequest,
        MessageResponse,
        StatsResponse,
        ErrorResponse,
    )),
    tags(
        (name = "health", description = "Service health checks"),
        (name = "posts", description = "Post lookup, search and creation"),
        (name = "database-crud", description = "Post listing, updates and deletion"),
        (name = "error-handling", description = "Guarded post routes with strict error reporting"),
        (name = "statistics", description = "Board statistics"),
    ),
)]
pub struct ApiDoc;

impl ApiDoc {
    pub fn title() -> &'static str {
        "Community API"
    }

    pub fn version() -> &'static str {
        API_VERSION
    }

    pub fn openapi_json_path() -> &'static str {
        "/openapi.json"
    }
}
