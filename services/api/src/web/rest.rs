//! services/api/src/web/rest.rs
//!
//! The master definition for the OpenAPI specification, plus the liveness probe.

use crate::web::{auth, error::ErrorBody, stories};
use utoipa::OpenApi;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::register_handler,
        auth::login_handler,
        auth::logout_handler,
        auth::session_handler,
        stories::list_stories_handler,
        stories::create_story_handler,
        health_handler,
    ),
    components(
        schemas(
            auth::CredentialsRequest,
            auth::UserResponse,
            auth::AuthResponse,
            stories::CreateStoryRequest,
            stories::StoryResponse,
            ErrorBody,
        )
    ),
    tags(
        (name = "Story Hub API", description = "Sign-in and personal interview stories.")
    )
)]
pub struct ApiDoc;

/// GET /health - Liveness probe
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "The service is up", body = String)
    )
)]
pub async fn health_handler() -> &'static str {
    "ok"
}
