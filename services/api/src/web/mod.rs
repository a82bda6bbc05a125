pub mod auth;
pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;
pub mod stories;

use axum::{
    body::Bytes,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use error::HttpError;
pub use middleware::require_auth;
pub use rest::ApiDoc;
pub use state::AppState;

/// Decodes a JSON request body. Anything that is not a JSON object of the
/// expected shape is reported as `HttpError::InvalidJson`.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, HttpError> {
    serde_json::from_slice(body).map_err(|_| HttpError::InvalidJson)
}

/// Builds the complete application router.
pub fn router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(app_state.config.cors_origin.clone())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/auth/session", get(auth::session_handler))
        .route("/health", get(rest::health_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/api/stories",
            get(stories::list_stories_handler).post(stories::create_story_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
