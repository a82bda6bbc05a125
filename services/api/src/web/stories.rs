//! services/api/src/web/stories.rs
//!
//! Owner-scoped story endpoints. Both run behind `require_auth`, so the
//! principal is always present in the request extensions.

use axum::{body::Bytes, extract::State, http::StatusCode, Extension, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use story_hub_core::{stories, Principal, Story, StoryDraft};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::{
    error::{ErrorBody, HttpError},
    parse_json,
    state::AppState,
};

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateStoryRequest {
    pub title: Option<String>,
    pub short_description: Option<String>,
    pub content: Option<String>,
}

impl From<CreateStoryRequest> for StoryDraft {
    fn from(req: CreateStoryRequest) -> Self {
        Self {
            title: req.title,
            short_description: req.short_description,
            content: req.content,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoryResponse {
    pub id: Uuid,
    pub title: String,
    pub short_description: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

impl From<Story> for StoryResponse {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            title: story.title,
            short_description: story.short_description,
            content: story.content,
            created_at: story.created_at,
            updated_at: story.updated_at,
            user_id: story.user_id,
        }
    }
}

/// List the caller's stories, newest first.
#[utoipa::path(
    get,
    path = "/api/stories",
    responses(
        (status = 200, description = "The caller's stories", body = [StoryResponse]),
        (status = 401, description = "No active session", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn list_stories_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> Result<Json<Vec<StoryResponse>>, HttpError> {
    let stories = stories::list_stories(state.db.as_ref(), &principal).await?;
    Ok(Json(stories.into_iter().map(StoryResponse::from).collect()))
}

/// Create a story owned by the caller.
#[utoipa::path(
    post,
    path = "/api/stories",
    request_body = CreateStoryRequest,
    responses(
        (status = 201, description = "Story created", body = StoryResponse),
        (status = 400, description = "Missing fields or invalid JSON", body = ErrorBody),
        (status = 401, description = "No active session", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    )
)]
pub async fn create_story_handler(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    body: Bytes,
) -> Result<(StatusCode, Json<StoryResponse>), HttpError> {
    let req: CreateStoryRequest = parse_json(&body)?;
    let story = stories::create_story(state.db.as_ref(), &principal, req.into()).await?;
    info!(user_id = %principal.user_id, story_id = %story.id, "story created");
    Ok((StatusCode::CREATED, Json(story.into())))
}
