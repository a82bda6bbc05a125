//! services/api/src/web/error.rs
//!
//! Maps every failure a handler can hit onto one HTTP response. Internal
//! details are logged here and never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use story_hub_core::{AccountError, PortError, StoryError, ValidationError};
use tracing::error;
use utoipa::ToSchema;

/// The JSON body of every error response.
#[derive(Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Invalid JSON in request body")]
    InvalidJson,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("User already exists")]
    Conflict,
    #[error("Internal Server Error")]
    Internal,
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidJson | Self::Conflict => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<PortError> for HttpError {
    fn from(err: PortError) -> Self {
        match err {
            PortError::Unauthorized => Self::Unauthorized,
            other => {
                error!("Request failed in a service port: {:?}", other);
                Self::Internal
            }
        }
    }
}

impl From<AccountError> for HttpError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::DuplicateAccount => Self::Conflict,
            AccountError::Port(e) => e.into(),
        }
    }
}

impl From<StoryError> for HttpError {
    fn from(err: StoryError) -> Self {
        match err {
            StoryError::Validation(e) => Self::Validation(e),
            StoryError::Port(e) => e.into(),
        }
    }
}
