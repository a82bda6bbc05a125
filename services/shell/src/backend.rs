//! services/shell/src/backend.rs
//!
//! The client's view of the Story Hub API, and its HTTP implementation.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};
use story_hub_core::domain::{Principal, Story, StoryDraft};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The server did not accept the session (401).
    #[error("Unauthorized")]
    Unauthorized,
    /// The server refused the request with a message meant for the user.
    #[error("{0}")]
    Rejected(String),
    /// The request never produced a usable response.
    #[error("Could not reach the server: {0}")]
    Transport(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

#[async_trait]
pub trait StoryBackend: Send + Sync {
    /// The principal behind the current session, if any.
    async fn current_session(&self) -> BackendResult<Option<Principal>>;

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Principal>;

    async fn sign_up(&self, email: &str, password: &str) -> BackendResult<()>;

    async fn sign_out(&self) -> BackendResult<()>;

    async fn list_stories(&self) -> BackendResult<Vec<Story>>;

    async fn create_story(&self, draft: &StoryDraft) -> BackendResult<Story>;
}

#[derive(Serialize)]
struct CredentialsBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Talks to the API over HTTP, keeping the session cookie in-process.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: &str) -> BackendResult<Self> {
        let client = Client::builder()
            .cookie_store(true)
            .build()
            .map_err(transport)?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn transport(e: reqwest::Error) -> BackendError {
    BackendError::Transport(e.to_string())
}

/// Passes successful responses through and turns the rest into `BackendError`.
async fn check(response: Response) -> BackendResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthorized);
    }

    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    debug!(%status, %message, "request rejected");
    Err(BackendError::Rejected(message))
}

#[async_trait]
impl StoryBackend for HttpBackend {
    async fn current_session(&self) -> BackendResult<Option<Principal>> {
        let response = self
            .client
            .get(self.url("/api/auth/session"))
            .send()
            .await
            .map_err(transport)?;
        match check(response).await {
            Ok(ok) => Ok(Some(ok.json().await.map_err(transport)?)),
            Err(BackendError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> BackendResult<Principal> {
        let response = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    async fn sign_up(&self, email: &str, password: &str) -> BackendResult<()> {
        let response = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&CredentialsBody { email, password })
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn sign_out(&self) -> BackendResult<()> {
        let response = self
            .client
            .post(self.url("/api/auth/logout"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?;
        Ok(())
    }

    async fn list_stories(&self) -> BackendResult<Vec<Story>> {
        let response = self
            .client
            .get(self.url("/api/stories"))
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }

    async fn create_story(&self, draft: &StoryDraft) -> BackendResult<Story> {
        let response = self
            .client
            .post(self.url("/api/stories"))
            .json(draft)
            .send()
            .await
            .map_err(transport)?;
        check(response).await?.json().await.map_err(transport)
    }
}
