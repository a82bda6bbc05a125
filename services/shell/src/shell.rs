//! services/shell/src/shell.rs
//!
//! Drives `ShellState` from user actions and backend results. Every fetch is
//! awaited before the state is updated, so a list triggered by sign-in and a
//! list triggered by a finished create can never interleave.

use tracing::{info, warn};

use crate::backend::{BackendError, StoryBackend};
use crate::state::{SessionStatus, ShellState, StoryForm, FIELD_REQUIRED};

const SIGN_IN_FAILED: &str = "Invalid email or password";
const LIST_FAILED: &str = "Failed to fetch stories";

pub struct Shell<B> {
    backend: B,
    state: ShellState,
}

impl<B: StoryBackend> Shell<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: ShellState::default(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn form_mut(&mut self) -> &mut StoryForm {
        &mut self.state.form
    }

    /// Resolves the session on mount. Lists stories if it is authenticated.
    pub async fn refresh_session(&mut self) {
        self.state.status = SessionStatus::Loading;
        match self.backend.current_session().await {
            Ok(Some(principal)) => self.set_status(SessionStatus::Authenticated(principal)).await,
            Ok(None) => self.set_status(SessionStatus::Unauthenticated).await,
            Err(e) => {
                warn!("Could not resolve the session: {}", e);
                self.state.auth_error = Some(e.to_string());
                self.set_status(SessionStatus::Unauthenticated).await;
            }
        }
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) {
        self.state.auth_error = None;
        match self.backend.sign_in(email, password).await {
            Ok(principal) => {
                info!("Signed in as {}", principal.email);
                self.set_status(SessionStatus::Authenticated(principal)).await;
            }
            Err(BackendError::Transport(e)) => {
                self.state.auth_error = Some(format!("Could not reach the server: {}", e));
            }
            Err(_) => self.state.auth_error = Some(SIGN_IN_FAILED.to_string()),
        }
    }

    /// Registers, then signs straight in with the same credentials.
    pub async fn sign_up(&mut self, email: &str, password: &str) {
        self.state.auth_error = None;
        if let Err(e) = self.backend.sign_up(email, password).await {
            self.state.auth_error = Some(e.to_string());
            return;
        }
        self.sign_in(email, password).await;
    }

    pub async fn sign_out(&mut self) {
        if let Err(e) = self.backend.sign_out().await {
            warn!("Sign-out request failed: {}", e);
        }
        self.set_status(SessionStatus::Unauthenticated).await;
    }

    /// Re-fetches the caller's stories. A failure leaves an empty list and
    /// one inline message; there is no retry.
    pub async fn refresh_stories(&mut self) {
        if self.state.principal().is_none() {
            return;
        }

        self.state.loading_stories = true;
        self.state.list_error = None;
        let result = self.backend.list_stories().await;
        self.state.loading_stories = false;

        match result {
            Ok(stories) => {
                self.state.stories = stories;
                if self.state.opened_story().is_none() {
                    self.state.opened = None;
                }
            }
            Err(BackendError::Unauthorized) => {
                self.state.clear_user_data();
                self.state.status = SessionStatus::Unauthenticated;
            }
            Err(e) => {
                warn!("Error fetching stories: {}", e);
                self.state.stories.clear();
                self.state.opened = None;
                self.state.list_error = Some(LIST_FAILED.to_string());
            }
        }
    }

    pub fn open_form(&mut self) {
        self.state.form_open = true;
        self.state.create_error = None;
        self.state.field_errors.clear();
    }

    /// Closes the form; the buffer is kept until a successful submit.
    pub fn cancel_form(&mut self) {
        self.state.form_open = false;
    }

    /// Validates locally, creates the story, then re-lists. Returns whether
    /// the story was created.
    pub async fn submit_form(&mut self) -> bool {
        self.state.create_error = None;
        self.state.field_errors = self.state.form.validate();
        if !self.state.field_errors.is_empty() {
            let missing = self
                .state
                .field_errors
                .iter()
                .any(|e| e.message == FIELD_REQUIRED);
            let message = if missing {
                "All fields are required."
            } else {
                "Please fix the highlighted fields."
            };
            self.state.create_error = Some(message.to_string());
            return false;
        }

        let draft = self.state.form.to_draft();
        match self.backend.create_story(&draft).await {
            Ok(story) => {
                info!("Created story {}", story.id);
                self.state.form = StoryForm::default();
                self.state.form_open = false;
                self.refresh_stories().await;
                true
            }
            Err(e) => {
                self.state.create_error = Some(e.to_string());
                false
            }
        }
    }

    /// Shows one story in full. Returns false if `index` is out of range.
    pub fn open(&mut self, index: usize) -> bool {
        match self.state.stories.get(index) {
            Some(story) => {
                self.state.opened = Some(story.id);
                true
            }
            None => false,
        }
    }

    pub fn close(&mut self) {
        self.state.opened = None;
    }

    async fn set_status(&mut self, status: SessionStatus) {
        let became_authenticated = match (&self.state.status, &status) {
            (SessionStatus::Authenticated(old), SessionStatus::Authenticated(new)) => old != new,
            (_, SessionStatus::Authenticated(_)) => true,
            _ => false,
        };
        if !matches!(status, SessionStatus::Authenticated(_)) || became_authenticated {
            self.state.clear_user_data();
        }
        self.state.status = status;
        if became_authenticated {
            self.refresh_stories().await;
        }
    }
}
