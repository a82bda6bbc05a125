//! crates/story_hub_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the database, the password-hashing primitive and the
//! session-token mechanism.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewStory, Principal, SessionToken, Story, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, crypto).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait DatabaseService: Send + Sync {
    // --- User Management ---

    /// Persists a new user. Fails with `PortError::Conflict` when the email is taken.
    async fn create_user_with_email(&self, email: &str, hashed_password: &str)
        -> PortResult<User>;

    /// Exact-match lookup; `None` when no user has this email.
    async fn get_user_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>>;

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<Option<User>>;

    // --- Story Management ---

    /// All stories owned by `user_id`, newest first. Equal timestamps are
    /// ordered by id so repeated reads of the same data agree.
    async fn list_stories_for_user(&self, user_id: Uuid) -> PortResult<Vec<Story>>;

    async fn create_story(&self, user_id: Uuid, story: NewStory) -> PortResult<Story>;
}

pub trait PasswordService: Send + Sync {
    /// Produces a salted, self-describing hash of `password`.
    fn hash_password(&self, password: &str) -> PortResult<String>;

    /// Checks `password` against a stored hash. Malformed hashes never verify.
    fn verify_password(&self, password: &str, hashed_password: &str) -> bool;
}

pub trait SessionService: Send + Sync {
    /// Mints a signed token carrying the principal.
    fn issue(&self, principal: &Principal) -> PortResult<SessionToken>;

    /// Resolves a token back to its principal, or `None` if it is expired,
    /// forged or malformed.
    fn identify(&self, token: &str) -> Option<Principal>;
}
