//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DatabaseService` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use story_hub_core::domain::{NewStory, Story, User, UserCredentials};
use story_hub_core::ports::{DatabaseService, PortError, PortResult};
use uuid::Uuid;

/// SQLSTATE for `unique_violation`.
const UNIQUE_VIOLATION: &str = "23505";
/// SQLSTATE for `foreign_key_violation`.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn has_sqlstate(e: &sqlx::Error, code: &str) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(code))
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DatabaseService` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    email: String,
    hashed_password: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_user(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    fn to_credentials(self) -> UserCredentials {
        UserCredentials {
            user: self.to_user(),
            hashed_password: self.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct StoryRecord {
    id: Uuid,
    title: String,
    short_description: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    user_id: Uuid,
}
impl StoryRecord {
    fn to_domain(self) -> Story {
        Story {
            id: self.id,
            title: self.title,
            short_description: self.short_description,
            content: self.content,
            created_at: self.created_at,
            updated_at: self.updated_at,
            user_id: self.user_id,
        }
    }
}

//=========================================================================================
// `DatabaseService` Trait Implementation
//=========================================================================================

#[async_trait]
impl DatabaseService for DbAdapter {
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, email, hashed_password) VALUES ($1, $2, $3) \
             RETURNING id, email, hashed_password, created_at, updated_at",
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if has_sqlstate(&e, UNIQUE_VIOLATION) {
                PortError::Conflict(format!("User {} already exists", email))
            } else {
                unexpected(e)
            }
        })?;

        Ok(record.to_user())
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(UserRecord::to_credentials))
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, email, hashed_password, created_at, updated_at FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.map(|r| r.to_user()))
    }

    async fn list_stories_for_user(&self, user_id: Uuid) -> PortResult<Vec<Story>> {
        let records = sqlx::query_as::<_, StoryRecord>(
            "SELECT id, title, short_description, content, created_at, updated_at, user_id \
             FROM interview_stories WHERE user_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(unexpected)?;

        let stories = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(stories)
    }

    async fn create_story(&self, user_id: Uuid, story: NewStory) -> PortResult<Story> {
        let record = sqlx::query_as::<_, StoryRecord>(
            "INSERT INTO interview_stories (id, title, short_description, content, user_id) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id, title, short_description, content, created_at, updated_at, user_id",
        )
        .bind(Uuid::new_v4())
        .bind(&story.title)
        .bind(&story.short_description)
        .bind(&story.content)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // The owner was deleted between the session check and the insert.
            if has_sqlstate(&e, FOREIGN_KEY_VIOLATION) {
                PortError::Unauthorized
            } else {
                unexpected(e)
            }
        })?;

        Ok(record.to_domain())
    }
}
