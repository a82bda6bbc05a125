//! Test doubles for the core ports.

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{NewStory, Story, User, UserCredentials};
use crate::ports::{DatabaseService, PasswordService, PortError, PortResult};

#[derive(Default)]
struct Tables {
    users: Vec<UserCredentials>,
    stories: Vec<Story>,
    ticks: i64,
    hide_users: bool,
}

/// A store whose clock advances one second per write, so ordering is exact.
#[derive(Default)]
pub struct FakeDb {
    tables: Mutex<Tables>,
}

impl FakeDb {
    pub async fn user_count(&self) -> usize {
        self.tables.lock().await.users.len()
    }

    pub async fn story_count(&self) -> usize {
        self.tables.lock().await.stories.len()
    }

    /// Makes email lookups miss so only the insert's uniqueness check fires.
    pub async fn hide_users_from_lookup(&self) {
        self.tables.lock().await.hide_users = true;
    }

    pub async fn insert_passwordless(&self, email: &str) {
        let now = Utc::now();
        self.tables.lock().await.users.push(UserCredentials {
            user: User {
                id: Uuid::new_v4(),
                email: email.to_owned(),
                created_at: now,
                updated_at: now,
            },
            hashed_password: None,
        });
    }
}

#[async_trait]
impl DatabaseService for FakeDb {
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.user.email == email) {
            return Err(PortError::Conflict(email.to_owned()));
        }
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(UserCredentials {
            user: user.clone(),
            hashed_password: Some(hashed_password.to_owned()),
        });
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>> {
        let tables = self.tables.lock().await;
        if tables.hide_users {
            return Ok(None);
        }
        Ok(tables.users.iter().find(|u| u.user.email == email).cloned())
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .find(|u| u.user.id == user_id)
            .map(|u| u.user.clone()))
    }

    async fn list_stories_for_user(&self, user_id: Uuid) -> PortResult<Vec<Story>> {
        let tables = self.tables.lock().await;
        let mut stories: Vec<Story> = tables
            .stories
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(stories)
    }

    async fn create_story(&self, user_id: Uuid, story: NewStory) -> PortResult<Story> {
        let mut tables = self.tables.lock().await;
        tables.ticks += 1;
        let at = Utc
            .timestamp_opt(1_700_000_000, 0)
            .single()
            .ok_or_else(|| PortError::Unexpected("bad epoch".to_owned()))?
            + Duration::seconds(tables.ticks);
        let story = Story {
            id: Uuid::new_v4(),
            title: story.title,
            short_description: story.short_description,
            content: story.content,
            created_at: at,
            updated_at: at,
            user_id,
        };
        tables.stories.push(story.clone());
        Ok(story)
    }
}

/// Stores passwords as `hashed:<password>`; fast enough for unit tests.
pub struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash_password(&self, password: &str) -> PortResult<String> {
        Ok(format!("hashed:{password}"))
    }

    fn verify_password(&self, password: &str, hashed_password: &str) -> bool {
        hashed_password.strip_prefix("hashed:") == Some(password)
    }
}
