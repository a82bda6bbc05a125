//! services/api/src/adapters/memory.rs
//!
//! An in-process implementation of `DatabaseService`. Selected with
//! `DATABASE_URL=memory://` and used by the HTTP tests. Data lives only as
//! long as the process.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use story_hub_core::domain::{NewStory, Story, User, UserCredentials};
use story_hub_core::ports::{DatabaseService, PortError, PortResult};
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users_by_email: HashMap<String, UserCredentials>,
    stories: Vec<Story>,
}

#[derive(Default)]
pub struct MemoryAdapter {
    tables: RwLock<Tables>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DatabaseService for MemoryAdapter {
    async fn create_user_with_email(&self, email: &str, hashed_password: &str) -> PortResult<User> {
        let mut tables = self.tables.write().await;
        if tables.users_by_email.contains_key(email) {
            return Err(PortError::Conflict(format!("User {} already exists", email)));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_string(),
            created_at: now,
            updated_at: now,
        };
        tables.users_by_email.insert(
            email.to_string(),
            UserCredentials {
                user: user.clone(),
                hashed_password: Some(hashed_password.to_string()),
            },
        );
        Ok(user)
    }

    async fn get_user_by_email(&self, email: &str) -> PortResult<Option<UserCredentials>> {
        Ok(self.tables.read().await.users_by_email.get(email).cloned())
    }

    async fn get_user_by_id(&self, user_id: Uuid) -> PortResult<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables
            .users_by_email
            .values()
            .find(|c| c.user.id == user_id)
            .map(|c| c.user.clone()))
    }

    async fn list_stories_for_user(&self, user_id: Uuid) -> PortResult<Vec<Story>> {
        let tables = self.tables.read().await;
        let mut stories: Vec<Story> = tables
            .stories
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        stories.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(stories)
    }

    async fn create_story(&self, user_id: Uuid, story: NewStory) -> PortResult<Story> {
        let mut tables = self.tables.write().await;
        if !tables.users_by_email.values().any(|c| c.user.id == user_id) {
            return Err(PortError::Unauthorized);
        }

        // Keep creation times strictly increasing per store so that
        // newest-first ordering reflects insertion order.
        let now = Utc::now();
        let created_at = match tables.stories.last() {
            Some(last) if last.created_at >= now => {
                last.created_at + chrono::Duration::microseconds(1)
            }
            _ => now,
        };

        let story = Story {
            id: Uuid::new_v4(),
            title: story.title,
            short_description: story.short_description,
            content: story.content,
            created_at,
            updated_at: created_at,
            user_id,
        };
        tables.stories.push(story.clone());
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_story(title: &str) -> NewStory {
        NewStory {
            title: title.to_string(),
            short_description: "short".to_string(),
            content: "content".to_string(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_a_conflict() {
        let db = MemoryAdapter::new();
        db.create_user_with_email("ada@example.com", "h").await.unwrap();

        let err = db
            .create_user_with_email("ada@example.com", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::Conflict(_)));
    }

    #[tokio::test]
    async fn user_lookup_by_id_hides_the_hash() {
        let db = MemoryAdapter::new();
        let user = db.create_user_with_email("ada@example.com", "h").await.unwrap();

        assert_eq!(db.get_user_by_id(user.id).await.unwrap(), Some(user));
        assert_eq!(db.get_user_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn rapid_inserts_still_list_newest_first() {
        let db = MemoryAdapter::new();
        let owner = db.create_user_with_email("ada@example.com", "h").await.unwrap().id;
        for title in ["a", "b", "c", "d"] {
            db.create_story(owner, new_story(title)).await.unwrap();
        }

        let stories = db.list_stories_for_user(owner).await.unwrap();
        let titles: Vec<_> = stories.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["d", "c", "b", "a"]);
    }

    #[tokio::test]
    async fn story_for_an_unknown_owner_is_refused() {
        let db = MemoryAdapter::new();
        let ghost = Uuid::new_v4();

        let err = db.create_story(ghost, new_story("orphan")).await.unwrap_err();

        assert!(matches!(err, PortError::Unauthorized));
        assert!(db.list_stories_for_user(ghost).await.unwrap().is_empty());
    }
}
