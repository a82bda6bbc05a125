//! crates/story_hub_core/src/stories.rs
//!
//! Owner-scoped story access. The owner id always comes from the principal,
//! never from client input.

use crate::domain::{Principal, Story, StoryDraft};
use crate::ports::{DatabaseService, PortError, PortResult};
use crate::validation::ValidationError;
use tracing::warn;

#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Port(#[from] PortError),
}

/// Every story owned by the caller, newest first.
pub async fn list_stories(db: &dyn DatabaseService, principal: &Principal) -> PortResult<Vec<Story>> {
    db.list_stories_for_user(principal.user_id).await
}

/// Validates the draft and stores it under the caller's id.
///
/// A session can outlive its account (a reset store, a removed user), so the
/// owner is looked up first; a missing owner is `PortError::Unauthorized`.
pub async fn create_story(
    db: &dyn DatabaseService,
    principal: &Principal,
    draft: StoryDraft,
) -> Result<Story, StoryError> {
    let story = draft.validate()?;
    if db.get_user_by_id(principal.user_id).await?.is_none() {
        warn!(user_id = %principal.user_id, "session names an unknown user");
        return Err(PortError::Unauthorized.into());
    }
    Ok(db.create_story(principal.user_id, story).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::FakeDb;
    use uuid::Uuid;

    async fn member(db: &FakeDb, email: &str) -> Principal {
        let user = db.create_user_with_email(email, "hashed:pw").await.unwrap();
        Principal::from(&user)
    }

    fn draft(title: &str) -> StoryDraft {
        StoryDraft {
            title: Some(title.to_owned()),
            short_description: Some("short".to_owned()),
            content: Some("content".to_owned()),
        }
    }

    #[tokio::test]
    async fn created_story_round_trips_through_list() {
        let db = FakeDb::default();
        let me = member(&db, "ada@example.com").await;

        let created = create_story(&db, &me, draft("Onsite")).await.unwrap();
        let listed = list_stories(&db, &me).await.unwrap();

        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(created.user_id, me.user_id);
        assert_eq!(created.title, "Onsite");
    }

    #[tokio::test]
    async fn invalid_draft_creates_nothing() {
        let db = FakeDb::default();
        let me = member(&db, "ada@example.com").await;
        let mut bad = draft("Onsite");
        bad.content = None;

        let err = create_story(&db, &me, bad).await.unwrap_err();

        assert!(matches!(err, StoryError::Validation(_)));
        assert!(list_stories(&db, &me).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_owner_is_unauthorized_and_creates_nothing() {
        let db = FakeDb::default();
        let ghost = Principal {
            user_id: Uuid::new_v4(),
            email: "gone@example.com".to_owned(),
        };

        let err = create_story(&db, &ghost, draft("Orphan")).await.unwrap_err();

        assert!(matches!(err, StoryError::Port(PortError::Unauthorized)));
        assert_eq!(db.story_count().await, 0);
    }

    #[tokio::test]
    async fn stories_are_isolated_per_owner() {
        let db = FakeDb::default();
        let alice = member(&db, "alice@example.com").await;
        let bob = member(&db, "bob@example.com").await;

        create_story(&db, &alice, draft("Alice's")).await.unwrap();

        assert!(list_stories(&db, &bob).await.unwrap().is_empty());
        assert_eq!(list_stories(&db, &alice).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_is_newest_first_and_repeatable() {
        let db = FakeDb::default();
        let me = member(&db, "ada@example.com").await;
        for title in ["t1", "t2", "t3"] {
            create_story(&db, &me, draft(title)).await.unwrap();
        }

        let first = list_stories(&db, &me).await.unwrap();
        let titles: Vec<_> = first.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["t3", "t2", "t1"]);
        assert_eq!(first, list_stories(&db, &me).await.unwrap());
    }
}
