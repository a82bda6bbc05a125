//! services/shell/src/state.rs
//!
//! Local view state of the client shell. Nothing here performs I/O; the
//! `Shell` controller mutates it in response to backend results.

use story_hub_core::domain::{Principal, Story, StoryDraft};
use story_hub_core::validation::{exceeds_soft_limit, SHORT_DESCRIPTION_SOFT_LIMIT};
use uuid::Uuid;

pub const FIELD_REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Loading,
    Authenticated(Principal),
    Unauthenticated,
}

/// Which form field a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    ShortDescription,
    Content,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: FormField,
    pub message: String,
}

/// The create-story form buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryForm {
    pub title: String,
    pub short_description: String,
    pub content: String,
}

impl StoryForm {
    /// Per-field problems to echo back before anything is sent.
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        for (field, value) in [
            (FormField::Title, &self.title),
            (FormField::ShortDescription, &self.short_description),
            (FormField::Content, &self.content),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError {
                    field,
                    message: FIELD_REQUIRED.to_string(),
                });
            }
        }
        if exceeds_soft_limit(&self.short_description) {
            errors.push(FieldError {
                field: FormField::ShortDescription,
                message: format!("Keep it under {} characters.", SHORT_DESCRIPTION_SOFT_LIMIT),
            });
        }
        errors
    }

    pub fn to_draft(&self) -> StoryDraft {
        StoryDraft {
            title: Some(self.title.clone()),
            short_description: Some(self.short_description.clone()),
            content: Some(self.content.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ShellState {
    pub status: SessionStatus,
    pub stories: Vec<Story>,
    pub loading_stories: bool,
    /// Id of the story shown in full.
    pub opened: Option<Uuid>,
    pub form: StoryForm,
    pub form_open: bool,
    pub field_errors: Vec<FieldError>,
    pub create_error: Option<String>,
    pub list_error: Option<String>,
    pub auth_error: Option<String>,
}

impl Default for ShellState {
    fn default() -> Self {
        Self {
            status: SessionStatus::Loading,
            stories: Vec::new(),
            loading_stories: false,
            opened: None,
            form: StoryForm::default(),
            form_open: false,
            field_errors: Vec::new(),
            create_error: None,
            list_error: None,
            auth_error: None,
        }
    }
}

/// What the main area should show right now.
#[derive(Debug, PartialEq, Eq)]
pub enum View<'a> {
    LoadingSession,
    Welcome,
    LoadingStories,
    Empty,
    Stories {
        stories: &'a [Story],
        opened: Option<&'a Story>,
    },
}

impl ShellState {
    pub fn principal(&self) -> Option<&Principal> {
        match &self.status {
            SessionStatus::Authenticated(principal) => Some(principal),
            _ => None,
        }
    }

    pub fn opened_story(&self) -> Option<&Story> {
        let id = self.opened?;
        self.stories.iter().find(|s| s.id == id)
    }

    pub fn view(&self) -> View<'_> {
        match self.status {
            SessionStatus::Loading => View::LoadingSession,
            SessionStatus::Unauthenticated => View::Welcome,
            SessionStatus::Authenticated(_) if self.loading_stories => View::LoadingStories,
            SessionStatus::Authenticated(_) if self.stories.is_empty() => View::Empty,
            SessionStatus::Authenticated(_) => View::Stories {
                stories: &self.stories,
                opened: self.opened_story(),
            },
        }
    }

    /// Drops everything that belongs to a signed-in user.
    pub fn clear_user_data(&mut self) {
        self.stories.clear();
        self.loading_stories = false;
        self.opened = None;
        self.form = StoryForm::default();
        self.form_open = false;
        self.field_errors.clear();
        self.create_error = None;
        self.list_error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn story(title: &str) -> Story {
        let now = Utc::now();
        Story {
            id: Uuid::new_v4(),
            title: title.to_string(),
            short_description: "s".to_string(),
            content: "c".to_string(),
            created_at: now,
            updated_at: now,
            user_id: Uuid::new_v4(),
        }
    }

    fn signed_in() -> ShellState {
        ShellState {
            status: SessionStatus::Authenticated(Principal {
                user_id: Uuid::new_v4(),
                email: "ada@example.com".to_string(),
            }),
            ..ShellState::default()
        }
    }

    #[test]
    fn view_distinguishes_loading_empty_and_populated() {
        assert_eq!(ShellState::default().view(), View::LoadingSession);

        let mut state = signed_in();
        state.loading_stories = true;
        assert_eq!(state.view(), View::LoadingStories);

        state.loading_stories = false;
        assert_eq!(state.view(), View::Empty);

        state.stories = vec![story("a")];
        assert!(matches!(state.view(), View::Stories { stories, opened: None } if stories.len() == 1));
    }

    #[test]
    fn signed_out_user_sees_the_welcome() {
        let state = ShellState {
            status: SessionStatus::Unauthenticated,
            ..ShellState::default()
        };
        assert_eq!(state.view(), View::Welcome);
    }

    #[test]
    fn blank_form_flags_every_field() {
        let fields: Vec<FormField> = StoryForm::default()
            .validate()
            .into_iter()
            .map(|e| e.field)
            .collect();
        assert_eq!(
            fields,
            [FormField::Title, FormField::ShortDescription, FormField::Content]
        );
    }

    #[test]
    fn overlong_short_description_is_flagged() {
        let form = StoryForm {
            title: "t".to_string(),
            short_description: "x".repeat(SHORT_DESCRIPTION_SOFT_LIMIT + 1),
            content: "c".to_string(),
        };
        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, FormField::ShortDescription);
    }

    #[test]
    fn opened_story_missing_from_the_list_shows_nothing() {
        let mut state = signed_in();
        state.stories = vec![story("a")];
        state.opened = Some(Uuid::new_v4());
        assert_eq!(state.opened_story(), None);
    }
}
