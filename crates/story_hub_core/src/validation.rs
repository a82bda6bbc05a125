//! crates/story_hub_core/src/validation.rs
//!
//! Input-shape checks shared by the API and the client shell.

use crate::domain::{Credentials, NewStory, StoryDraft};

/// Display cap for a story's short description, in characters.
///
/// Clients warn past this point; the server stores longer descriptions as-is.
pub const SHORT_DESCRIPTION_SOFT_LIMIT: usize = 200;

/// One or more required fields were absent or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields ({})", .missing.join(", "))]
pub struct ValidationError {
    /// Wire names of the missing fields, in declaration order.
    pub missing: Vec<&'static str>,
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

impl StoryDraft {
    /// Turns the draft into a `NewStory`, or reports every missing field.
    pub fn validate(self) -> Result<NewStory, ValidationError> {
        let missing: Vec<&'static str> = [
            ("title", self.title.as_deref()),
            ("shortDescription", self.short_description.as_deref()),
            ("content", self.content.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| name)
        .collect();

        match (self.title, self.short_description, self.content) {
            (Some(title), Some(short_description), Some(content)) if missing.is_empty() => {
                Ok(NewStory {
                    title,
                    short_description,
                    content,
                })
            }
            _ => Err(ValidationError { missing }),
        }
    }
}

impl Credentials {
    /// Builds credentials from optional request fields. Blank means missing,
    /// as for story drafts; accepted values are kept verbatim.
    pub fn from_parts(
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ValidationError> {
        let missing: Vec<&'static str> = [
            ("email", email.as_deref()),
            ("password", password.as_deref()),
        ]
        .into_iter()
        .filter(|(_, value)| is_blank(*value))
        .map(|(name, _)| name)
        .collect();

        match (email, password) {
            (Some(email), Some(password)) if missing.is_empty() => Ok(Self { email, password }),
            _ => Err(ValidationError { missing }),
        }
    }
}

/// True when a short description is longer than the display cap.
pub fn exceeds_soft_limit(short_description: &str) -> bool {
    short_description.chars().count() > SHORT_DESCRIPTION_SOFT_LIMIT
}
