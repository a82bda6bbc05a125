pub mod accounts;
pub mod domain;
pub mod ports;
pub mod stories;
pub mod validation;

#[cfg(test)]
mod fakes;

pub use accounts::{authenticate, register, AccountError};
pub use domain::{
    Credentials, NewStory, Principal, SessionToken, Story, StoryDraft, User, UserCredentials,
};
pub use ports::{DatabaseService, PasswordService, PortError, PortResult, SessionService};
pub use stories::{create_story, list_stories, StoryError};
pub use validation::{exceeds_soft_limit, ValidationError, SHORT_DESCRIPTION_SOFT_LIMIT};
