pub mod backend;
pub mod commands;
pub mod input;
pub mod render;
pub mod shell;
pub mod state;

pub use backend::{BackendError, HttpBackend, StoryBackend};
pub use render::render;
pub use shell::Shell;
pub use state::{SessionStatus, ShellState, StoryForm, View};
