//! services/shell/src/render.rs
//!
//! Plain-text rendering of the shell for a terminal.

use std::fmt::Write;

use crate::state::{FormField, SessionStatus, ShellState, View};

pub const APP_TITLE: &str = "Interview Story Hub";

fn field_label(field: FormField) -> &'static str {
    match field {
        FormField::Title => "Title",
        FormField::ShortDescription => "Short Description",
        FormField::Content => "Full Story Content",
    }
}

pub fn render(state: &ShellState) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_screen(&mut out, state);
    out
}

fn write_screen(out: &mut String, state: &ShellState) -> std::fmt::Result {
    writeln!(out, "== {} ==", APP_TITLE)?;

    match &state.status {
        SessionStatus::Authenticated(principal) => writeln!(out, "Signed in as {}", principal.email)?,
        SessionStatus::Unauthenticated => writeln!(out, "Not signed in (signin / signup)")?,
        SessionStatus::Loading => {}
    }
    if let Some(error) = &state.auth_error {
        writeln!(out, "! {}", error)?;
    }
    writeln!(out)?;

    match state.view() {
        View::LoadingSession => writeln!(out, "Loading session...")?,
        View::Welcome => {
            writeln!(out, "Welcome to {}", APP_TITLE)?;
            writeln!(out, "Sign in or sign up to manage and view interview stories.")?;
        }
        View::LoadingStories => writeln!(out, "Loading your stories...")?,
        View::Empty => {
            if let Some(error) = &state.list_error {
                writeln!(out, "! {}", error)?;
            }
            writeln!(out, "No stories yet. Create one with `new`.")?;
        }
        View::Stories { stories, opened } => {
            if let Some(story) = opened {
                writeln!(out, "--- {} ---", story.title)?;
                writeln!(out, "Created: {}", story.created_at.format("%Y-%m-%d"))?;
                writeln!(out, "Updated: {}", story.updated_at.format("%Y-%m-%d"))?;
                writeln!(out)?;
                for paragraph in story.content.split('\n') {
                    writeln!(out, "{}", paragraph)?;
                }
                writeln!(out, "--- (close) ---")?;
                writeln!(out)?;
            }
            writeln!(out, "Your Interview Stories")?;
            for (i, story) in stories.iter().enumerate() {
                writeln!(out, "[{}] {}", i + 1, story.title)?;
                writeln!(out, "    {}", story.short_description)?;
            }
        }
    }

    if state.form_open || state.create_error.is_some() {
        writeln!(out)?;
        writeln!(out, "Create New Interview Story")?;
        if let Some(error) = &state.create_error {
            writeln!(out, "! {}", error)?;
        }
        for error in &state.field_errors {
            writeln!(out, "  {}: {}", field_label(error.field), error.message)?;
        }
    }
    Ok(())
}
