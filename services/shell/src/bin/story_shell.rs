//! services/shell/src/bin/story_shell.rs
//!
//! Interactive terminal client for the Story Hub API.

use clap::Parser;
use rustyline::{error::ReadlineError, DefaultEditor};
use shell_lib::{
    commands::{self, Command, HELP},
    input::read_password,
    render, HttpBackend, Shell,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "story-shell", about = "Browse and write your interview stories")]
struct Args {
    /// Base URL of the Story Hub API.
    #[arg(long, env = "STORY_HUB_API_URL", default_value = "http://localhost:3000")]
    api_url: String,
}

/// Reads one line; `None` on Ctrl-C / Ctrl-D.
fn prompt(editor: &mut DefaultEditor, label: &str) -> Result<Option<String>, ReadlineError> {
    match editor.readline(label) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Like `prompt`, with the line pre-filled from an earlier attempt.
fn prompt_initial(
    editor: &mut DefaultEditor,
    label: &str,
    initial: &str,
) -> Result<Option<String>, ReadlineError> {
    match editor.readline_with_initial(label, (initial, "")) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Reads lines until a lone `.`.
fn prompt_multiline(editor: &mut DefaultEditor, label: &str) -> Result<Option<String>, ReadlineError> {
    println!("{} (finish with a line containing only `.`)", label);
    let mut lines = Vec::new();
    loop {
        match prompt(editor, "| ")? {
            Some(line) if line.trim() == "." => return Ok(Some(lines.join("\n"))),
            Some(line) => lines.push(line),
            None => return Ok(None),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut shell = Shell::new(HttpBackend::new(&args.api_url)?);
    let mut editor = DefaultEditor::new()?;

    shell.refresh_session().await;
    println!("{}", render(shell.state()));
    println!("{}", HELP);

    loop {
        let Some(line) = prompt(&mut editor, "story> ")? else {
            break;
        };
        let _ = editor.add_history_entry(line.as_str());

        let command = match commands::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match command {
            Command::SignUp { email } => {
                let password = read_password("password: ").await?;
                shell.sign_up(&email, &password).await;
            }
            Command::SignIn { email } => {
                let password = read_password("password: ").await?;
                shell.sign_in(&email, &password).await;
            }
            Command::SignOut => shell.sign_out().await,
            Command::List => shell.refresh_stories().await,
            Command::Open(index) => {
                if !shell.open(index) {
                    println!("No story number {}.", index + 1);
                    continue;
                }
            }
            Command::Close => shell.close(),
            Command::New => {
                if shell.state().principal().is_none() {
                    println!("Sign in first.");
                    continue;
                }
                shell.open_form();
                let previous = shell.state().form.clone();
                let Some(title) = prompt_initial(&mut editor, "Title: ", &previous.title)? else {
                    shell.cancel_form();
                    continue;
                };
                let Some(short_description) = prompt_initial(
                    &mut editor,
                    "Short description (max 200 chars): ",
                    &previous.short_description,
                )?
                else {
                    shell.cancel_form();
                    continue;
                };
                let Some(content) = prompt_multiline(&mut editor, "Full story content")? else {
                    shell.cancel_form();
                    continue;
                };
                let form = shell.form_mut();
                form.title = title;
                form.short_description = short_description;
                form.content = content;
                shell.submit_form().await;
            }
            Command::Help => {
                println!("{}", HELP);
                continue;
            }
            Command::Quit => break,
        }

        println!("{}", render(shell.state()));
    }

    Ok(())
}
