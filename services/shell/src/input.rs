//! services/shell/src/input.rs
//!
//! Password entry for the REPL. Typed characters are never echoed.

use std::io::{self, BufRead, IsTerminal};

/// Prompts on the terminal with echo off. When stdin is not a terminal
/// (piped input), the next line of stdin is taken instead.
pub async fn read_password(label: &'static str) -> io::Result<String> {
    tokio::task::spawn_blocking(move || {
        if io::stdin().is_terminal() {
            rpassword::prompt_password(label)
        } else {
            read_password_line(&mut io::stdin().lock())
        }
    })
    .await
    .map_err(io::Error::other)?
}

/// One password per line; the line ending is not part of the password.
pub fn read_password_line(reader: &mut impl BufRead) -> io::Result<String> {
    rpassword::read_password_from_bufread(reader)
}
