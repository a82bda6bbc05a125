//! services/shell/src/commands.rs
//!
//! The REPL's command grammar.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SignUp { email: String },
    SignIn { email: String },
    SignOut,
    List,
    Open(usize),
    Close,
    New,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  signup <email>   create an account and sign in
  signin <email>   sign in
  signout          sign out
  list             reload your stories
  open <n>         show story number n in full
  close            hide the open story
  new              write a new story
  help             show this help
  quit             leave the shell";

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unknown command `{0}`. Type `help` for a list.")]
    Unknown(String),
    #[error("`{0}` needs an email address.")]
    MissingEmail(&'static str),
    #[error("`open` needs a story number from the list.")]
    BadIndex,
}

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let command = match head.to_ascii_lowercase().as_str() {
        "signup" => Command::SignUp {
            email: arg.ok_or(ParseError::MissingEmail("signup"))?.to_string(),
        },
        "signin" => Command::SignIn {
            email: arg.ok_or(ParseError::MissingEmail("signin"))?.to_string(),
        },
        "signout" => Command::SignOut,
        "list" | "ls" => Command::List,
        "open" => {
            // Users count from 1.
            let n = arg
                .and_then(|a| a.parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .ok_or(ParseError::BadIndex)?;
            Command::Open(n - 1)
        }
        "close" => Command::Close,
        "new" => Command::New,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}
