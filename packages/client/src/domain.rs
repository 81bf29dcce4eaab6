//! Domain logic for client-side operations.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use uuid::Uuid;

/// What a line typed by the user asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Send the (trimmed) text as a chat message
    Send(String),
    /// Change the display name used for subsequent messages
    Rename(String),
    /// Leave the chat
    Quit,
    /// Show a usage hint
    Usage(&'static str),
    /// Nothing to do (blank line)
    Ignore,
}

pub const NAME_USAGE: &str = "usage: /name <new name>";

/// Interpret one input line.
///
/// # Arguments
///
/// * `line` - The raw line read from the terminal
///
/// # Returns
///
/// The command the line represents. Surrounding whitespace is trimmed and
/// blank lines are ignored.
pub fn parse_input(line: &str) -> InputCommand {
    let line = line.trim();
    if line.is_empty() {
        return InputCommand::Ignore;
    }

    if line == "/quit" {
        return InputCommand::Quit;
    }

    if line == "/name" {
        return InputCommand::Usage(NAME_USAGE);
    }

    if let Some(rest) = line.strip_prefix("/name ") {
        let name = rest.trim();
        if name.is_empty() {
            return InputCommand::Usage(NAME_USAGE);
        }
        return InputCommand::Rename(name.to_string());
    }

    InputCommand::Send(line.to_string())
}

/// Default display name: `User` followed by a number in `0..1000`.
pub fn default_user_name() -> String {
    let n = Uuid::new_v4().as_u128() % 1000;
    format!("User{}", n)
}
