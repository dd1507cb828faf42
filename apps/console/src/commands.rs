//! Operator commands read from stdin.

use client_core::FormField;
use shared::domain::UserId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    List,
    Find { name: String },
    Set { field: FormField, value: String },
    Create,
    Edit { user_id: UserId },
    Save,
    Cancel,
    Delete { user_id: UserId },
    Dismiss,
    Show,
    Help,
    Quit,
}

impl ConsoleCommand {
    pub fn name(&self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Find { .. } => "find",
            Self::Set { .. } => "set",
            Self::Create => "create",
            Self::Edit { .. } => "edit",
            Self::Save => "save",
            Self::Cancel => "cancel",
            Self::Delete { .. } => "delete",
            Self::Dismiss => "dismiss",
            Self::Show => "show",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}'; type 'help' for a list")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a user id")]
    InvalidId(String),
    #[error("unknown field '{0}'; expected name, age or country")]
    UnknownField(String),
}

pub const HELP: &str = "\
commands:
  list                       reload all users
  find <name>                look up one user by name
  set <name|age|country> <v> change one form field
  create                     create a user from the form
  edit <id>                  load a listed user into the form
  save                       save the user being edited
  cancel                     stop editing and clear the form
  delete <id>                delete a user
  dismiss                    clear the last error message
  show                       print the current screen
  quit                       exit";

/// Parses one input line. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<ConsoleCommand>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "list" | "ls" => ConsoleCommand::List,
        // The remainder is taken verbatim; an empty name is a valid lookup.
        "find" => ConsoleCommand::Find {
            name: rest.to_string(),
        },
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None => (rest, ""),
            };
            if field.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "set",
                    argument: "a field name",
                });
            }
            let field =
                FormField::parse(field).ok_or_else(|| CommandError::UnknownField(field.into()))?;
            ConsoleCommand::Set {
                field,
                value: value.to_string(),
            }
        }
        "create" => ConsoleCommand::Create,
        "edit" => ConsoleCommand::Edit {
            user_id: parse_user_id("edit", rest)?,
        },
        "save" => ConsoleCommand::Save,
        "cancel" => ConsoleCommand::Cancel,
        "delete" | "rm" => ConsoleCommand::Delete {
            user_id: parse_user_id("delete", rest)?,
        },
        "dismiss" => ConsoleCommand::Dismiss,
        "show" => ConsoleCommand::Show,
        "help" | "?" => ConsoleCommand::Help,
        "quit" | "exit" => ConsoleCommand::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn parse_user_id(command: &'static str, raw: &str) -> Result<UserId, CommandError> {
    let raw = raw.trim().trim_start_matches('#');
    if raw.is_empty() {
        return Err(CommandError::MissingArgument {
            command,
            argument: "a user id",
        });
    }
    raw.parse::<i64>()
        .map(UserId)
        .map_err(|_| CommandError::InvalidId(raw.to_string()))
}

#[cfg(test)]
#[path = "tests/commands_tests.rs"]
mod tests;
