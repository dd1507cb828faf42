//! Routes console commands into the mounted session.

use std::sync::Arc;

use client_core::{ClientError, RowAction, SearchOutcome, Session};
use tracing::debug;

use crate::{
    commands::{ConsoleCommand, HELP},
    render::{render_lookup, render_session},
};

/// Runs `command` and returns the text to print, if any.
///
/// Lookups run in the background so the prompt stays usable; their result is
/// printed when the latest one resolves.
pub async fn dispatch(session: &Arc<Session>, command: ConsoleCommand) -> Option<String> {
    debug!(command = command.name(), "console: dispatching command");

    // Read and write failures are rendered from controller state (list status,
    // lookup error, form notice), so only mode and row resolution errors are echoed here.
    let mut echo = None;
    match command {
        ConsoleCommand::List => {
            if let Err(err) = session.list().load().await {
                debug!("console: list reload failed: {err}");
            }
        }
        ConsoleCommand::Find { name } => {
            let session = Arc::clone(session);
            tokio::spawn(async move {
                if let Ok(SearchOutcome::Superseded) = session.lookup().search(&name).await {
                    return;
                }
                let mut out = String::new();
                render_lookup(&mut out, &session.lookup().view().await);
                print!("{out}");
            });
            return Some("Lookup: searching...".to_string());
        }
        ConsoleCommand::Set { field, value } => {
            session.form().update_field(field, value).await;
        }
        ConsoleCommand::Create => {
            if let Err(err @ ClientError::InvalidMode { .. }) = session.form().submit_create().await
            {
                echo = Some(format!("! {err}"));
            }
        }
        ConsoleCommand::Edit { user_id } => {
            if let Err(err) = session.activate(RowAction::BeginEdit(user_id)).await {
                echo = Some(format!("! cannot edit: {err}"));
            }
        }
        ConsoleCommand::Save => {
            if let Err(err @ ClientError::InvalidMode { .. }) = session.form().submit_edit().await {
                echo = Some(format!("! {err}"));
            }
        }
        ConsoleCommand::Cancel => session.form().cancel_edit().await,
        ConsoleCommand::Delete { user_id } => {
            if let Err(err) = session.activate(RowAction::Delete(user_id)).await {
                debug!(user_id = user_id.0, "console: delete failed: {err}");
            }
        }
        ConsoleCommand::Dismiss => session.form().dismiss_notice().await,
        ConsoleCommand::Show => {}
        ConsoleCommand::Help => return Some(HELP.to_string()),
        ConsoleCommand::Quit => return None,
    }

    let mut out = render_session(&session.view().await);
    if let Some(echo) = echo {
        out.push_str(&echo);
        out.push('\n');
    }
    Some(out)
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
