//! Plain-text rendering of a session view.

use std::fmt::Write as _;

use client_core::{
    FormView, ListStatus, ListView, LookupResult, LookupView, SessionMode, SessionView,
};
use shared::domain::User;

pub fn render_session(view: &SessionView) -> String {
    let mut out = String::new();
    render_list(&mut out, &view.list);
    render_lookup(&mut out, &view.lookup);
    render_form(&mut out, &view.form);
    out
}

pub fn render_list(out: &mut String, view: &ListView) {
    match &view.status {
        ListStatus::Loading => {
            let _ = writeln!(out, "Users: loading...");
            return;
        }
        ListStatus::Failed { message } => {
            let _ = writeln!(out, "Users: failed to load ({message})");
        }
        ListStatus::Idle | ListStatus::Ready => {}
    }

    match view.fetched_at {
        Some(fetched_at) => {
            let _ = writeln!(out, "Users (as of {}):", fetched_at.format("%H:%M:%S"));
        }
        None => {
            let _ = writeln!(out, "Users:");
        }
    }
    if view.rows.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for row in &view.rows {
        let _ = writeln!(out, "  {}", describe_user(&row.user));
    }
}

pub fn render_lookup(out: &mut String, view: &LookupView) {
    if view.in_flight {
        let _ = writeln!(out, "Lookup: searching...");
    } else {
        match &view.result {
            LookupResult::NotSearched => {}
            LookupResult::NoMatch { name } => {
                let _ = writeln!(out, "Lookup: no user named {name:?}");
            }
            LookupResult::Found(user) => {
                let _ = writeln!(out, "Lookup: {}", describe_user(user));
            }
        }
    }
    if let Some(message) = &view.last_error {
        let _ = writeln!(out, "Lookup failed: {message}");
    }
}

pub fn render_form(out: &mut String, view: &FormView) {
    let heading = match view.mode {
        SessionMode::Create => "Create new user".to_string(),
        SessionMode::Edit { user_id } => format!("Edit user #{user_id} (save / cancel)"),
    };
    let _ = writeln!(out, "{heading}");
    let _ = writeln!(
        out,
        "  name={:?} age={:?} country={:?}",
        view.values.name, view.values.age, view.values.country
    );
    if let Some(notice) = &view.notice {
        let _ = writeln!(
            out,
            "! {} failed: {} (type 'dismiss' to clear)",
            notice.operation, notice.message
        );
    }
}

fn describe_user(user: &User) -> String {
    format!("#{} {}, age {}, {}", user.id, user.name, user.age, user.country)
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
