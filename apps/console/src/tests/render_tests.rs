use super::*;
use chrono::{TimeZone, Utc};
use client_core::{FormValues, Notice, UserRow};
use shared::domain::UserId;

fn ada() -> User {
    User {
        id: UserId(7),
        name: "Ada".to_string(),
        age: 36,
        country: "UK".to_string(),
    }
}

fn ready_list(users: Vec<User>) -> ListView {
    ListView {
        status: ListStatus::Ready,
        rows: users
            .into_iter()
            .map(|user| UserRow {
                begin_edit: client_core::RowAction::BeginEdit(user.id),
                delete: client_core::RowAction::Delete(user.id),
                user,
            })
            .collect(),
        fetched_at: Some(Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).single().expect("timestamp")),
    }
}

#[test]
fn loading_list_shows_only_the_indicator() {
    let mut out = String::new();
    render_list(
        &mut out,
        &ListView {
            status: ListStatus::Loading,
            rows: ready_list(vec![ada()]).rows,
            fetched_at: None,
        },
    );
    assert_eq!(out, "Users: loading...\n");
}

#[test]
fn ready_list_renders_each_user_with_timestamp() {
    let mut out = String::new();
    render_list(&mut out, &ready_list(vec![ada()]));
    assert_eq!(out, "Users (as of 09:30:00):\n  #7 Ada, age 36, UK\n");
}

#[test]
fn failed_list_keeps_prior_rows() {
    let mut view = ready_list(vec![ada()]);
    view.status = ListStatus::Failed {
        message: "connection refused".to_string(),
    };
    let mut out = String::new();
    render_list(&mut out, &view);
    assert!(out.starts_with("Users: failed to load (connection refused)\n"));
    assert!(out.contains("#7 Ada"));
}

#[test]
fn not_searched_lookup_renders_nothing() {
    let mut out = String::new();
    render_lookup(&mut out, &LookupView::default());
    assert!(out.is_empty());
}

#[test]
fn lookup_distinguishes_no_match_from_found() {
    let mut out = String::new();
    render_lookup(
        &mut out,
        &LookupView {
            result: LookupResult::NoMatch {
                name: "bob".to_string(),
            },
            in_flight: false,
            last_error: None,
        },
    );
    assert_eq!(out, "Lookup: no user named \"bob\"\n");

    let mut out = String::new();
    render_lookup(
        &mut out,
        &LookupView {
            result: LookupResult::Found(ada()),
            in_flight: false,
            last_error: None,
        },
    );
    assert_eq!(out, "Lookup: #7 Ada, age 36, UK\n");
}

#[test]
fn edit_form_shows_target_and_notice() {
    let mut out = String::new();
    render_form(
        &mut out,
        &FormView {
            values: FormValues {
                name: "Ada".to_string(),
                age: "36".to_string(),
                country: "UK".to_string(),
            },
            mode: SessionMode::Edit { user_id: UserId(7) },
            notice: Some(Notice {
                operation: "update",
                message: "users api unreachable: timed out".to_string(),
            }),
        },
    );
    assert!(out.starts_with("Edit user #7 (save / cancel)\n"));
    assert!(out.contains("name=\"Ada\" age=\"36\" country=\"UK\""));
    assert!(out.contains("! update failed: users api unreachable: timed out"));
}
