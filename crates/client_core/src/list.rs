//! Owner of the "list all users" read and its snapshot.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::domain::{User, UserId};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{error::Result, gateway::DataGateway};

/// Latest successful list read. Replaced wholesale, never patched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSnapshot {
    pub users: Vec<User>,
    pub fetched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ListStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

/// Per-row affordances, keyed by identity rather than position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    BeginEdit(UserId),
    Delete(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRow {
    pub user: User,
    pub begin_edit: RowAction,
    pub delete: RowAction,
}

impl UserRow {
    fn new(user: User) -> Self {
        let id = user.id;
        Self {
            user,
            begin_edit: RowAction::BeginEdit(id),
            delete: RowAction::Delete(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub status: ListStatus,
    pub rows: Vec<UserRow>,
    pub fetched_at: Option<DateTime<Utc>>,
}

#[derive(Default)]
struct ListState {
    snapshot: Option<ListSnapshot>,
    status: ListStatus,
    issued: u64,
}

pub struct ListController {
    gateway: Arc<dyn DataGateway>,
    state: Mutex<ListState>,
}

impl ListController {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(ListState::default()),
        }
    }

    pub async fn load(&self) -> Result<()> {
        self.fetch("load").await
    }

    /// Re-issues the list read so the snapshot reflects backend truth.
    pub async fn resynchronize(&self) -> Result<()> {
        self.fetch("resynchronize").await
    }

    async fn fetch(&self, reason: &'static str) -> Result<()> {
        let ticket = {
            let mut guard = self.state.lock().await;
            guard.issued += 1;
            guard.status = ListStatus::Loading;
            guard.issued
        };
        debug!(reason, ticket, "list: read issued");

        let outcome = self.gateway.list_users().await;

        let mut guard = self.state.lock().await;
        if guard.issued != ticket {
            debug!(
                reason,
                ticket,
                latest = guard.issued,
                "list: discarding superseded read"
            );
            return Ok(());
        }

        match outcome {
            Ok(users) => {
                info!(reason, count = users.len(), "list: snapshot replaced");
                guard.snapshot = Some(ListSnapshot {
                    users,
                    fetched_at: Utc::now(),
                });
                guard.status = ListStatus::Ready;
                Ok(())
            }
            Err(err) => {
                warn!(reason, "list: read failed, keeping prior snapshot: {err}");
                guard.status = ListStatus::Failed {
                    message: err.to_string(),
                };
                Err(err)
            }
        }
    }

    pub async fn status(&self) -> ListStatus {
        self.state.lock().await.status.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.lock().await.status == ListStatus::Loading
    }

    pub async fn snapshot(&self) -> Option<ListSnapshot> {
        self.state.lock().await.snapshot.clone()
    }

    pub async fn rows(&self) -> Vec<UserRow> {
        let guard = self.state.lock().await;
        rows_of(guard.snapshot.as_ref())
    }

    pub async fn view(&self) -> ListView {
        let guard = self.state.lock().await;
        ListView {
            status: guard.status.clone(),
            rows: rows_of(guard.snapshot.as_ref()),
            fetched_at: guard.snapshot.as_ref().map(|snapshot| snapshot.fetched_at),
        }
    }

    pub async fn find(&self, id: UserId) -> Option<User> {
        let guard = self.state.lock().await;
        guard
            .snapshot
            .as_ref()
            .and_then(|snapshot| snapshot.users.iter().find(|user| user.id == id).cloned())
    }
}

fn rows_of(snapshot: Option<&ListSnapshot>) -> Vec<UserRow> {
    snapshot
        .map(|snapshot| snapshot.users.iter().cloned().map(UserRow::new).collect())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "tests/list_tests.rs"]
mod tests;
