//! On-demand lookup of a single user by name.

use std::sync::Arc;

use shared::domain::User;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{error::Result, gateway::DataGateway};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupResult {
    #[default]
    NotSearched,
    NoMatch {
        name: String,
    },
    Found(User),
}

impl LookupResult {
    pub fn user(&self) -> Option<&User> {
        match self {
            Self::Found(user) => Some(user),
            _ => None,
        }
    }
}

/// What a single `search` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied(LookupResult),
    /// A newer search was issued before this one resolved.
    Superseded,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LookupView {
    pub result: LookupResult,
    pub in_flight: bool,
    pub last_error: Option<String>,
}

#[derive(Default)]
struct LookupState {
    result: LookupResult,
    issued: u64,
    in_flight: bool,
    last_error: Option<String>,
}

pub struct LookupController {
    gateway: Arc<dyn DataGateway>,
    state: Mutex<LookupState>,
}

impl LookupController {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        Self {
            gateway,
            state: Mutex::new(LookupState::default()),
        }
    }

    /// Looks up `name`. Only the most recently issued search may become the
    /// visible result; older responses are dropped when they arrive.
    pub async fn search(&self, name: &str) -> Result<SearchOutcome> {
        let ticket = {
            let mut guard = self.state.lock().await;
            guard.issued += 1;
            guard.in_flight = true;
            guard.issued
        };
        debug!(ticket, name, "lookup: search issued");

        let outcome = self.gateway.user_by_name(name).await;

        let mut guard = self.state.lock().await;
        if guard.issued != ticket {
            debug!(
                ticket,
                latest = guard.issued,
                name,
                "lookup: discarding stale response"
            );
            return Ok(SearchOutcome::Superseded);
        }
        guard.in_flight = false;

        match outcome {
            Ok(found) => {
                let result = match found {
                    Some(user) => LookupResult::Found(user),
                    None => LookupResult::NoMatch {
                        name: name.to_string(),
                    },
                };
                info!(name, found = result.user().is_some(), "lookup: result applied");
                guard.result = result.clone();
                guard.last_error = None;
                Ok(SearchOutcome::Applied(result))
            }
            Err(err) => {
                warn!(name, "lookup: search failed, keeping prior result: {err}");
                guard.last_error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn result(&self) -> LookupResult {
        self.state.lock().await.result.clone()
    }

    pub async fn in_flight(&self) -> bool {
        self.state.lock().await.in_flight
    }

    pub async fn view(&self) -> LookupView {
        let guard = self.state.lock().await;
        LookupView {
            result: guard.result.clone(),
            in_flight: guard.in_flight,
            last_error: guard.last_error.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/lookup_tests.rs"]
mod tests;
