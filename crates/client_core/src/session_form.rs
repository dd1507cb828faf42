//! Create/Edit state machine over the shared form.

use std::sync::Arc;

use shared::domain::{DeletedUser, NewUser, User, UserId, UserRef, UserUpdate};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    error::{ClientError, Result},
    form::{parse_age, FormField, FormValues},
    gateway::DataGateway,
    list::ListController,
};

/// The id being edited lives inside `Edit`, so it exists exactly when the
/// session is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionMode {
    #[default]
    Create,
    Edit {
        user_id: UserId,
    },
}

impl SessionMode {
    pub fn editing_user_id(&self) -> Option<UserId> {
        match self {
            Self::Create => None,
            Self::Edit { user_id } => Some(*user_id),
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit { .. } => "edit",
        }
    }
}

/// Dismissible message describing the last failed write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub values: FormValues,
    pub mode: SessionMode,
    pub notice: Option<Notice>,
}

#[derive(Default)]
struct FormState {
    values: FormValues,
    mode: SessionMode,
    notice: Option<Notice>,
    /// Bumped on every mode change, so re-entering the same edit is distinct.
    generation: u64,
}

impl FormState {
    fn switch_mode(&mut self, mode: SessionMode) {
        self.mode = mode;
        self.generation += 1;
    }
}

pub struct SessionFormController {
    gateway: Arc<dyn DataGateway>,
    list: Arc<ListController>,
    state: Mutex<FormState>,
}

impl SessionFormController {
    pub fn new(gateway: Arc<dyn DataGateway>, list: Arc<ListController>) -> Self {
        Self {
            gateway,
            list,
            state: Mutex::new(FormState::default()),
        }
    }

    /// Switches to editing `user`, overwriting whatever the form held.
    pub async fn enter_edit(&self, user: &User) {
        let mut guard = self.state.lock().await;
        if !guard.values.is_empty() && guard.mode.editing_user_id() != Some(user.id) {
            debug!(
                user_id = user.id.0,
                "session: discarding unsaved form input on enter edit"
            );
        }
        guard.values = FormValues::from_user(user);
        guard.switch_mode(SessionMode::Edit { user_id: user.id });
        info!(user_id = user.id.0, "session: editing user");
    }

    pub async fn cancel_edit(&self) {
        let mut guard = self.state.lock().await;
        if !guard.mode.is_edit() {
            return;
        }
        guard.values.clear();
        guard.switch_mode(SessionMode::Create);
        info!("session: edit cancelled");
    }

    pub async fn update_field(&self, field: FormField, value: impl Into<String>) {
        let mut guard = self.state.lock().await;
        guard.values.set(field, value);
        debug!(%field, mode = guard.mode.label(), "session: field updated");
    }

    /// Creates a user from the form, then resynchronizes the list once the
    /// mutation has resolved.
    pub async fn submit_create(&self) -> Result<UserRef> {
        const OPERATION: &str = "create";

        let (generation, new_user) = {
            let mut guard = self.state.lock().await;
            if guard.mode != SessionMode::Create {
                return Err(ClientError::InvalidMode {
                    operation: OPERATION,
                    mode: guard.mode.label(),
                });
            }
            let age = match parse_age(&guard.values.age) {
                Ok(age) => age,
                Err(err) => return Err(record_failure(&mut guard, OPERATION, err.into())),
            };
            let new_user = NewUser {
                name: guard.values.name.clone(),
                age,
                country: guard.values.country.clone(),
            };
            (guard.generation, new_user)
        };

        let created = match self.gateway.create_user(new_user).await {
            Ok(created) => created,
            Err(err) => {
                let mut guard = self.state.lock().await;
                return Err(record_failure(&mut guard, OPERATION, err));
            }
        };
        info!(user_id = created.id.0, name = %created.name, "session: user created");

        {
            let mut guard = self.state.lock().await;
            guard.notice = None;
            if guard.generation == generation {
                guard.values.clear();
            }
        }

        self.resynchronize_after(OPERATION).await;
        Ok(created)
    }

    /// Saves the form over the user being edited and returns to Create.
    pub async fn submit_edit(&self) -> Result<UserRef> {
        const OPERATION: &str = "update";

        let (generation, update) = {
            let mut guard = self.state.lock().await;
            let Some(user_id) = guard.mode.editing_user_id() else {
                return Err(ClientError::InvalidMode {
                    operation: OPERATION,
                    mode: guard.mode.label(),
                });
            };
            let age = match parse_age(&guard.values.age) {
                Ok(age) => age,
                Err(err) => return Err(record_failure(&mut guard, OPERATION, err.into())),
            };
            let update = UserUpdate {
                id: user_id,
                name: guard.values.name.clone(),
                age,
                country: guard.values.country.clone(),
            };
            (guard.generation, update)
        };

        let updated = match self.gateway.update_user(update).await {
            Ok(updated) => updated,
            Err(err) => {
                let mut guard = self.state.lock().await;
                return Err(record_failure(&mut guard, OPERATION, err));
            }
        };
        info!(user_id = updated.id.0, name = %updated.name, "session: user updated");

        {
            let mut guard = self.state.lock().await;
            guard.notice = None;
            // The operator may have left or re-entered edit while this was in flight.
            if guard.generation == generation {
                guard.values.clear();
                guard.switch_mode(SessionMode::Create);
            }
        }

        self.resynchronize_after(OPERATION).await;
        Ok(updated)
    }

    /// Deletes `user_id` without touching the mode, even when that user is
    /// the one being edited.
    pub async fn delete(&self, user_id: UserId) -> Result<DeletedUser> {
        const OPERATION: &str = "delete";

        let deleted = match self.gateway.delete_user(user_id).await {
            Ok(deleted) => deleted,
            Err(err) => {
                let mut guard = self.state.lock().await;
                return Err(record_failure(&mut guard, OPERATION, err));
            }
        };
        info!(user_id = deleted.id.0, "session: user deleted");

        {
            let mut guard = self.state.lock().await;
            guard.notice = None;
            if guard.mode.editing_user_id() == Some(user_id) {
                warn!(
                    user_id = user_id.0,
                    "session: deleted the user being edited; form still targets it"
                );
            }
        }

        self.resynchronize_after(OPERATION).await;
        Ok(deleted)
    }

    pub async fn dismiss_notice(&self) {
        self.state.lock().await.notice = None;
    }

    pub async fn values(&self) -> FormValues {
        self.state.lock().await.values.clone()
    }

    pub async fn mode(&self) -> SessionMode {
        self.state.lock().await.mode
    }

    pub async fn editing_user_id(&self) -> Option<UserId> {
        self.state.lock().await.mode.editing_user_id()
    }

    pub async fn notice(&self) -> Option<Notice> {
        self.state.lock().await.notice.clone()
    }

    pub async fn view(&self) -> FormView {
        let guard = self.state.lock().await;
        FormView {
            values: guard.values.clone(),
            mode: guard.mode,
            notice: guard.notice.clone(),
        }
    }

    async fn resynchronize_after(&self, operation: &'static str) {
        // Failures are already reflected in the list status.
        if let Err(err) = self.list.resynchronize().await {
            warn!(operation, "session: resynchronize after write failed: {err}");
        }
    }
}

fn record_failure(state: &mut FormState, operation: &'static str, err: ClientError) -> ClientError {
    warn!(operation, "session: {operation} failed: {err}");
    state.notice = Some(Notice {
        operation,
        message: err.to_string(),
    });
    err
}

#[cfg(test)]
#[path = "tests/session_form_tests.rs"]
mod tests;
