//! One mounted users session: list, lookup and form controllers over a
//! shared gateway.

use std::sync::Arc;

use tracing::info;

use crate::{
    error::{ClientError, Result},
    gateway::DataGateway,
    list::{ListController, ListView, RowAction},
    lookup::{LookupController, LookupView},
    session_form::{FormView, SessionFormController},
};

pub struct Session {
    list: Arc<ListController>,
    lookup: LookupController,
    form: SessionFormController,
}

/// Everything a renderer needs, captured controller by controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub list: ListView,
    pub lookup: LookupView,
    pub form: FormView,
}

impl Session {
    pub fn new(gateway: Arc<dyn DataGateway>) -> Self {
        let list = Arc::new(ListController::new(Arc::clone(&gateway)));
        Self {
            lookup: LookupController::new(Arc::clone(&gateway)),
            form: SessionFormController::new(gateway, Arc::clone(&list)),
            list,
        }
    }

    /// Issues the initial list read.
    pub async fn mount(&self) -> Result<()> {
        info!("session: mounted");
        self.list.load().await
    }

    pub fn list(&self) -> &ListController {
        &self.list
    }

    pub fn lookup(&self) -> &LookupController {
        &self.lookup
    }

    pub fn form(&self) -> &SessionFormController {
        &self.form
    }

    /// Routes a row affordance to the form controller.
    pub async fn activate(&self, action: RowAction) -> Result<()> {
        match action {
            RowAction::BeginEdit(user_id) => {
                let user = self
                    .list
                    .find(user_id)
                    .await
                    .ok_or_else(|| ClientError::NotFound {
                        what: format!("user {user_id}"),
                    })?;
                self.form.enter_edit(&user).await;
            }
            RowAction::Delete(user_id) => {
                self.form.delete(user_id).await?;
            }
        }
        Ok(())
    }

    pub async fn view(&self) -> SessionView {
        SessionView {
            list: self.list.view().await,
            lookup: self.lookup.view().await,
            form: self.form.view().await,
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
