//! Client-side session for managing users against a remote GraphQL API.
//!
//! [`Session`] owns three controllers: [`ListController`] keeps the list
//! snapshot in sync with the backend, [`LookupController`] performs lazy
//! by-name lookups, and [`SessionFormController`] drives the shared
//! create/edit form and every write.

pub mod error;
pub mod form;
pub mod gateway;
pub mod list;
pub mod lookup;
pub mod session;
pub mod session_form;

pub use error::{ClientError, Result, ValidationError};
pub use form::{parse_age, FormField, FormValues};
pub use gateway::{DataGateway, GraphQlGateway, MissingDataGateway, DEFAULT_REQUEST_TIMEOUT};
pub use list::{ListController, ListSnapshot, ListStatus, ListView, RowAction, UserRow};
pub use lookup::{LookupController, LookupResult, LookupView, SearchOutcome};
pub use session::{Session, SessionView};
pub use session_form::{FormView, Notice, SessionFormController, SessionMode};

#[cfg(test)]
mod test_support;
