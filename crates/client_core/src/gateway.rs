//! Boundary to the remote users API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{DeletedUser, NewUser, User, UserId, UserRef, UserUpdate},
    error::ApiException,
    protocol::{
        CreateUserData, CreateUserVariables, DeleteUserData, DeleteUserVariables, GraphQlRequest,
        GraphQlResponse, NoVariables, UpdateUserData, UpdateUserVariables, UserByNameVariables,
        UserData, UsersData, CREATE_USER_MUTATION, CREATE_USER_OPERATION, DELETE_USER_MUTATION,
        DELETE_USER_OPERATION, LIST_USERS_OPERATION, LIST_USERS_QUERY, UPDATE_USER_MUTATION,
        UPDATE_USER_OPERATION, USER_BY_NAME_OPERATION, USER_BY_NAME_QUERY,
    },
};
use tracing::{debug, warn};

use crate::error::{ClientError, Result};

/// Remote operations the session depends on.
///
/// Reads (`list_users`, `user_by_name`) are safe to re-issue; writes are not.
#[async_trait]
pub trait DataGateway: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>>;
    async fn user_by_name(&self, name: &str) -> Result<Option<User>>;
    async fn create_user(&self, user: NewUser) -> Result<UserRef>;
    async fn update_user(&self, update: UserUpdate) -> Result<UserRef>;
    async fn delete_user(&self, id: UserId) -> Result<DeletedUser>;
}

/// Gateway used when no endpoint is configured.
pub struct MissingDataGateway;

#[async_trait]
impl DataGateway for MissingDataGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        Err(ClientError::transport("users api endpoint is not configured"))
    }

    async fn user_by_name(&self, _name: &str) -> Result<Option<User>> {
        Err(ClientError::transport("users api endpoint is not configured"))
    }

    async fn create_user(&self, _user: NewUser) -> Result<UserRef> {
        Err(ClientError::transport("users api endpoint is not configured"))
    }

    async fn update_user(&self, _update: UserUpdate) -> Result<UserRef> {
        Err(ClientError::transport("users api endpoint is not configured"))
    }

    async fn delete_user(&self, _id: UserId) -> Result<DeletedUser> {
        Err(ClientError::transport("users api endpoint is not configured"))
    }
}

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// [`DataGateway`] speaking GraphQL over HTTP POST.
pub struct GraphQlGateway {
    http: Client,
    endpoint: String,
}

impl GraphQlGateway {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn execute<V, T>(
        &self,
        operation: &'static str,
        document: &str,
        variables: V,
    ) -> Result<Option<T>>
    where
        V: Serialize + Send,
        T: DeserializeOwned,
    {
        let request = GraphQlRequest::new(document, operation, variables);
        debug!(operation, endpoint = %self.endpoint, "gateway: sending request");

        let response: GraphQlResponse<T> = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if !response.errors.is_empty() {
            let exception = ApiException::new(response.errors);
            warn!(operation, "gateway: api returned errors: {exception}");
            if exception.is_not_found() {
                return Err(ClientError::NotFound {
                    what: "user".to_string(),
                });
            }
            return Err(ClientError::Api {
                operation,
                message: exception.to_string(),
            });
        }

        Ok(response.data)
    }
}

fn missing_data(operation: &'static str) -> ClientError {
    ClientError::Api {
        operation,
        message: "response carried no data".to_string(),
    }
}

fn missing_user(id: UserId) -> ClientError {
    ClientError::NotFound {
        what: format!("user {id}"),
    }
}

/// Names the user in a not-found error raised by the api.
fn with_user_id(err: ClientError, id: UserId) -> ClientError {
    match err {
        ClientError::NotFound { .. } => missing_user(id),
        other => other,
    }
}

#[async_trait]
impl DataGateway for GraphQlGateway {
    async fn list_users(&self) -> Result<Vec<User>> {
        let data: UsersData = self
            .execute(LIST_USERS_OPERATION, LIST_USERS_QUERY, NoVariables {})
            .await?
            .ok_or_else(|| missing_data(LIST_USERS_OPERATION))?;
        Ok(data.users.unwrap_or_default())
    }

    async fn user_by_name(&self, name: &str) -> Result<Option<User>> {
        let data: Option<UserData> = match self
            .execute(
                USER_BY_NAME_OPERATION,
                USER_BY_NAME_QUERY,
                UserByNameVariables {
                    name: name.to_string(),
                },
            )
            .await
        {
            Ok(data) => data,
            // No match is an answer, not a failure.
            Err(ClientError::NotFound { .. }) => {
                debug!(name, "gateway: api reported no user by that name");
                None
            }
            Err(err) => return Err(err),
        };
        Ok(data.and_then(|data| data.user))
    }

    async fn create_user(&self, user: NewUser) -> Result<UserRef> {
        let data: CreateUserData = self
            .execute(
                CREATE_USER_OPERATION,
                CREATE_USER_MUTATION,
                CreateUserVariables { inputs: user },
            )
            .await?
            .ok_or_else(|| missing_data(CREATE_USER_OPERATION))?;
        data.create_user
            .ok_or_else(|| missing_data(CREATE_USER_OPERATION))
    }

    async fn update_user(&self, update: UserUpdate) -> Result<UserRef> {
        let id = update.id;
        let data: UpdateUserData = self
            .execute(
                UPDATE_USER_OPERATION,
                UPDATE_USER_MUTATION,
                UpdateUserVariables {
                    update_inputs: update,
                },
            )
            .await
            .map_err(|err| with_user_id(err, id))?
            .ok_or_else(|| missing_data(UPDATE_USER_OPERATION))?;
        data.update_user.ok_or_else(|| missing_user(id))
    }

    async fn delete_user(&self, id: UserId) -> Result<DeletedUser> {
        let data: DeleteUserData = self
            .execute(
                DELETE_USER_OPERATION,
                DELETE_USER_MUTATION,
                DeleteUserVariables { delete_user_id: id },
            )
            .await
            .map_err(|err| with_user_id(err, id))?
            .ok_or_else(|| missing_data(DELETE_USER_OPERATION))?;
        data.delete_user.ok_or_else(|| missing_user(id))
    }
}

#[cfg(test)]
#[path = "tests/gateway_tests.rs"]
mod tests;
