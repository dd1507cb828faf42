//! GraphQL documents and envelopes spoken with the users API.

use serde::{Deserialize, Serialize};

use crate::{
    domain::{DeletedUser, NewUser, User, UserId, UserRef, UserUpdate},
    error::GraphQlError,
};

pub const LIST_USERS_OPERATION: &str = "getAllUser";
pub const LIST_USERS_QUERY: &str = "query getAllUser {
  users {
    id
    name
    age
    country
  }
}";

pub const USER_BY_NAME_OPERATION: &str = "getSingleUser";
pub const USER_BY_NAME_QUERY: &str = "query getSingleUser($name: String!) {
  user(name: $name) {
    id
    name
    age
    country
  }
}";

pub const CREATE_USER_OPERATION: &str = "createNewUser";
pub const CREATE_USER_MUTATION: &str = "mutation createNewUser($inputs: UserInputs!) {
  createUser(inputs: $inputs) {
    id
    name
  }
}";

pub const UPDATE_USER_OPERATION: &str = "EditUser";
pub const UPDATE_USER_MUTATION: &str = "mutation EditUser($updateInputs: UpdateUserInputs!) {
  updateUser(inputs: $updateInputs) {
    id
    name
  }
}";

pub const DELETE_USER_OPERATION: &str = "UserDelete";
pub const DELETE_USER_MUTATION: &str = "mutation UserDelete($deleteUserId: ID!) {
  deleteUser(id: $deleteUserId) {
    id
  }
}";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V> {
    pub query: String,
    pub operation_name: String,
    pub variables: V,
}

impl<V> GraphQlRequest<V> {
    pub fn new(query: &str, operation_name: &str, variables: V) -> Self {
        Self {
            query: query.to_string(),
            operation_name: operation_name.to_string(),
            variables,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoVariables {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserByNameVariables {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserVariables {
    pub inputs: NewUser,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserVariables {
    pub update_inputs: UserUpdate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserVariables {
    pub delete_user_id: UserId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersData {
    #[serde(default)]
    pub users: Option<Vec<User>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default)]
    pub user: Option<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserData {
    #[serde(default)]
    pub create_user: Option<UserRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserData {
    #[serde(default)]
    pub update_user: Option<UserRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteUserData {
    #[serde(default)]
    pub delete_user: Option<DeletedUser>,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
