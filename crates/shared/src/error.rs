use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Unauthenticated,
    Forbidden,
    NotFound,
    BadUserInput,
    InternalServerError,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorExtensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<ErrorExtensions>,
}

impl GraphQlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: Vec::new(),
            extensions: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.extensions = Some(ErrorExtensions { code: Some(code) });
        self
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.extensions.as_ref().and_then(|ext| ext.code)
    }
}

#[derive(Debug, Error)]
#[error("{}", join_messages(.errors))]
pub struct ApiException {
    pub errors: Vec<GraphQlError>,
}

impl ApiException {
    pub fn new(errors: Vec<GraphQlError>) -> Self {
        Self { errors }
    }

    pub fn is_not_found(&self) -> bool {
        self.errors
            .iter()
            .any(|err| err.code() == Some(ErrorCode::NotFound))
    }
}

fn join_messages(errors: &[GraphQlError]) -> String {
    if errors.is_empty() {
        return "request failed without error details".to_string();
    }
    errors
        .iter()
        .map(|err| err.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
