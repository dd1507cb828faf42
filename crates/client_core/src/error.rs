use thiserror::Error;

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid age {input:?}: {reason}")]
pub struct ValidationError {
    pub input: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("users api unreachable: {0}")]
    Transport(String),
    #[error("users api rejected {operation}: {message}")]
    Api {
        operation: &'static str,
        message: String,
    },
    #[error("{what} not found")]
    NotFound { what: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{operation} is not available in {mode} mode")]
    InvalidMode {
        operation: &'static str,
        mode: &'static str,
    },
}

impl ClientError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}
