use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdminClientError {
    /// The request never completed or its body could not be decoded.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with {status}: {}", .detail.as_deref().unwrap_or("no details"))]
    Status {
        status: StatusCode,
        detail: Option<String>,
    },
    #[error("an order save is already in progress")]
    SaveInFlight,
    #[error("nothing to save: the list is empty")]
    EmptyCollection,
    #[error("item {0} is not in the list")]
    UnknownItem(i64),
    #[error("item {0} appears more than once in the list")]
    DuplicateItem(i64),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl AdminClientError {
    /// True when the request failed or its body could not be decoded.
    pub fn is_transport(&self) -> bool {
        matches!(self, AdminClientError::Transport(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            AdminClientError::Status { status, .. } => Some(*status),
            AdminClientError::Transport(err) => err.status(),
            _ => None,
        }
    }
}

pub type AdminResult<T> = Result<T, AdminClientError>;
