use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OspreyError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("config error: {0}")]
    Config(String),
    #[error("dispatch error: {0}")]
    Dispatch(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<tokio::task::JoinError> for OspreyError {
    fn from(err: tokio::task::JoinError) -> Self {
        OspreyError::Dispatch(err.to_string())
    }
}
