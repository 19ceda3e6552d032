use std::io;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(String),
    #[error("{0} is already in progress")]
    InFlight(&'static str),
    #[error("invalid action: {0}")]
    InvalidState(String),
    #[error("input ended while waiting for {0}")]
    InputClosed(String),
    #[error("ticket service responded with {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("ticket service request failed: {0}")]
    Transport(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
