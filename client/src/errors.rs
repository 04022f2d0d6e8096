//! Error types for the deployment dashboard client

use thiserror::Error;

/// Main error type for the dashboard client
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Server error: {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::DecodeError(err.to_string())
        } else {
            ClientError::NetworkError(err.to_string())
        }
    }
}
