//! Error types for the Sortha API client.
//!
//! # Design
//! Configuration problems (`InvalidBaseUrl`, `Auth`) surface when a client or
//! request is created. Everything else surfaces from `Request::invoke`. A
//! response body that is not JSON is never an error; see `Decoded`.
//!
//! Non-2xx responses keep the raw body on the error value for debugging, but
//! the message only names the status code.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("authentication failed: {0}")]
    Auth(String),

    #[error("HTTP error! status: {}", .status.as_u16())]
    HttpStatus { status: StatusCode, body: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("deserialization failed: {0}")]
    Deserialization(String),

    #[error("invalid multipart body: {0}")]
    InvalidMultipart(String),
}

impl ApiError {
    /// Status code of the response, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }
}
