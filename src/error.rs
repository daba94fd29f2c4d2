//! Errors raised by the HTTP adapters.

use serde::Deserialize;
use thiserror::Error;

/// Structured error body returned by openrouteservice.
#[derive(Debug, Deserialize)]
pub struct ApiErrorPayload {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub code: u32,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to parse response: {0}")]
    Json(#[from] serde_json::Error),

    /// Provider rejected the request with a structured error.
    #[error("API error (code {code}): {message}")]
    Api { code: u32, message: String },

    /// Non-success status whose body was not a structured error.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("invalid base URL {0}")]
    InvalidBaseUrl(String),
}

impl ClientError {
    /// Builds the error for a non-success response body.
    pub fn from_response(status: u16, body: String) -> Self {
        match serde_json::from_str::<ApiErrorPayload>(&body) {
            Ok(payload) => ClientError::Api {
                code: payload.error.code,
                message: payload.error.message,
            },
            Err(_) => ClientError::Status { status, body },
        }
    }
}
