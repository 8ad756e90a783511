//! Error types for the HTTP API.
//!
//! Every error response has the shape `{"error": "<message>"}`.
//!
//! # Error Mapping
//!
//! | Source | HTTP Status |
//! |--------|-------------|
//! | Malformed body or query, missing field, bad hospital on registration | 400 |
//! | Any login failure, missing or bad bearer token | 401 |
//! | Username already exists | 409 |
//! | Unknown route | 404 |
//! | Body too large | 413 |
//! | Store, hashing or signing failure | 500 |
//!
//! Internal failures are logged in full and reported to the client as a
//! generic message.

use std::fmt;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use hospital_auth::{LoginError, RegistrationError, TokenError};
use hospital_persistence::error::StorageError;

/// The primary error type for HTTP API operations.
#[derive(Debug)]
pub enum RestError {
    /// Malformed or incomplete request (HTTP 400).
    BadRequest {
        /// Client-facing message.
        message: String,
    },

    /// Authentication failed (HTTP 401).
    Unauthorized {
        /// Client-facing message.
        message: String,
    },

    /// Uniqueness violation (HTTP 409).
    Conflict {
        /// Client-facing message.
        message: String,
    },

    /// Route not found (HTTP 404).
    NotFound,

    /// Request body exceeds the configured limit (HTTP 413).
    PayloadTooLarge,

    /// Unexpected server-side failure (HTTP 500).
    InternalError {
        /// Full detail, logged and never sent to the client.
        message: String,
    },
}

impl RestError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            RestError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            RestError::Conflict { .. } => StatusCode::CONFLICT,
            RestError::NotFound => StatusCode::NOT_FOUND,
            RestError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RestError::InternalError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the message sent to the client.
    pub fn public_message(&self) -> &str {
        match self {
            RestError::BadRequest { message }
            | RestError::Unauthorized { message }
            | RestError::Conflict { message } => message,
            RestError::NotFound => "Resource not found",
            RestError::PayloadTooLarge => "Request body too large",
            RestError::InternalError { .. } => hospital_auth::error::INTERNAL_ERROR_MESSAGE,
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        RestError::BadRequest {
            message: message.into(),
        }
    }

    /// Creates an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        RestError::Unauthorized {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        RestError::InternalError {
            message: message.into(),
        }
    }
}

impl fmt::Display for RestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RestError::InternalError { message } => write!(f, "Internal error: {}", message),
            other => write!(f, "{}", other.public_message()),
        }
    }
}

impl std::error::Error for RestError {}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        if let RestError::InternalError { message } = &self {
            tracing::error!(error = %message, "Request failed with internal error");
        }

        let status = self.status_code();
        let body = json!({ "error": self.public_message() });
        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers.
pub type RestResult<T> = Result<T, RestError>;

impl From<StorageError> for RestError {
    fn from(err: StorageError) -> Self {
        RestError::internal(err.to_string())
    }
}

impl From<TokenError> for RestError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Signing(_) => RestError::internal(err.to_string()),
            TokenError::Expired | TokenError::Invalid => RestError::unauthorized(err.public_message()),
        }
    }
}

impl From<LoginError> for RestError {
    fn from(err: LoginError) -> Self {
        let message = err.public_message();
        match err {
            LoginError::Validation(_) => RestError::bad_request(message),
            LoginError::InvalidCredentials
            | LoginError::InvalidTenant(_)
            | LoginError::TenantMismatch { .. } => RestError::unauthorized(message),
            LoginError::TokenIssue(_) | LoginError::Hashing(_) | LoginError::Store(_) => {
                RestError::internal(err.to_string())
            }
        }
    }
}

impl From<RegistrationError> for RestError {
    fn from(err: RegistrationError) -> Self {
        let message = err.public_message();
        match err {
            RegistrationError::UsernameTaken(_) => RestError::Conflict { message },
            RegistrationError::InvalidTenant(_) | RegistrationError::Validation(_) => {
                RestError::bad_request(message)
            }
            RegistrationError::Hashing(_) | RegistrationError::Store(_) => {
                RestError::internal(err.to_string())
            }
        }
    }
}
