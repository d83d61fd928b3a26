/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the API server. Every handler
 * returns `Result<_, BackendError>`; the variant decides the HTTP status.
 *
 * # Error Categories
 *
 * ## Client Errors
 *
 * - `Validation` - missing or malformed input, checked before persistence
 * - `InvalidCredentials` - login with an unknown email or wrong password
 * - `Unauthorized` - missing, malformed, expired or forged bearer token
 * - `Forbidden` - valid identity without the required rights
 * - `NotFound` - absent resource, or a resource the caller may not see
 * - `Conflict` - duplicate unique field or an invalid state transition
 *
 * ## Server Errors
 *
 * Persistence, hashing and token-signing failures all surface as a generic
 * 500 without leaking internals.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Message returned for every server-side failure
pub const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Request input failed validation
    #[error(transparent)]
    Validation(#[from] SharedError),

    /// Unknown email or wrong password; one message for both
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No usable bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource absent or not visible to the caller
    #[error("{0}")]
    NotFound(String),

    /// Unique constraint or state conflict
    #[error("{0}")]
    Conflict(String),

    /// Generic internal failure
    #[error("Internal error: {0}")]
    Internal(String),

    /// Persistence failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Token signing failure
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl BackendError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(SharedError::validation(field, message))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Validation(SharedError::SerializationError { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidCredentials | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) | Self::Database(_) | Self::PasswordHash(_) | Self::Token(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the client
    pub fn message(&self) -> String {
        match self {
            Self::Validation(SharedError::ValidationError { message, .. }) => message.clone(),
            Self::InvalidCredentials => self.to_string(),
            Self::Unauthorized(message)
            | Self::Forbidden(message)
            | Self::NotFound(message)
            | Self::Conflict(message) => message.clone(),
            _ => INTERNAL_MESSAGE.to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status_code().is_server_error()
    }
}
