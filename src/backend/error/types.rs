/**
 * Backend Error Types
 *
 * This module defines the error taxonomy of the HTTP boundary. Every handler
 * returns `Result<_, BackendError>`, and every variant maps to exactly one
 * status code.
 *
 * # Error Categories
 *
 * - `InvalidArgument` - A required field is missing, empty or malformed (400)
 * - `Unauthorized` - Bad credentials or a missing/invalid/expired token (401)
 * - `Forbidden` - A restricted field was sent to the wrong endpoint (403)
 * - `NotFound` - An id does not resolve, or resolves outside the caller's view (404)
 * - `Conflict` - A unique key is already taken (409)
 * - `Internal` - Persistence, transport or crypto failure (500)
 *
 * Errors from the layers below (`SharedError`, `StoreError`, `MailError`)
 * convert with `?` and pick their status from their own variant.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::backend::auth::mailer::MailError;
use crate::backend::store::StoreError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use listshare::backend::error::BackendError;
///
/// let err = BackendError::not_found("List not found");
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A required field is missing or empty
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Human-readable error message
        message: String,
    },

    /// The id does not resolve, or is not visible to the caller
    #[error("Not found: {message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate unique key
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Bad credentials or invalid token
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// Attempt to mutate a restricted field through the wrong endpoint
    #[error("Forbidden: {message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected failure
    #[error("Internal error: {message}")]
    Internal {
        /// Human-readable error message
        message: String,
    },

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Persistence error
    #[error(transparent)]
    StoreError(#[from] StoreError),

    /// Outgoing email error
    #[error(transparent)]
    MailError(#[from] MailError),
}

impl BackendError {
    /// Create a new invalid-argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `InvalidArgument` - 400 Bad Request
    /// - `Unauthorized` - 401 Unauthorized
    /// - `Forbidden` - 403 Forbidden
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Internal` - 500 Internal Server Error
    /// - `SharedError` - 400 Bad Request
    /// - `StoreError` - 409 for duplicates, 500 otherwise
    /// - `MailError` - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidArgument { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::StoreError(StoreError::Duplicate(_)) => StatusCode::CONFLICT,
            Self::StoreError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::MailError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the message shown to clients
    ///
    /// Store and mail failures are reported generically; the details only go
    /// to the log.
    pub fn message(&self) -> String {
        match self {
            Self::InvalidArgument { message }
            | Self::NotFound { message }
            | Self::Conflict { message }
            | Self::Unauthorized { message }
            | Self::Forbidden { message }
            | Self::Internal { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            Self::StoreError(StoreError::Duplicate(message)) => message.clone(),
            Self::StoreError(_) => "Internal server error".to_string(),
            Self::MailError(_) => "Failed to send email".to_string(),
        }
    }
}
