//! Shared Error Types
//!
//! This module defines error types raised while validating documents and
//! requests, before anything reaches the store.
//!
//! # Usage
//!
//! ```rust
//! use listshare::shared::error::SharedError;
//!
//! let error = SharedError::validation("name", "List name cannot be empty");
//! assert_eq!(error.field(), "name");
//! ```
use thiserror::Error;

/// Validation errors shared by model code and handlers
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("{message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The offending field
    pub fn field(&self) -> &str {
        match self {
            Self::ValidationError { field, .. } => field,
        }
    }
}
