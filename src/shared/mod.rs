//! Shared Module
//!
//! This module contains types and data structures used across the backend:
//! the persisted documents (users, lists, groups, items), the request and
//! response contracts of the REST API, configuration, and validation errors.
//!
//! # Overview
//!
//! None of these types touch the network or the database. Handlers
//! deserialize requests into them, the sharing engine reasons about them, and
//! the stores persist them.

/// Users, lists, groups and items
pub mod model;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError, SmtpConfig};
pub use model::{Group, Item, List, ListItem, User, UserProfile};
