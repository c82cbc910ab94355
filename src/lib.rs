//! listshare - Main Library
//!
//! listshare is the REST backend of a shared list and task-management
//! application: users sign up, create lists and groups, share them with other
//! users, and check items off together.
//!
//! # Module Structure
//!
//! The library is organized into two main modules:
//!
//! - **`shared`** - Types shared by every layer
//!   - Users, lists, groups and items with their request/response contracts
//!   - Application configuration
//!   - Validation error types
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server, routes and authentication middleware
//!   - Ownership and sharing engine for lists and groups
//!   - Persistence (`Store` trait with Postgres and in-memory backends)
//!   - Identity: signup, login, password reset by email
//!
//! # Usage
//!
//! ```rust,no_run
//! use listshare::backend::server::init::create_app;
//! use listshare::shared::config::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency
//!
//! A list or group and the `lists`/`groups` back-references on its users are
//! written as separate documents. There are no transactions: concurrent
//! mutations of one entity can lose updates, and a failure halfway through a
//! multi-document write is reported but not rolled back.
//!
//! # Error Handling
//!
//! - `Result<T, E>` for fallible operations, `Option<T>` for "absent"
//! - `shared::error::SharedError` for validation failures
//! - `backend::error::BackendError` at the HTTP boundary

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
