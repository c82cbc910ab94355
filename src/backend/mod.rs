//! Backend Module
//!
//! This module contains all server-side code for listshare: an Axum HTTP
//! server exposing users, groups, lists and an item catalog.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, store/mailer loading
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Signup, login, JWT tokens, password reset, outgoing email
//! - **`middleware`** - Bearer-token middleware and request extractors
//! - **`sharing`** - Ownership and sharing rules common to lists and groups
//! - **`lists`**, **`groups`**, **`items`** - Services and handlers per resource
//! - **`store`** - The `Store` trait with Postgres and in-memory backends
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Identity
//! ├── middleware/     - Request middleware and extractors
//! ├── sharing/        - Membership engine
//! ├── lists/          - Lists
//! ├── groups/         - Groups
//! ├── items/          - Item catalog
//! ├── store/          - Persistence
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the configuration, an `Arc<dyn Store>`, the token keys,
//! the mailer and the three resource services. It is built once by
//! `create_app` and handed to handlers through `State`/`FromRef`. There is no
//! other shared mutable state.
//!
//! # Error Handling
//!
//! Every handler returns `Result<_, BackendError>`; errors render as
//! `{"error": <message>, "status": <code>}`.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user management
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Ownership and sharing engine
pub mod sharing;

/// Shared lists
pub mod lists;

/// Groups
pub mod groups;

/// Item catalog
pub mod items;

/// Persistence
pub mod store;

pub use server::create_app;
pub use error::BackendError;
