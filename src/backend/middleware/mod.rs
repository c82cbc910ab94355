//! Middleware Module
//!
//! This module contains the HTTP middleware and request extractors of the
//! backend server.
//!
//! - **`auth`** - Bearer-token middleware and the `AuthUser` extractor
//! - **`extract`** - `EntityId` and `JsonBody`, which reject with `BackendError`
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use listshare::backend::middleware::auth_middleware;
//!
//! let protected = routes.route_layer(from_fn_with_state(app_state.clone(), auth_middleware));
//! ```

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use extract::{parse_id, EntityId, JsonBody};
