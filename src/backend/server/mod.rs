//! Server Module
//!
//! This module contains the code that initializes and configures the Axum
//! HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Store and mailer loading
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Store**: Postgres when `DATABASE_URL` is set (migrations run on
//!    startup), otherwise the in-memory store
//! 2. **Mailer**: SMTP when configured, otherwise the logging mailer
//! 3. **State**: services wired over the store
//! 4. **Router**: routes, auth middleware and request tracing
//!
//! # Example
//!
//! ```rust,no_run
//! use listshare::backend::server::create_app;
//! use listshare::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Store and mailer loading
pub mod config;

/// Server initialization
pub mod init;

pub use state::AppState;
pub use init::{create_app, InitError};
