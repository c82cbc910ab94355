/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server.
 *
 * # Initialization Process
 *
 * 1. Load the store (Postgres with migrations, or in memory)
 * 2. Load the mailer (SMTP, or the log)
 * 3. Build the application state
 * 4. Create and configure the router
 */

use axum::Router;
use thiserror::Error;

use crate::backend::auth::mailer::MailError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_mailer, load_store};
use crate::backend::server::state::AppState;
use crate::backend::store::StoreError;
use crate::shared::config::AppConfig;

/// Startup failures
#[derive(Debug, Error)]
pub enum InitError {
    #[error("store initialization failed: {0}")]
    Store(#[from] StoreError),

    #[error("mailer initialization failed: {0}")]
    Mail(#[from] MailError),
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Errors
///
/// Fails when a configured database cannot be reached or migrated, or the
/// SMTP settings are unusable.
pub async fn create_app(config: AppConfig) -> Result<Router<()>, InitError> {
    tracing::info!("Initializing listshare backend server");

    let store = load_store(&config).await?;
    let mailer = load_mailer(&config)?;

    let app_state = AppState::new(config, store, mailer);
    let app = create_router(app_state);

    tracing::info!("Router configured");
    Ok(app)
}
