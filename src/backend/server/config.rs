/**
 * Server Configuration
 *
 * Turns an [`AppConfig`] into the services the server runs on: the store
 * and the mailer.
 *
 * # Fallbacks
 *
 * - No `database_url`: the in-memory store is used and nothing survives a
 *   restart.
 * - No SMTP settings: reset emails are written to the log.
 *
 * A configured database that cannot be reached or migrated is an error;
 * the server does not silently fall back in that case.
 */

use std::sync::Arc;

use crate::backend::auth::mailer::{LogMailer, MailError, Mailer, SmtpMailer};
use crate::backend::store::{MemoryStore, PgStore, Store, StoreError};
use crate::shared::config::AppConfig;

/// Connect and migrate the configured store
///
/// # Returns
///
/// - `PgStore` when `database_url` is set and migrations succeed
/// - `MemoryStore` when `database_url` is not set
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn Store>, StoreError> {
    let Some(database_url) = config.database_url.as_deref() else {
        tracing::warn!("DATABASE_URL not set. Using the in-memory store; data will not persist.");
        return Ok(Arc::new(MemoryStore::new()));
    };

    tracing::info!("Connecting to database...");
    let store = PgStore::connect(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;
    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    store.migrate().await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        e
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(Arc::new(store))
}

/// Build the mailer for the configured SMTP relay, or the logging fallback
pub fn load_mailer(config: &AppConfig) -> Result<Arc<dyn Mailer>, MailError> {
    match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending email through {}", smtp.host);
            Ok(Arc::new(SmtpMailer::new(smtp)?))
        }
        None => {
            tracing::warn!("SMTP not configured. Password reset emails will only be logged.");
            Ok(Arc::new(LogMailer))
        }
    }
}
