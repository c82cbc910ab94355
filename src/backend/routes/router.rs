/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layout
 *
 * - `/users` - Identity (signup, login, password reset, profiles)
 * - `/groups` - Groups
 * - `/lists` - Shared lists
 * - `/items` - Item catalog
 *
 * Unknown paths get a JSON 404. Every request is traced by tower-http.
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::{group_routes, item_routes, list_routes, user_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state containing the store and services
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    Router::new()
        .nest("/users", user_routes(app_state.clone()))
        .nest("/groups", group_routes(app_state.clone()))
        .nest("/lists", list_routes(app_state.clone()))
        .nest("/items", item_routes(app_state.clone()))
        .fallback(|| async { BackendError::not_found("Route not found") })
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
