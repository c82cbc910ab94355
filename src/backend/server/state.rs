/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The configuration
 * - The document store
 * - Token keys and the mailer
 * - The list, group and item services
 *
 * Everything is behind `Arc` or cheap to clone, so the state is cloned into
 * every request.
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 *
 * ```rust,ignore
 * use axum::extract::State;
 * use listshare::backend::lists::ListService;
 *
 * async fn handler(State(lists): State<ListService>) {
 *     // ...
 * }
 * ```
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::mailer::Mailer;
use crate::backend::auth::sessions::SessionKeys;
use crate::backend::groups::GroupService;
use crate::backend::items::ItemService;
use crate::backend::lists::ListService;
use crate::backend::store::Store;
use crate::shared::config::AppConfig;

/// Application state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn Store>,
    /// Signing keys derived from `config.jwt_secret`
    pub keys: SessionKeys,
    pub mailer: Arc<dyn Mailer>,
    pub lists: ListService,
    pub groups: GroupService,
    pub items: ItemService,
}

impl AppState {
    /// Wire the services over one store
    pub fn new(config: AppConfig, store: Arc<dyn Store>, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            keys: SessionKeys::new(&config.jwt_secret),
            config: Arc::new(config),
            lists: ListService::new(store.clone()),
            groups: GroupService::new(store.clone()),
            items: ItemService::new(store.clone()),
            store,
            mailer,
        }
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Store> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.store.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.keys.clone()
    }
}

impl FromRef<AppState> for Arc<dyn Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}

impl FromRef<AppState> for ListService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.lists.clone()
    }
}

impl FromRef<AppState> for GroupService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.groups.clone()
    }
}

impl FromRef<AppState> for ItemService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.items.clone()
    }
}
