//! Authentication test helpers
//!
//! Provides a test application over the in-memory store, a mailer that
//! records instead of sending, and utilities for signing users up.

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use serde_json::json;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use listshare::backend::auth::mailer::{MailError, Mailer, OutgoingEmail};
use listshare::backend::auth::{AuthResponse, SessionKeys};
use listshare::backend::routes::create_router;
use listshare::backend::server::AppState;
use listshare::backend::store::{MemoryStore, Store};
use listshare::shared::AppConfig;

/// Password that satisfies the policy
pub const TEST_PASSWORD: &str = "password123";

/// Mailer that keeps every message in memory
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingEmail>>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// The full router over a fresh in-memory store
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<dyn Store>,
    pub mailer: RecordingMailer,
    pub keys: SessionKeys,
}

/// Configuration used by every test app
pub fn test_config() -> AppConfig {
    AppConfig::builder()
        .jwt_secret("integration-test-secret")
        .reset_link_base("http://lists.test")
        .bcrypt_cost(4)
        .build()
        .expect("valid test configuration")
}

impl TestApp {
    pub fn new() -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::new());
        let mailer = RecordingMailer::default();
        let state = AppState::new(test_config(), store.clone(), Arc::new(mailer.clone()));
        let keys = state.keys.clone();
        let server = TestServer::new(create_router(state)).expect("Failed to start test server");
        Self { server, store, mailer, keys }
    }

    /// Sign a user up through the API with a unique email
    pub async fn signup(&self, name: &str) -> TestUser {
        let email = format!("{}_{}@example.com", name.to_lowercase(), Uuid::new_v4().simple());
        let response = self
            .server
            .post("/users/signup")
            .json(&json!({ "email": email, "password": TEST_PASSWORD, "name": name }))
            .await;
        assert_eq!(response.status_code(), StatusCode::OK, "signup failed: {}", response.text());

        let body: AuthResponse = response.json();
        TestUser {
            id: body.user.id,
            name: name.to_string(),
            email,
            password: TEST_PASSWORD.to_string(),
            token: body.token,
        }
    }

    pub fn get(&self, path: &str, user: &TestUser) -> TestRequest {
        authorized(self.server.get(path), &user.token)
    }

    pub fn post(&self, path: &str, user: &TestUser) -> TestRequest {
        authorized(self.server.post(path), &user.token)
    }

    pub fn put(&self, path: &str, user: &TestUser) -> TestRequest {
        authorized(self.server.put(path), &user.token)
    }

    pub fn delete(&self, path: &str, user: &TestUser) -> TestRequest {
        authorized(self.server.delete(path), &user.token)
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Attach a bearer token to a request
pub fn authorized(request: TestRequest, token: &str) -> TestRequest {
    request.add_header(AUTHORIZATION, auth_header(token))
}

/// Create authorization header value
pub fn auth_header(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("token is a valid header value")
}
