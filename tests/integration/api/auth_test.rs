//! Authentication API integration tests
//!
//! Tests for signup, login, the auth middleware, user queries and the
//! password-reset flow.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;

use listshare::backend::auth::{AuthResponse, TokenPurpose};
use listshare::shared::model::UserProfile;

use crate::assert_contains;
use crate::common::{assert_error, authorized, TestApp, TEST_PASSWORD};

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/users/signup")
        .json(&json!({
            "email": "  Jane@Example.com ",
            "password": "password123",
            "name": "Jane"
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert!(body.get("token").is_some());
    assert_eq!(body["user"]["email"], "jane@example.com");
    assert_eq!(body["user"]["name"], "Jane");
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_rejects_bad_email_and_weak_password() {
    let app = TestApp::new();

    let response = app
        .server
        .post("/users/signup")
        .json(&json!({ "email": "bad-email", "password": "password123", "name": "Jane" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/users/signup")
        .json(&json!({ "email": "jane@example.com", "password": "weak", "name": "Jane" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    let response = app
        .server
        .post("/users/signup")
        .json(&json!({ "email": "jane@example.com", "password": "password123" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new();
    let user = app.signup("Jane").await;

    let response = app
        .server
        .post("/users/signup")
        .json(&json!({ "email": user.email.to_uppercase(), "password": TEST_PASSWORD, "name": "Other" }))
        .await;

    assert_error(&response, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new();
    let user = app.signup("Jane").await;

    let response = app
        .server
        .post("/users/login")
        .json(&json!({ "email": user.email, "password": TEST_PASSWORD }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: AuthResponse = response.json();
    assert_eq!(body.user.id, user.id);
    assert_eq!(app.keys.verify(&body.token, TokenPurpose::Session).unwrap().user_id().unwrap(), user.id);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::new();
    let user = app.signup("Jane").await;

    let wrong_password = app
        .server
        .post("/users/login")
        .json(&json!({ "email": user.email, "password": "wrongpassword1" }))
        .await;
    let unknown_email = app
        .server
        .post("/users/login")
        .json(&json!({ "email": "nobody@example.com", "password": TEST_PASSWORD }))
        .await;

    assert_eq!(
        assert_error(&wrong_password, StatusCode::UNAUTHORIZED),
        assert_error(&unknown_email, StatusCode::UNAUTHORIZED)
    );
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new();

    for path in ["/users", "/lists", "/groups", "/items"] {
        let response = app.server.get(path).await;
        assert_error(&response, StatusCode::UNAUTHORIZED);
    }

    let response = authorized(app.server.get("/lists"), "not.a.token").await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_missing_user_is_rejected() {
    let app = TestApp::new();
    let token = app
        .keys
        .issue(Uuid::new_v4(), "ghost@example.com", TokenPurpose::Session)
        .unwrap();

    let response = authorized(app.server.get("/lists"), &token).await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_user_by_id_or_email() {
    let app = TestApp::new();
    let jane = app.signup("Jane").await;
    let bob = app.signup("Bob").await;

    let by_id: UserProfile = app.get(&format!("/users/{}", bob.id), &jane).await.json();
    assert_eq!(by_id.email, bob.email);

    let by_email: UserProfile = app.get(&format!("/users/{}", bob.email), &jane).await.json();
    assert_eq!(by_email.id, bob.id);

    let all: Vec<UserProfile> = app.get("/users", &jane).await.json();
    assert_eq!(all.len(), 2);

    let response = app.get("/users/not-a-uuid", &jane).await;
    assert_error(&response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_password_reset_flow() {
    let app = TestApp::new();
    let user = app.signup("Jane").await;

    let response = app
        .server
        .post("/users/password-reset-email")
        .json(&json!({ "email": user.email }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, user.email);

    let token = app
        .keys
        .issue(user.id, &user.email, TokenPurpose::PasswordReset)
        .unwrap();
    assert_contains!(sent[0].body, "http://lists.test/password-reset/");
    assert_contains!(sent[0].body, &format!("/{}", user.id));

    let response = app
        .server
        .get(&format!("/users/password-reset/{}/{}", token, user.id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = app
        .server
        .put(&format!("/users/password-reset/{}/{}/password-form", token, user.id))
        .json(&json!({ "password": "newpassword456" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let old = app
        .server
        .post("/users/login")
        .json(&json!({ "email": user.email, "password": TEST_PASSWORD }))
        .await;
    assert_error(&old, StatusCode::UNAUTHORIZED);

    let new = app
        .server
        .post("/users/login")
        .json(&json!({ "email": user.email, "password": "newpassword456" }))
        .await;
    assert_eq!(new.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn test_password_reset_rejects_foreign_or_bad_tokens() {
    let app = TestApp::new();
    let jane = app.signup("Jane").await;
    let bob = app.signup("Bob").await;

    let response = app
        .server
        .post("/users/password-reset-email")
        .json(&json!({ "email": "nobody@example.com" }))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let bobs_token = app.keys.issue(bob.id, &bob.email, TokenPurpose::PasswordReset).unwrap();
    let response = app
        .server
        .get(&format!("/users/password-reset/{}/{}", bobs_token, jane.id))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/users/password-reset/garbage/{}", jane.id))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/users/password-reset/{}/{}", bobs_token, Uuid::new_v4()))
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    let jane_token = app.keys.issue(jane.id, &jane.email, TokenPurpose::PasswordReset).unwrap();
    let response = app
        .server
        .put(&format!("/users/password-reset/{}/{}/password-form", jane_token, jane.id))
        .json(&json!({ "password": "weak" }))
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reset_and_session_tokens_are_not_interchangeable() {
    let app = TestApp::new();
    let jane = app.signup("Jane").await;

    let reset_token = app
        .keys
        .issue(jane.id, &jane.email, TokenPurpose::PasswordReset)
        .unwrap();
    let response = authorized(app.server.get("/lists"), &reset_token).await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/users/password-reset/{}/{}", jane.token, jane.id))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .put(&format!("/users/password-reset/{}/{}/password-form", jane.token, jane.id))
        .json(&json!({ "password": "newpassword456" }))
        .await;
    assert_error(&response, StatusCode::UNAUTHORIZED);
}
