//! Custom assertion macros and utilities
//!
//! Provides enhanced assertions for better test output and more
//! descriptive error messages.

use axum::http::StatusCode;
use axum_test::TestResponse;

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert an error response and return its message
///
/// Checks the status and the `{"error", "status"}` body shape.
pub fn assert_error(response: &TestResponse, status: StatusCode) -> String {
    assert_eq!(
        response.status_code(),
        status,
        "unexpected status, body: {}",
        response.text()
    );
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], status.as_u16(), "status field mismatch in {}", body);
    body["error"]
        .as_str()
        .unwrap_or_else(|| panic!("error field missing in {}", body))
        .to_string()
}
