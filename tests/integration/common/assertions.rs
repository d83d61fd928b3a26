//! Custom assertion macros
//!
//! Assertions over `TestResponse` that print the body on failure. Each
//! macro evaluates its response expression exactly once.

/// Assert a response status, showing the body if it differs
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        assert_eq!(response.status, $status, "unexpected status, body: {}", response.body);
    }};
}

/// Assert an error response: status plus the `{message, status}` body shape
#[macro_export]
macro_rules! assert_error {
    ($response:expr, $status:expr) => {{
        let response = &$response;
        let status: axum::http::StatusCode = $status;
        assert_eq!(response.status, status, "unexpected status, body: {}", response.body);
        assert!(response.body["message"].is_string(), "error body has no message: {}", response.body);
        assert_eq!(response.body["status"], status.as_u16());
    }};
    ($response:expr, $status:expr, $message:expr) => {{
        let response = &$response;
        $crate::assert_error!(*response, $status);
        assert_eq!(response.body["message"], $message);
    }};
}
