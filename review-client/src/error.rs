//! Error types for the review client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the review client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Backend rejected the credentials (HTTP 401); the session has been cleared
    #[error("Not authenticated: {0}")]
    Unauthorized(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Input rejected locally, no request was sent
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Local file or token storage failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error ended the session
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized(_))
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        self.is_unauthorized()
            || matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

/// Extract a display message from an error response body
///
/// The backend reports errors as `{"detail": "..."}`, or as a list of
/// `{"msg": "..."}` entries for request validation failures.
pub(crate) fn error_message(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "Unknown error".to_string();
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => detail.clone(),
        Some(serde_json::Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if messages.is_empty() {
                body.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string() {
        assert_eq!(
            error_message(r#"{"detail": "Project not found"}"#),
            "Project not found"
        );
    }

    #[test]
    fn test_detail_list() {
        let body = r#"{"detail": [
            {"loc": ["body", "name"], "msg": "field required", "type": "missing"},
            {"loc": ["body", "source"], "msg": "invalid enum", "type": "enum"}
        ]}"#;
        assert_eq!(error_message(body), "field required; invalid enum");
    }

    #[test]
    fn test_plain_body_and_empty_body() {
        assert_eq!(error_message("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_message(""), "Unknown error");
    }

    #[test]
    fn test_error_classification() {
        assert!(ClientError::api_error(404, "x").is_not_found());
        assert!(ClientError::api_error(422, "x").is_client_error());
        assert!(ClientError::api_error(503, "x").is_server_error());
        assert!(ClientError::Unauthorized("x".into()).is_client_error());
        assert!(!ClientError::api_error(500, "x").is_client_error());
    }
}
