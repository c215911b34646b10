//! Error types for the deskmcp server.
//!
//! This module defines `DeskError`, the error type for configuration and
//! remote calls, and `ArgumentError`, raised when tool arguments fail
//! validation at the boundary. Tool handlers report the two separately.
//!
//! # Security
//!
//! All error messages are sanitized to ensure the API token is never leaked
//! in logs or error responses. Use `sanitize_message()` when constructing
//! error messages from external sources.

use std::time::Duration;
use thiserror::Error;

/// A tool argument that could not be turned into a typed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    /// The argument was present but carried the wrong JSON type.
    #[error("{field} must be {expected}, got {found}")]
    WrongType {
        /// Name of the offending argument (e.g. `page`, `filter.email`).
        field: String,
        /// Human-readable description of the accepted type.
        expected: &'static str,
        /// Description of what was actually supplied.
        found: String,
    },

    /// A required string argument was empty after trimming.
    #[error("{field} is required and cannot be empty")]
    Empty {
        /// Name of the offending argument.
        field: String,
    },
}

impl ArgumentError {
    /// Creates a type mismatch error for `field`.
    pub fn wrong_type(field: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        ArgumentError::WrongType {
            field: field.into(),
            expected,
            found: found.into(),
        }
    }

    /// Creates an empty-value error for `field`.
    pub fn empty(field: impl Into<String>) -> Self {
        ArgumentError::Empty {
            field: field.into(),
        }
    }

    /// Returns the name of the argument that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ArgumentError::WrongType { field, .. } | ArgumentError::Empty { field } => field,
        }
    }
}

/// Unified error type for all deskmcp operations.
///
/// Each variant provides specific context about the failure, enabling
/// meaningful error messages without leaking the API token.
#[derive(Error, Debug)]
pub enum DeskError {
    /// Configuration error - missing or invalid environment variables.
    #[error("configuration error: {0}")]
    Config(String),

    /// HTTP request failed during transmission.
    #[error("HTTP request failed: {0}")]
    Http(#[source] reqwest::Error),

    /// HTTP client initialization failed.
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// HTTP response returned a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: reqwest::StatusCode,
        /// The response body, potentially containing error details.
        body: String,
    },

    /// Rate limited by the server (HTTP 429).
    #[error("rate limited by server{}", retry_hint(.retry_after))]
    RateLimited {
        /// Suggested retry delay, if provided by server.
        retry_after: Option<Duration>,
    },

    /// JSON serialization or deserialization failed.
    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The response envelope did not contain the expected record key.
    #[error("unexpected response: missing `{0}` field")]
    UnexpectedResponse(String),

    /// Requested resource was not found.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// The kind of resource that was requested.
        resource: String,
        /// The ID of the resource that was not found.
        id: String,
    },

    /// Authentication failed - likely an invalid API token.
    #[error("authentication failed - check DESK_API_TOKEN")]
    Authentication,
}

fn retry_hint(retry_after: &Option<Duration>) -> String {
    match retry_after {
        Some(delay) => format!(" - retry after {}s", delay.as_secs()),
        None => " - please wait before retrying".to_string(),
    }
}

impl DeskError {
    /// Creates a configuration error for a missing environment variable.
    pub fn missing_env(var_name: &str) -> Self {
        DeskError::Config(format!(
            "missing required environment variable: {}",
            var_name
        ))
    }

    /// Creates a configuration error for an invalid value.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        DeskError::Config(message.into())
    }

    /// Creates a not found error.
    pub fn not_found(resource: impl Into<String>, id: impl Into<String>) -> Self {
        DeskError::NotFound {
            resource: resource.into(),
            id: id.into(),
        }
    }

    /// Sanitizes an error message to remove any occurrence of the API token.
    ///
    /// # Arguments
    ///
    /// * `message` - The message to sanitize
    /// * `api_token` - The token to strip from the message
    ///
    /// # Returns
    ///
    /// The message with any occurrence of the token replaced with `[REDACTED]`
    #[must_use]
    pub fn sanitize_message(message: &str, api_token: &str) -> String {
        if api_token.is_empty() {
            return message.to_string();
        }
        message.replace(api_token, "[REDACTED]")
    }

    /// Creates a sanitized version of this error's display message.
    #[must_use]
    pub fn sanitized_display(&self, api_token: &str) -> String {
        Self::sanitize_message(&self.to_string(), api_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_env_error() {
        let err = DeskError::missing_env("DESK_API_TOKEN");
        assert!(err.to_string().contains("DESK_API_TOKEN"));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_not_found_error() {
        let err = DeskError::not_found("ticket", "42");
        assert_eq!(err.to_string(), "ticket not found: 42");
    }

    #[test]
    fn test_argument_error_names_field_and_type() {
        let err = ArgumentError::wrong_type("page", "an integer", "string");
        assert_eq!(err.field(), "page");
        assert_eq!(err.to_string(), "page must be an integer, got string");
    }

    #[test]
    fn test_argument_error_empty() {
        let err = ArgumentError::empty("subject");
        assert_eq!(err.field(), "subject");
        assert_eq!(err.to_string(), "subject is required and cannot be empty");
    }

    #[test]
    fn test_rate_limited_message() {
        let err = DeskError::RateLimited {
            retry_after: Some(Duration::from_secs(5)),
        };
        assert_eq!(err.to_string(), "rate limited by server - retry after 5s");

        let err = DeskError::RateLimited { retry_after: None };
        assert!(err.to_string().contains("please wait"));
    }

    #[test]
    fn test_unexpected_response_message() {
        let err = DeskError::UnexpectedResponse("ticket".to_string());
        assert_eq!(err.to_string(), "unexpected response: missing `ticket` field");
    }

    #[test]
    fn test_sanitize_message_removes_api_token() {
        let api_token = "super_secret_token_12345";
        let message = format!("Error connecting with token {} to server", api_token);
        let sanitized = DeskError::sanitize_message(&message, api_token);
        assert!(!sanitized.contains(api_token));
        assert!(sanitized.contains("[REDACTED]"));
    }

    #[test]
    fn test_sanitize_message_empty_token() {
        let message = "Some error message";
        assert_eq!(DeskError::sanitize_message(message, ""), message);
    }

    #[test]
    fn test_sanitized_display() {
        let err = DeskError::HttpStatus {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "bad token tkn_abc".to_string(),
        };
        let display = err.sanitized_display("tkn_abc");
        assert_eq!(display, "HTTP 400 Bad Request: bad token [REDACTED]");
    }
}
