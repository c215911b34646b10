//! Configuration management for the deskmcp server.
//!
//! This module handles loading configuration from environment variables,
//! with validation to ensure all required values are present.

use crate::error::DeskError;
use std::env;
use url::Url;

/// Environment variable holding the helpdesk base URL.
pub const URL_VAR: &str = "DESK_API_URL";

/// Environment variable holding the bearer token.
pub const TOKEN_VAR: &str = "DESK_API_TOKEN";

/// Configuration for connecting to the helpdesk API.
///
/// All fields are required and loaded from environment variables.
/// The token is stored but never logged or exposed in error messages.
#[derive(Clone)]
pub struct Config {
    /// Base URL of the helpdesk site (e.g., `https://acme.teamwork.com`).
    pub base_url: String,

    /// Bearer token for authentication.
    /// This value must never be logged or included in error messages.
    pub api_token: String,
}

impl Config {
    /// Builds a configuration from explicit values, applying the same
    /// validation as [`Config::from_env`].
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Result<Self, DeskError> {
        let base_url = Self::validate_base_url(base_url.into())?;
        let api_token = api_token.into().trim().to_string();
        if api_token.is_empty() {
            return Err(DeskError::missing_env(TOKEN_VAR));
        }
        Self::validate_api_token(&api_token)?;

        Ok(Config {
            base_url,
            api_token,
        })
    }

    /// Loads configuration from environment variables.
    ///
    /// # Required Environment Variables
    ///
    /// - `DESK_API_URL`: The base URL of the helpdesk site
    /// - `DESK_API_TOKEN`: The bearer token for authentication
    ///
    /// # Errors
    ///
    /// Returns `DeskError::Config` if any required variable is missing
    /// or if values fail validation.
    pub fn from_env() -> Result<Self, DeskError> {
        let base_url = Self::get_required_env(URL_VAR)?;
        let api_token = Self::get_required_env(TOKEN_VAR)?;

        Self::new(base_url, api_token)
    }

    /// Gets a required environment variable, returning an error if missing or empty.
    fn get_required_env(name: &str) -> Result<String, DeskError> {
        env::var(name)
            .map_err(|_| DeskError::missing_env(name))
            .and_then(|value| {
                if value.trim().is_empty() {
                    Err(DeskError::missing_env(name))
                } else {
                    Ok(value)
                }
            })
    }

    /// Validates and normalizes the base URL.
    fn validate_base_url(url: String) -> Result<String, DeskError> {
        let url = url.trim().trim_end_matches('/').to_string();

        let parsed = Url::parse(&url).map_err(|e| {
            DeskError::invalid_config(format!("{} is not a valid URL: {}", URL_VAR, e))
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DeskError::invalid_config(format!(
                "{} must start with http:// or https://",
                URL_VAR
            )));
        }
        if parsed.host_str().is_none() {
            return Err(DeskError::invalid_config(format!(
                "{} must include a host",
                URL_VAR
            )));
        }

        Ok(url)
    }

    /// Validates the token is not a placeholder value.
    ///
    /// Matches whole tokens and template prefixes only, never substrings.
    fn validate_api_token(token: &str) -> Result<(), DeskError> {
        let token_lower = token.to_lowercase();
        let placeholders = ["placeholder", "changeme", "token", "api_token"];

        let is_placeholder = token_lower.starts_with("your_")
            || token_lower.starts_with('<')
            || token_lower.bytes().all(|b| b == b'x')
            || placeholders.contains(&token_lower.as_str());

        if is_placeholder {
            return Err(DeskError::invalid_config(format!(
                "{} appears to be a placeholder value",
                TOKEN_VAR
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_base_url_removes_trailing_slash() {
        let result = Config::validate_base_url("https://acme.teamwork.com/".to_string()).unwrap();
        assert_eq!(result, "https://acme.teamwork.com");
    }

    #[test]
    fn test_validate_base_url_requires_scheme() {
        assert!(Config::validate_base_url("acme.teamwork.com".to_string()).is_err());
        assert!(Config::validate_base_url("ftp://acme.teamwork.com".to_string()).is_err());
    }

    #[test]
    fn test_validate_base_url_keeps_path() {
        let result =
            Config::validate_base_url(" https://acme.teamwork.com/desk/api/v2/ ".to_string())
                .unwrap();
        assert_eq!(result, "https://acme.teamwork.com/desk/api/v2");
    }

    #[test]
    fn test_validate_api_token_rejects_placeholder() {
        let err = Config::validate_api_token("your_api_token_here").unwrap_err();
        assert!(err.to_string().contains(TOKEN_VAR));
    }

    #[test]
    fn test_validate_api_token_rejects_whole_placeholders() {
        for token in ["changeme", "XXXX", "<your token>", "your_token"] {
            assert!(Config::validate_api_token(token).is_err(), "{}", token);
        }
    }

    #[test]
    fn test_validate_api_token_accepts_real_token() {
        assert!(Config::validate_api_token("tkn_8f2a91c0").is_ok());
    }

    #[test]
    fn test_validate_api_token_accepts_token_containing_xxx() {
        assert!(Config::validate_api_token("tkn_a1xxx9b2").is_ok());
        assert!(Config::new("https://acme.teamwork.com", "q8xxxZ0placeholderish").is_ok());
    }

    #[test]
    fn test_new_rejects_blank_token() {
        let err = Config::new("https://acme.teamwork.com", "   ").err().unwrap();
        assert!(err.to_string().contains("DESK_API_TOKEN"));
    }

    #[test]
    fn test_new_trims_token() {
        let config = Config::new("https://acme.teamwork.com", " tkn_8f2a91c0 ").unwrap();
        assert_eq!(config.api_token, "tkn_8f2a91c0");
        assert_eq!(config.base_url, "https://acme.teamwork.com");
    }
}
