//! Questions API client configuration.
//!
//! Defaults point to the hosted API. Override via environment variables or
//! explicit construction for local servers and tests.

use url::Url;

/// Hosted API used when `QUESTIONS_CLI_API_URL` is not set.
pub const DEFAULT_API_URL: &str = "https://api-questions.herokuapp.com";

/// Configuration for connecting to the Questions API.
///
/// Custom `Debug` implementation redacts the `api_token` field
/// to prevent credential leakage in log output.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without the `/api/v1` prefix.
    pub api_url: Url,
    /// Bearer token, sent when present.
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_url", &self.api_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `QUESTIONS_CLI_API_URL` (default: [`DEFAULT_API_URL`])
    /// - `QUESTIONS_API_TOKEN` (optional)
    /// - `QUESTIONS_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let timeout_secs = match std::env::var("QUESTIONS_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout(raw))?,
            Err(_) => 30,
        };

        Ok(Self {
            api_url: env_url("QUESTIONS_CLI_API_URL", DEFAULT_API_URL)?,
            api_token: std::env::var("QUESTIONS_API_TOKEN")
                .ok()
                .filter(|t| !t.is_empty()),
            timeout_secs,
        })
    }

    /// Configuration for an explicit base URL, without a token.
    pub fn with_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url("api_url", api_url)?,
            api_token: None,
            timeout_secs: 30,
        })
    }

    /// Replace the base URL.
    pub fn api_url(mut self, api_url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_url("api_url", api_url)?;
        Ok(self)
    }
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    parse_url(var, &raw)
}

fn parse_url(name: &str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidUrl(name.to_string(), e.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("QUESTIONS_TIMEOUT_SECS must be a whole number of seconds, got '{0}'")]
    InvalidTimeout(String),
    #[error("QUESTIONS_API_TOKEN contains characters not allowed in an HTTP header")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_url_builds_valid_config() {
        let cfg = ClientConfig::with_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:9000/");
        assert!(cfg.api_token.is_none());
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn api_url_override_replaces_base() {
        let cfg = ClientConfig::with_url(DEFAULT_API_URL)
            .unwrap()
            .api_url("http://localhost:8080")
            .unwrap();
        assert_eq!(cfg.api_url.host_str(), Some("localhost"));
    }

    #[test]
    fn invalid_url_is_rejected() {
        assert!(matches!(
            ClientConfig::with_url("not a url"),
            Err(ConfigError::InvalidUrl(_, _))
        ));
    }

    #[test]
    fn env_url_uses_default_when_var_absent() {
        let url = env_url("QUESTIONS_NONEXISTENT_VAR_12345", DEFAULT_API_URL).unwrap();
        assert_eq!(url.as_str(), "https://api-questions.herokuapp.com/");
    }

    #[test]
    fn debug_redacts_token() {
        let mut cfg = ClientConfig::with_url(DEFAULT_API_URL).unwrap();
        cfg.api_token = Some("hunter2".into());
        let debug = format!("{cfg:?}");
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("[REDACTED]"));
    }
}
