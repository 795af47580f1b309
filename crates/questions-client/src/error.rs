//! Questions API client error types.

/// Errors from Questions API calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error, after retries.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The API returned a non-2xx status.
    #[error("{endpoint} returned {status}: {description}")]
    Api {
        endpoint: String,
        status: u16,
        /// The envelope's `description`, or the raw body when it is not an envelope.
        description: String,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl ClientError {
    /// Message suitable for showing to an end user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Api { description, .. } => description.clone(),
            other => other.to_string(),
        }
    }
}
