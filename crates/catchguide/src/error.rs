//! Error types for the Catchguide library.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown when no API key can be found.
pub const MISSING_KEY_MESSAGE: &str = "OpenAI API key not found in secrets.";

/// Main error type for Catchguide operations.
#[derive(Debug, Error)]
pub enum CatchguideError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error (missing key, unusable settings).
    #[error("{0}")]
    Config(String),

    /// Failure reported by the inference gateway.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Tip file missing or empty.
    #[error(transparent)]
    TipSource(#[from] TipSourceError),

    /// Settings file could not be parsed.
    #[error("Invalid settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl CatchguideError {
    /// Error raised when the provider API key is absent.
    pub fn missing_key() -> Self {
        CatchguideError::Config(MISSING_KEY_MESSAGE.to_string())
    }

    /// Single user-facing line for this error.
    pub fn user_message(&self) -> String {
        format!("Error: {}", self)
    }
}

/// Errors from a hosted inference provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The request never produced a response.
    #[error("request to {provider} failed: {message}")]
    Transport { provider: String, message: String },

    /// The request exceeded the configured timeout.
    #[error("request to {provider} timed out after {secs}s")]
    Timeout { provider: String, secs: u64 },

    /// The provider rejected the credentials.
    #[error("{provider} rejected the API key (status {status})")]
    Auth { provider: String, status: u16 },

    /// Quota or rate limit reached.
    #[error("{provider} rate limit or quota exceeded: {body}")]
    RateLimited { provider: String, body: String },

    /// Any other non-success status.
    #[error("{provider} API error ({status}): {body}")]
    Api {
        provider: String,
        status: u16,
        body: String,
    },

    /// The response could not be understood.
    #[error("malformed response from {provider}: {message}")]
    Malformed { provider: String, message: String },
}

impl ProviderError {
    /// Build a malformed-response error.
    pub fn malformed(provider: impl Into<String>, message: impl Into<String>) -> Self {
        ProviderError::Malformed {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Map an HTTP status and body to the matching variant.
    pub fn from_status(provider: impl Into<String>, status: u16, body: String) -> Self {
        let provider = provider.into();
        match status {
            401 | 403 => ProviderError::Auth { provider, status },
            429 => ProviderError::RateLimited { provider, body },
            _ => ProviderError::Api {
                provider,
                status,
                body,
            },
        }
    }
}

/// Errors from the tip source.
#[derive(Debug, Error)]
pub enum TipSourceError {
    /// The tips file does not exist.
    #[error("The tips file '{}' was not found. Please ensure it exists.", .0.display())]
    NotFound(PathBuf),

    /// The tips file has no usable lines.
    #[error("No tips available in the tips file.")]
    Empty(PathBuf),

    /// The tips file exists but could not be read.
    #[error("Could not read tips file '{}': {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Catchguide operations.
pub type Result<T> = std::result::Result<T, CatchguideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            ProviderError::from_status("openai", 401, String::new()),
            ProviderError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ProviderError::from_status("openai", 429, "quota".into()),
            ProviderError::RateLimited { .. }
        ));
        assert!(matches!(
            ProviderError::from_status("openai", 500, "boom".into()),
            ProviderError::Api { status: 500, .. }
        ));
    }

    #[test]
    fn test_user_message() {
        let err = CatchguideError::missing_key();
        assert_eq!(
            err.user_message(),
            "Error: OpenAI API key not found in secrets."
        );

        let err = CatchguideError::from(ProviderError::Timeout {
            provider: "openai".into(),
            secs: 60,
        });
        assert_eq!(err.user_message(), "Error: request to openai timed out after 60s");
    }
}
