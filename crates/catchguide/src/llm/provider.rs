//! Inference gateway trait and types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::input::CapturedImage;

/// Result type for gateway calls.
pub type GatewayResult<T> = std::result::Result<T, ProviderError>;

/// Opaque identifier of a document stored with the provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentHandle(String);

impl DocumentHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Configuration for hosted providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,

    /// API base URL, without trailing slash.
    pub base_url: String,

    /// Upper bound on a whole request, including the response body.
    pub request_timeout: Duration,

    /// Upper bound on establishing the connection.
    pub connect_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            request_timeout: Duration::from_secs(60),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Client abstraction over a hosted multimodal completion service.
///
/// Implementations must be thread-safe (Send + Sync) so one gateway can back
/// every request served by the process.
pub trait InferenceGateway: Send + Sync {
    /// Ask the model what fish is in the image.
    ///
    /// Returns the text of the first response choice.
    fn identify(&self, image: &CapturedImage, max_tokens: usize) -> GatewayResult<String>;

    /// Store a document with the provider for later reference.
    fn register_document(&self, file_name: &str, bytes: &[u8]) -> GatewayResult<DocumentHandle>;

    /// Send a text prompt that refers to a registered document by id.
    fn lookup_regulation(&self, prompt: &str, max_tokens: usize) -> GatewayResult<String>;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}
