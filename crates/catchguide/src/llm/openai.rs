//! OpenAI API gateway implementation.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::Settings;
use crate::error::{CatchguideError, ProviderError, Result};
use crate::input::CapturedImage;

use super::prompts;
use super::provider::{DocumentHandle, GatewayResult, InferenceGateway, LlmConfig};

const PROVIDER: &str = "openai";

/// Purpose tag for uploaded reference documents.
const FILE_PURPOSE: &str = "assistants";

/// OpenAI chat-completions and files gateway.
pub struct OpenAiGateway {
    client: Client,
    api_key: String,
    config: LlmConfig,
}

impl OpenAiGateway {
    /// Create a new gateway with the given API key and default configuration.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new gateway with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| CatchguideError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Create from loaded settings; fails when no API key is available.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.api_key()?;
        Self::with_config(api_key, settings.llm_config())
    }

    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> GatewayResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let value = HeaderValue::from_str(&format!("Bearer {}", self.api_key)).map_err(|_| {
            ProviderError::Auth {
                provider: PROVIDER.to_string(),
                status: 0,
            }
        })?;
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    /// Send a request and reject non-success statuses.
    fn execute(&self, request: RequestBuilder) -> GatewayResult<Response> {
        let response = request
            .headers(self.build_headers()?)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "openai request rejected");
            return Err(ProviderError::from_status(PROVIDER, status.as_u16(), body));
        }
        Ok(response)
    }

    fn transport_error(&self, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            ProviderError::Timeout {
                provider: PROVIDER.to_string(),
                secs: self.config.request_timeout.as_secs(),
            }
        } else {
            ProviderError::Transport {
                provider: PROVIDER.to_string(),
                message: error.to_string(),
            }
        }
    }

    /// Send one user message and return the first choice's text.
    fn send_message(&self, content: Value, max_tokens: usize) -> GatewayResult<String> {
        let body = chat_body(&self.config.model, content, max_tokens);
        let response = self.execute(self.client.post(self.endpoint("chat/completions")).json(&body))?;

        let api_response: ChatResponse = response
            .json()
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("Failed to parse API response: {}", e)))?;

        first_choice_text(api_response)
    }
}

impl InferenceGateway for OpenAiGateway {
    fn identify(&self, image: &CapturedImage, max_tokens: usize) -> GatewayResult<String> {
        self.send_message(identify_content(image), max_tokens)
    }

    fn register_document(&self, file_name: &str, bytes: &[u8]) -> GatewayResult<DocumentHandle> {
        let part = Part::bytes(bytes.to_vec())
            .file_name(file_name.to_string())
            .mime_str("application/pdf")
            .map_err(|e| self.transport_error(e))?;
        let form = Form::new().text("purpose", FILE_PURPOSE).part("file", part);

        let response = self.execute(self.client.post(self.endpoint("files")).multipart(form))?;
        let uploaded: FileObject = response
            .json()
            .map_err(|e| ProviderError::malformed(PROVIDER, format!("Failed to parse file response: {}", e)))?;

        if uploaded.id.is_empty() {
            return Err(ProviderError::malformed(PROVIDER, "file response has an empty id"));
        }
        Ok(DocumentHandle::new(uploaded.id))
    }

    fn lookup_regulation(&self, prompt: &str, max_tokens: usize) -> GatewayResult<String> {
        self.send_message(Value::String(prompt.to_string()), max_tokens)
    }

    fn name(&self) -> &str {
        PROVIDER
    }
}

/// Request body for a single-message chat completion.
fn chat_body(model: &str, content: Value, max_tokens: usize) -> Value {
    json!({
        "model": model,
        "max_tokens": max_tokens,
        "messages": [
            {
                "role": "user",
                "content": content
            }
        ]
    })
}

/// Multimodal content: the identification question plus the inline image.
fn identify_content(image: &CapturedImage) -> Value {
    json!([
        { "type": "text", "text": prompts::IDENTIFY_PROMPT },
        { "type": "image_url", "image_url": { "url": image.data_url() } }
    ])
}

fn first_choice_text(response: ChatResponse) -> GatewayResult<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::malformed(PROVIDER, "No response text from OpenAI"))
}

/// OpenAI chat response structure.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// Uploaded file record.
#[derive(Debug, Deserialize)]
struct FileObject {
    id: String,
}
