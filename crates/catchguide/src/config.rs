//! Settings and secret loading.
//!
//! Settings live in a TOML file shaped like:
//!
//! ```toml
//! OpenAI_key = "sk-..."
//!
//! [catchguide]
//! model = "gpt-4o-mini"
//! identify_max_tokens = 300
//! regulation_max_tokens = 700
//! request_timeout_secs = 60
//! connect_timeout_secs = 10
//! document_path = "2025fishingregulationssummary.pdf"
//! tips_path = "tips.txt"
//! region = "Ontario, Canada"
//! ```
//!
//! A missing file yields the defaults. The key falls back to the
//! `OPENAI_API_KEY` environment variable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{CatchguideError, Result};
use crate::llm::LlmConfig;

/// Default location of the settings file.
pub const DEFAULT_SETTINGS_PATH: &str = "secrets.toml";

/// Environment variable consulted when the file has no key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level settings file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Provider API key.
    #[serde(rename = "OpenAI_key", default)]
    pub openai_key: Option<String>,

    /// Workflow and path settings.
    #[serde(default)]
    pub catchguide: WorkflowSettings,
}

/// Tunables for the workflow and its collaborators.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WorkflowSettings {
    pub model: String,
    pub base_url: String,
    pub identify_max_tokens: usize,
    pub regulation_max_tokens: usize,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub document_path: PathBuf,
    pub tips_path: PathBuf,
    pub region: String,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        let llm = LlmConfig::default();
        Self {
            model: llm.model,
            base_url: llm.base_url,
            identify_max_tokens: 300,
            regulation_max_tokens: 700,
            request_timeout_secs: llm.request_timeout.as_secs(),
            connect_timeout_secs: llm.connect_timeout.as_secs(),
            document_path: PathBuf::from("2025fishingregulationssummary.pdf"),
            tips_path: PathBuf::from("tips.txt"),
            region: "Ontario, Canada".to_string(),
        }
    }
}

impl WorkflowSettings {
    /// Reject values that would make every provider call fail.
    pub fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(CatchguideError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.connect_timeout_secs == 0 {
            return Err(CatchguideError::Config(
                "connect_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Settings {
    /// Load settings from a file, falling back to defaults if it is absent.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "settings file not found, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|source| CatchguideError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        let settings: Self = toml::from_str(text)?;
        settings.catchguide.validate()?;
        Ok(settings)
    }

    /// The API key from the file, else from the environment.
    pub fn api_key(&self) -> Result<String> {
        let usable = |key: String| {
            let key = key.trim().to_string();
            (!key.is_empty()).then_some(key)
        };
        self.openai_key
            .clone()
            .and_then(usable)
            .or_else(|| std::env::var(API_KEY_ENV).ok().and_then(usable))
            .ok_or_else(CatchguideError::missing_key)
    }

    /// Provider configuration derived from these settings.
    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            model: self.catchguide.model.clone(),
            base_url: self.catchguide.base_url.clone(),
            request_timeout: Duration::from_secs(self.catchguide.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.catchguide.connect_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let settings = Settings::from_toml(
            r#"
OpenAI_key = "sk-test"

[catchguide]
model = "gpt-4o"
identify_max_tokens = 200
request_timeout_secs = 30
document_path = "regs/2025.pdf"
region = "Manitoba, Canada"
"#,
        )
        .unwrap();

        assert_eq!(settings.api_key().unwrap(), "sk-test");
        assert_eq!(settings.catchguide.model, "gpt-4o");
        assert_eq!(settings.catchguide.identify_max_tokens, 200);
        assert_eq!(settings.catchguide.regulation_max_tokens, 700);
        assert_eq!(settings.catchguide.document_path, PathBuf::from("regs/2025.pdf"));
        assert_eq!(settings.catchguide.region, "Manitoba, Canada");

        let llm = settings.llm_config();
        assert_eq!(llm.request_timeout, Duration::from_secs(30));
        assert_eq!(llm.connect_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();
        assert_eq!(settings.catchguide.model, "gpt-4o-mini");
        assert_eq!(settings.catchguide.identify_max_tokens, 300);
        assert_eq!(settings.catchguide.tips_path, PathBuf::from("tips.txt"));
    }

    #[test]
    fn test_blank_key_is_missing() {
        let settings = Settings::from_toml("OpenAI_key = \"   \"").unwrap();
        if std::env::var(API_KEY_ENV).is_err() {
            let err = settings.api_key().unwrap_err();
            assert_eq!(err.to_string(), "OpenAI API key not found in secrets.");
        }
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/catchguide/secrets.toml").unwrap();
        assert!(settings.openai_key.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let err = Settings::from_toml("[catchguide]\nrequest_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, CatchguideError::Config(ref msg) if msg.contains("request_timeout_secs")));

        let err = Settings::from_toml("[catchguide]\nconnect_timeout_secs = 0").unwrap_err();
        assert!(matches!(err, CatchguideError::Config(ref msg) if msg.contains("connect_timeout_secs")));
    }

    #[test]
    fn test_zero_timeout_rejected_on_load() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(b"[catchguide]\nrequest_timeout_secs = 0\n")
            .expect("Failed to write");

        assert!(matches!(
            Settings::load(file.path()),
            Err(CatchguideError::Config(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            Settings::from_toml("OpenAI_key = "),
            Err(CatchguideError::Toml(_))
        ));
    }
}
