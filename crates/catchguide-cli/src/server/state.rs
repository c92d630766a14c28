//! Application state for the web server.

use std::path::PathBuf;
use std::sync::Arc;

use catchguide::Orchestrator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Workflow runner; owns the document handle for the life of the process.
    /// If None, identification is disabled and `config_error` says why.
    pub orchestrator: Option<Arc<Orchestrator>>,
    /// Message shown when no orchestrator could be built.
    pub config_error: Option<String>,
    /// Path to the tips file.
    pub tips_path: PathBuf,
}

impl AppState {
    /// Create state with a working orchestrator.
    pub fn new(orchestrator: Orchestrator, tips_path: PathBuf) -> Self {
        Self {
            orchestrator: Some(Arc::new(orchestrator)),
            config_error: None,
            tips_path,
        }
    }

    /// Create state whose identification requests report a configuration error.
    pub fn unconfigured(message: impl Into<String>, tips_path: PathBuf) -> Self {
        Self {
            orchestrator: None,
            config_error: Some(message.into()),
            tips_path,
        }
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<String> {
        self.orchestrator
            .as_ref()
            .map(|o| o.gateway().name().to_string())
    }
}
