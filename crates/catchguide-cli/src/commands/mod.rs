//! CLI command implementations.

pub mod identify;
pub mod serve;
pub mod tip;

use std::path::PathBuf;
use std::sync::Arc;

use catchguide::{InferenceGateway, MockGateway, OpenAiGateway, Orchestrator, Settings};

use crate::cli::LlmProviderChoice;

/// Build the gateway for the chosen provider.
///
/// Fails with the key-not-found message when OpenAI is chosen without a key.
pub fn build_gateway(
    settings: &Settings,
    choice: &LlmProviderChoice,
) -> catchguide::Result<Arc<dyn InferenceGateway>> {
    let gateway: Arc<dyn InferenceGateway> = match choice {
        LlmProviderChoice::OpenAI => Arc::new(OpenAiGateway::from_settings(settings)?),
        LlmProviderChoice::Mock => Arc::new(MockGateway::new()),
    };
    Ok(gateway)
}

/// Build an orchestrator, applying a document override if given.
pub fn build_orchestrator(
    settings: &Settings,
    choice: &LlmProviderChoice,
    document: Option<PathBuf>,
) -> catchguide::Result<Orchestrator> {
    let mut settings = settings.clone();
    if let Some(document) = document {
        settings.catchguide.document_path = document;
    }
    let gateway = build_gateway(&settings, choice)?;
    Ok(Orchestrator::from_settings(gateway, &settings))
}
