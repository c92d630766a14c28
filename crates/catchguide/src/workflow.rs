//! Two-stage identification and regulation workflow.

use std::sync::Arc;

use serde::Serialize;

use crate::config::Settings;
use crate::error::{ProviderError, Result};
use crate::input::{CapturedImage, Coordinate, Submission};
use crate::llm::{prompts, InferenceGateway};
use crate::registrar::{DocumentRegistrar, Registration};
use crate::species::SpeciesLabel;

/// Plain-language regulation answer for one catch.
pub type RegulationSummary = String;

/// Configuration for a workflow run.
#[derive(Debug, Clone)]
pub struct WorkflowConfig {
    /// Token budget for the identification answer.
    pub identify_max_tokens: usize,
    /// Token budget for the regulation answer.
    pub regulation_max_tokens: usize,
    /// Region named in the regulation prompt.
    pub region: String,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            identify_max_tokens: 300,
            regulation_max_tokens: 700,
            region: "Ontario, Canada".to_string(),
        }
    }
}

impl From<&Settings> for WorkflowConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            identify_max_tokens: settings.catchguide.identify_max_tokens,
            regulation_max_tokens: settings.catchguide.regulation_max_tokens,
            region: settings.catchguide.region.clone(),
        }
    }
}

/// Everything a presenter shows after a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    /// Raw identification answer.
    pub identification: String,
    /// Label derived from the identification answer.
    pub species: SpeciesLabel,
    /// Notice about the reference document upload.
    pub registration_notice: String,
    /// Regulation answer.
    pub regulation: RegulationSummary,
    #[serde(skip)]
    pub registration: Registration,
}

/// Result of a submission at the presenter boundary.
#[derive(Debug, Clone)]
pub enum Outcome {
    /// Image or coordinate missing; nothing was attempted.
    Skipped,
    /// All stages succeeded.
    Completed(WorkflowReport),
    /// A stage failed; the message is ready for display.
    Failed { message: String },
}

/// Sequences identification, document registration and regulation lookup.
///
/// Owns the document registrar, so the document handle lives exactly as
/// long as the orchestrator.
pub struct Orchestrator {
    gateway: Arc<dyn InferenceGateway>,
    registrar: DocumentRegistrar,
    config: WorkflowConfig,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn InferenceGateway>, registrar: DocumentRegistrar) -> Self {
        Self::with_config(gateway, registrar, WorkflowConfig::default())
    }

    pub fn with_config(
        gateway: Arc<dyn InferenceGateway>,
        registrar: DocumentRegistrar,
        config: WorkflowConfig,
    ) -> Self {
        Self {
            gateway,
            registrar,
            config,
        }
    }

    /// Build an orchestrator from settings around an existing gateway.
    pub fn from_settings(gateway: Arc<dyn InferenceGateway>, settings: &Settings) -> Self {
        Self::with_config(
            gateway,
            DocumentRegistrar::new(settings.catchguide.document_path.clone()),
            WorkflowConfig::from(settings),
        )
    }

    pub fn gateway(&self) -> &dyn InferenceGateway {
        self.gateway.as_ref()
    }

    pub fn registrar(&self) -> &DocumentRegistrar {
        &self.registrar
    }

    /// Run the workflow and return only the regulation summary.
    pub fn run(&self, image: &CapturedImage, coordinate: Coordinate) -> Result<RegulationSummary> {
        self.run_report(image, coordinate).map(|report| report.regulation)
    }

    /// Run the workflow and return every intermediate output.
    ///
    /// Any failure aborts the run. Nothing is retried.
    pub fn run_report(&self, image: &CapturedImage, coordinate: Coordinate) -> Result<WorkflowReport> {
        let gateway = self.gateway.as_ref();
        tracing::info!(
            provider = gateway.name(),
            image_bytes = image.len(),
            mime = image.mime(),
            latitude = coordinate.latitude,
            longitude = coordinate.longitude,
            "starting identification"
        );

        let identification = gateway.identify(image, self.config.identify_max_tokens)?;
        let species = SpeciesLabel::from_identification(&identification).ok_or_else(|| {
            ProviderError::malformed(gateway.name(), "identification answer was empty")
        })?;
        tracing::info!(species = %species, "species identified");

        let registration = self.registrar.ensure_registered(gateway)?;

        let prompt = prompts::regulation_prompt(
            &coordinate,
            &self.config.region,
            &registration.handle,
            &species,
        );
        let regulation = gateway.lookup_regulation(&prompt, self.config.regulation_max_tokens)?;
        tracing::info!(species = %species, document = %registration.handle, "regulation lookup complete");

        Ok(WorkflowReport {
            identification,
            species,
            registration_notice: registration.notice(),
            regulation,
            registration,
        })
    }

    /// Outer boundary: skip incomplete submissions, flatten failures to one message.
    pub fn submit(&self, submission: Submission) -> Outcome {
        let Some((image, coordinate)) = submission.complete() else {
            tracing::debug!("submission incomplete, workflow not started");
            return Outcome::Skipped;
        };

        match self.run_report(&image, coordinate) {
            Ok(report) => Outcome::Completed(report),
            Err(e) => {
                tracing::warn!(error = %e, "workflow failed");
                Outcome::Failed {
                    message: e.user_message(),
                }
            }
        }
    }
}
