//! Catchguide: identify a catch from a photo and look up the fishing rules
//! that apply where it was caught.
//!
//! A submission (photo + GPS fix) runs through two inference stages against a
//! hosted vision-capable model:
//!
//! 1. the photo is sent with a "what fish is this?" prompt and a species label
//!    is derived from the answer;
//! 2. a regulation prompt naming the coordinates, the species and a
//!    once-uploaded regulation document asks for the zone, season and limit.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use catchguide::{CapturedImage, Coordinate, OpenAiGateway, Orchestrator, Settings};
//!
//! let settings = Settings::load("secrets.toml").unwrap();
//! let gateway = Arc::new(OpenAiGateway::from_settings(&settings).unwrap());
//! let orchestrator = Orchestrator::from_settings(gateway, &settings);
//!
//! let image = CapturedImage::from_path("catch.jpg").unwrap();
//! let summary = orchestrator.run(&image, Coordinate::new(44.9, -79.4)).unwrap();
//! println!("{}", summary);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod registrar;
pub mod species;
pub mod tips;
pub mod workflow;

pub use config::{Settings, WorkflowSettings};
pub use error::{CatchguideError, ProviderError, Result, TipSourceError};
pub use input::{CapturedImage, Coordinate, Submission};
pub use llm::{DocumentHandle, InferenceGateway, LlmConfig, MockGateway, OpenAiGateway};
pub use registrar::{DocumentRegistrar, Registration};
pub use species::SpeciesLabel;
pub use tips::{random_tip, TipSource};
pub use workflow::{Orchestrator, Outcome, RegulationSummary, WorkflowConfig, WorkflowReport};
