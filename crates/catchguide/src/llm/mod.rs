//! Inference gateway integration.
//!
//! Both workflow stages go through an [`InferenceGateway`]: one multimodal
//! call that names the fish in a photograph, one document upload, and one
//! text call that asks for the regulations of a zone.
//!
//! # Supported Providers
//!
//! - **OpenAI** - GPT models via API (requires `OpenAI_key` in the secrets file
//!   or `OPENAI_API_KEY`)
//! - **Mock** - Scripted responses for tests and offline demos
//!
//! # Example
//!
//! ```no_run
//! use catchguide::{CapturedImage, InferenceGateway, OpenAiGateway};
//!
//! let gateway = OpenAiGateway::new("sk-...").unwrap();
//! let image = CapturedImage::from_path("catch.jpg").unwrap();
//! println!("{}", gateway.identify(&image, 300).unwrap());
//! ```

mod mock;
mod openai;
pub mod prompts;
mod provider;

pub use mock::MockGateway;
pub use openai::OpenAiGateway;
pub use provider::{DocumentHandle, GatewayResult, InferenceGateway, LlmConfig};
