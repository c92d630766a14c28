//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Catchguide: identify your catch and the fishing rules that apply to it
#[derive(Parser)]
#[command(name = "catchguide")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Settings file holding the API key and workflow options
    #[arg(short, long, global = true, default_value = catchguide::config::DEFAULT_SETTINGS_PATH)]
    pub settings: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Identify the fish in a photo and look up the regulations for a location
    Identify {
        /// Path to the photo (JPEG/PNG)
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Latitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Regulation PDF to register with the provider (overrides settings)
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// Inference provider to use
        #[arg(long, default_value = "openai")]
        llm: LlmProviderChoice,
    },

    /// Show a random fishing tip
    Tip {
        /// Tips file, one tip per line (overrides settings)
        #[arg(short, long)]
        tips: Option<PathBuf>,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Serve the capture page and API locally
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,

        /// Regulation PDF to register with the provider (overrides settings)
        #[arg(short, long)]
        document: Option<PathBuf>,

        /// Tips file, one tip per line (overrides settings)
        #[arg(short, long)]
        tips: Option<PathBuf>,

        /// Inference provider to use
        #[arg(long, default_value = "openai")]
        llm: LlmProviderChoice,
    },
}

/// Inference provider choice
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LlmProviderChoice {
    /// OpenAI API (requires OpenAI_key or OPENAI_API_KEY)
    #[default]
    OpenAI,
    /// Mock provider for demos and testing
    Mock,
}

impl std::str::FromStr for LlmProviderChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" | "gpt" => Ok(LlmProviderChoice::OpenAI),
            "mock" | "test" => Ok(LlmProviderChoice::Mock),
            _ => Err(format!("Unknown provider: {}. Use: openai or mock.", s)),
        }
    }
}

impl std::fmt::Display for LlmProviderChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmProviderChoice::OpenAI => write!(f, "openai"),
            LlmProviderChoice::Mock => write!(f, "mock"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identify_with_negative_longitude() {
        let cli = Cli::try_parse_from([
            "catchguide", "identify", "pike.jpg", "--lat", "44.9", "--lon", "-79.4", "--llm", "mock",
        ])
        .unwrap();

        match cli.command {
            Commands::Identify { image, lat, lon, llm, .. } => {
                assert_eq!(image, PathBuf::from("pike.jpg"));
                assert_eq!(lat, 44.9);
                assert_eq!(lon, -79.4);
                assert_eq!(llm, LlmProviderChoice::Mock);
            }
            _ => panic!("expected identify"),
        }
        assert_eq!(cli.settings, PathBuf::from("secrets.toml"));
    }

    #[test]
    fn test_identify_requires_location() {
        assert!(Cli::try_parse_from(["catchguide", "identify", "pike.jpg", "--lat", "44.9"]).is_err());
    }

    #[test]
    fn test_provider_choice() {
        assert_eq!("GPT".parse::<LlmProviderChoice>().unwrap(), LlmProviderChoice::OpenAI);
        assert!("ollama".parse::<LlmProviderChoice>().is_err());
    }
}
