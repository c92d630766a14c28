//! Serve command - run the capture page and API locally.

use std::path::{Path, PathBuf};

use catchguide::Settings;
use colored::Colorize;

use crate::cli::LlmProviderChoice;
use crate::server::{app, state::AppState};

pub fn run(
    settings_path: &Path,
    port: u16,
    no_open: bool,
    document: Option<PathBuf>,
    tips: Option<PathBuf>,
    llm: LlmProviderChoice,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(settings_path)?;
    let tips_path = tips.unwrap_or_else(|| settings.catchguide.tips_path.clone());

    // Build the gateway before the runtime starts; the blocking HTTP client
    // must not be created on an async worker.
    let state = match super::build_orchestrator(&settings, &llm, document) {
        Ok(orchestrator) => AppState::new(orchestrator, tips_path.clone()),
        Err(e) => {
            eprintln!("{} {}", "Warning:".yellow(), e);
            println!("Identification is disabled; tips remain available.");
            AppState::unconfigured(e.to_string(), tips_path.clone())
        }
    };

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting Catchguide at".cyan().bold(),
        url.white().bold()
    );
    println!();
    if let Some(orchestrator) = &state.orchestrator {
        println!("  Provider: {}", orchestrator.gateway().name());
        println!("  Document: {}", orchestrator.registrar().path().display());
    }
    println!("  Tips: {}", tips_path.display());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    // Hold a reference so the blocking client is dropped outside the runtime.
    let orchestrator = state.orchestrator.clone();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;
    drop(runtime);

    println!("{}", "Shutting down...".yellow());
    drop(orchestrator);
    Ok(())
}
