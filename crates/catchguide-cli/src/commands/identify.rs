//! Identify command - run the two-stage workflow for one photo.

use std::path::{Path, PathBuf};

use catchguide::{CapturedImage, Coordinate, Settings};
use colored::Colorize;

use crate::cli::LlmProviderChoice;

pub fn run(
    settings_path: &Path,
    image: PathBuf,
    lat: f64,
    lon: f64,
    document: Option<PathBuf>,
    llm: LlmProviderChoice,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !image.exists() {
        return Err(format!("File not found: {}", image.display()).into());
    }

    let settings = Settings::load(settings_path)?;
    let orchestrator = super::build_orchestrator(&settings, &llm, document)?;
    let coordinate = Coordinate::new(lat, lon);
    let captured = CapturedImage::from_path(&image)?;

    println!("Your location: {}", coordinate);
    if verbose {
        println!(
            "  Image: {} ({} bytes, {})",
            image.display(),
            captured.len(),
            captured.mime()
        );
        println!("  Provider: {}", orchestrator.gateway().name());
    }

    println!(
        "{} {}",
        "Identifying".cyan().bold(),
        image.display().to_string().white()
    );
    let report = orchestrator.run_report(&captured, coordinate)?;

    println!();
    println!("{}", "Fish Identification".yellow().bold());
    println!("{}", report.identification);
    if verbose {
        println!("  Species label: {}", report.species.as_str().white().bold());
    }

    println!();
    println!("{}", report.registration_notice.green());

    println!();
    println!("{}", "Fishing Zone and Regulations".yellow().bold());
    println!("{}", report.regulation);

    Ok(())
}
