//! Tip command - print one random fishing tip.

use std::path::{Path, PathBuf};

use catchguide::{Settings, TipSource};
use colored::Colorize;

pub fn run(
    settings_path: &Path,
    tips: Option<PathBuf>,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load(settings_path)?;
    let path = tips.unwrap_or(settings.catchguide.tips_path);

    let source = TipSource::load(&path)?;
    println!("{} {}", "Fishing Tip:".cyan().bold(), source.pick(seed));
    Ok(())
}
