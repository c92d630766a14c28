//! Random fishing tips from a newline-delimited file.

use std::io::ErrorKind;
use std::path::Path;

use crate::error::TipSourceError;

/// Tips loaded from a file, blank lines removed.
#[derive(Debug, Clone)]
pub struct TipSource {
    tips: Vec<String>,
}

impl TipSource {
    /// Load tips from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TipSourceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => TipSourceError::NotFound(path.to_path_buf()),
            _ => TipSourceError::Unreadable {
                path: path.to_path_buf(),
                source,
            },
        })?;

        let tips: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();

        if tips.is_empty() {
            return Err(TipSourceError::Empty(path.to_path_buf()));
        }
        tracing::debug!(path = %path.display(), count = tips.len(), "tips loaded");
        Ok(Self { tips })
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn len(&self) -> usize {
        self.tips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tips.is_empty()
    }

    /// Pick one tip uniformly at random.
    pub fn choose(&self, rng: &mut fastrand::Rng) -> &str {
        &self.tips[rng.usize(..self.tips.len())]
    }

    /// Pick one tip, reproducibly when a seed is given.
    pub fn pick(&self, seed: Option<u64>) -> &str {
        let mut rng = seed.map(fastrand::Rng::with_seed).unwrap_or_default();
        self.choose(&mut rng)
    }
}

/// Load `path` and pick one tip with a fresh random source.
pub fn random_tip(path: impl AsRef<Path>) -> Result<String, TipSourceError> {
    let source = TipSource::load(path)?;
    Ok(source.pick(None).to_string())
}
