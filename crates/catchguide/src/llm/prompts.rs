//! Prompt templates for the two inference stages.

use crate::input::Coordinate;
use crate::llm::DocumentHandle;
use crate::species::SpeciesLabel;

/// Question sent alongside the photograph.
pub const IDENTIFY_PROMPT: &str =
    "What is the fish type in this image? Can you provide the description?";

/// Build the regulation lookup prompt.
///
/// The document is referenced by id only; its content is never resent.
pub fn regulation_prompt(
    coordinate: &Coordinate,
    region: &str,
    document: &DocumentHandle,
    species: &SpeciesLabel,
) -> String {
    format!(
        "Based on the GPS coordinates Latitude {} and Longitude {}, identify the closest \
         fishing zone in {region} then, using the uploaded PDF file (ID: {document}) and the \
         identified fish type ({species}), determine the opening season and the limit to keep \
         in that zone. Answer in plain language and name the zone.",
        coordinate.latitude, coordinate.longitude,
    )
}
