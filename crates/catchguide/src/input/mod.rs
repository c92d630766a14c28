//! Inputs supplied by the capture collaborator.

mod image;
mod location;

pub use image::{sniff_mime, CapturedImage, DEFAULT_MIME};
pub use location::Coordinate;

/// One user submission; either part may still be missing.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub image: Option<CapturedImage>,
    pub coordinate: Option<Coordinate>,
}

impl Submission {
    pub fn new(image: Option<CapturedImage>, coordinate: Option<Coordinate>) -> Self {
        Self { image, coordinate }
    }

    /// Both inputs, if present.
    pub fn complete(self) -> Option<(CapturedImage, Coordinate)> {
        match (self.image, self.coordinate) {
            (Some(image), Some(coordinate)) => Some((image, coordinate)),
            _ => None,
        }
    }
}
