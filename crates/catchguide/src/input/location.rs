//! Geographic position of a catch.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Latitude/longitude pair in decimal degrees.
///
/// No range check is applied; the collector is trusted to deliver a fix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude {}, Longitude {}",
            self.latitude, self.longitude
        )
    }
}
