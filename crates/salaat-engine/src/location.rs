//! Observer location passed through to the engine.

use serde::{Deserialize, Serialize};

/// A geographic query location.
///
/// No range checking happens here; latitude, longitude and altitude reach
/// the engine exactly as given, and rejecting nonsense is the engine's job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Degrees north (negative for south).
    pub latitude: f64,
    /// Degrees east (negative for west).
    pub longitude: f64,
    /// Meters above sea level, assumed for both observer and horizon.
    #[serde(default)]
    pub altitude: f64,
}

impl Location {
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
}
