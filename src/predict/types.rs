use chrono::{DateTime, Utc};

/// Position of a satellite as seen from a ground station at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Topocentric {
    pub timestamp: DateTime<Utc>,
    /// Elevation above the local horizon, unclipped; negative below it.
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
}

impl Topocentric {
    pub fn is_above_horizon(&self) -> bool {
        self.altitude_deg > 0.0
    }
}
