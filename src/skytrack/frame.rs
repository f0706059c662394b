use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use crate::predict::{GroundStation, PredictError, Satellite, Topocentric};
use crate::skytrack::PolarPoint;

/// What one tick of the animation shows: the live marker and the title.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub timestamp: DateTime<Utc>,
    pub altitude_deg: f64,
    pub azimuth_deg: f64,
    pub range_km: f64,
    pub marker: PolarPoint,
    pub title: String,
}

impl FrameState {
    pub fn at(
        satellite: &Satellite,
        station: &GroundStation,
        now: DateTime<Utc>,
    ) -> Result<Self, PredictError> {
        let look = satellite.observe(station, now)?;
        Ok(Self::from_look(&satellite.name, &look))
    }

    pub fn from_look(name: &str, look: &Topocentric) -> Self {
        Self {
            timestamp: look.timestamp,
            altitude_deg: look.altitude_deg,
            azimuth_deg: look.azimuth_deg,
            range_km: look.range_km,
            marker: PolarPoint::from_altaz(look.altitude_deg, look.azimuth_deg),
            title: format!(
                "{} @ {}\nAlt: {:.1}° Az: {:.1}°",
                name,
                look.timestamp.format("%H:%M:%S UTC"),
                look.altitude_deg,
                look.azimuth_deg
            ),
        }
    }

    /// One-line console report for this tick.
    pub fn status_line(&self) -> String {
        format!(
            "Time {} | Alt={:.1}°, Az={:.1}°",
            self.timestamp.format("%H:%M:%S"),
            self.altitude_deg,
            self.azimuth_deg
        )
    }
}

/// Fixed-interval timer polled from the display loop. The first poll is
/// always due.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    /// Returns true and rearms the timer when a tick is due at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let due = match self.last {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.interval,
        };
        if due {
            self.last = Some(now);
        }
        due
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last {
            None => Duration::ZERO,
            Some(last) => (last + self.interval).saturating_duration_since(now),
        }
    }
}
