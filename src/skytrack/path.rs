use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::predict::{GroundStation, PredictError, Satellite, Topocentric};
use crate::skytrack::PolarPoint;

pub const PATH_STEP: Duration = Duration::minutes(2);
/// Three hours of 2-minute samples.
pub const PATH_LEN: usize = 90;

#[derive(Debug, Clone, Serialize)]
pub struct PathPoint {
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub position: PolarPoint,
    pub visible: bool,
}

impl From<&Topocentric> for PathPoint {
    fn from(look: &Topocentric) -> Self {
        Self {
            timestamp: look.timestamp,
            position: PolarPoint::from_altaz(look.altitude_deg, look.azimuth_deg),
            visible: look.is_above_horizon(),
        }
    }
}

/// The predicted sky path over the next three hours, computed once.
#[derive(Debug, Clone, Serialize)]
pub struct PathSample {
    pub points: Vec<PathPoint>,
}

impl PathSample {
    pub fn compute(
        satellite: &Satellite,
        station: &GroundStation,
        start: DateTime<Utc>,
    ) -> Result<Self, PredictError> {
        let looks = (0..PATH_LEN)
            .map(|i| satellite.observe(station, start + PATH_STEP * i as i32))
            .collect::<Result<Vec<_>, _>>()?;

        let path = Self::from_looks(&looks);
        log::info!(
            "Computed {} path samples from {} ({} above the horizon)",
            path.len(),
            start.format("%H:%M:%S UTC"),
            path.points.iter().filter(|p| p.visible).count()
        );
        Ok(path)
    }

    pub fn from_looks(looks: &[Topocentric]) -> Self {
        Self {
            points: looks.iter().map(PathPoint::from).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Split into (visible, hidden) subsequences, order preserved. Each
    /// point keeps its sample index.
    pub fn partition(&self) -> (Vec<(usize, PolarPoint)>, Vec<(usize, PolarPoint)>) {
        self.points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.visible, (i, p.position)))
            .fold((Vec::new(), Vec::new()), |(mut visible, mut hidden), (up, point)| {
                if up {
                    visible.push(point);
                } else {
                    hidden.push(point);
                }
                (visible, hidden)
            })
    }
}

/// Break one side of a partition into line segments wherever the sample
/// indices are not consecutive.
pub fn segments(points: &[(usize, PolarPoint)]) -> Vec<Vec<PolarPoint>> {
    let mut segments: Vec<Vec<PolarPoint>> = Vec::new();
    let mut prev: Option<usize> = None;
    for &(index, point) in points {
        match (prev, segments.last_mut()) {
            (Some(p), Some(segment)) if index == p + 1 => segment.push(point),
            _ => segments.push(vec![point]),
        }
        prev = Some(index);
    }
    segments
}
