use serde::Serialize;

/// Zenith distance of the horizon; the rim of the polar chart.
pub const HORIZON_ZENITH_DEG: f64 = 90.0;

/// Clamp an altitude to the plottable range [0, 90].
pub fn clip_altitude(altitude_deg: f64) -> f64 {
    altitude_deg.clamp(0.0, 90.0)
}

/// A point on the sky chart: azimuth is the angle (north up, clockwise) and
/// zenith distance the radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarPoint {
    pub azimuth_deg: f64,
    pub zenith_deg: f64,
}

impl PolarPoint {
    pub fn from_altaz(altitude_deg: f64, azimuth_deg: f64) -> Self {
        Self {
            azimuth_deg,
            zenith_deg: HORIZON_ZENITH_DEG - clip_altitude(altitude_deg),
        }
    }

    /// Cartesian plot coordinates with north along +y and east along +x.
    pub fn to_xy(&self) -> [f64; 2] {
        let theta = self.azimuth_deg.to_radians();
        [self.zenith_deg * theta.sin(), self.zenith_deg * theta.cos()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clips_to_plot_range() {
        assert_eq!(clip_altitude(-12.5), 0.0);
        assert_eq!(clip_altitude(0.0), 0.0);
        assert_eq!(clip_altitude(45.25), 45.25);
        assert_eq!(clip_altitude(90.0), 90.0);
        assert_eq!(clip_altitude(120.0), 90.0);
    }

    #[test]
    fn zenith_distance_is_ninety_minus_clipped_altitude() {
        for alt in [-90.0, -0.1, 0.0, 0.1, 30.0, 89.9, 90.0] {
            let p = PolarPoint::from_altaz(alt, 10.0);
            assert_eq!(p.zenith_deg, 90.0 - clip_altitude(alt));
            assert!((0.0..=90.0).contains(&p.zenith_deg));
        }
    }

    #[test]
    fn overhead_maps_to_centre() {
        assert_eq!(PolarPoint::from_altaz(90.0, 123.0).to_xy(), [0.0, 0.0]);
    }

    #[test]
    fn compass_directions() {
        let close = |a: [f64; 2], b: [f64; 2]| (a[0] - b[0]).abs() < 1e-9 && (a[1] - b[1]).abs() < 1e-9;
        assert!(close(PolarPoint::from_altaz(0.0, 0.0).to_xy(), [0.0, 90.0]));
        assert!(close(PolarPoint::from_altaz(0.0, 90.0).to_xy(), [90.0, 0.0]));
        assert!(close(PolarPoint::from_altaz(60.0, 180.0).to_xy(), [0.0, -30.0]));
        assert!(close(PolarPoint::from_altaz(30.0, 270.0).to_xy(), [-60.0, 0.0]));
    }
}
