use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::catalog::OrbitalElements;
use crate::predict::{GroundStation, PredictError, Topocentric};

/// SGP4 state for one catalog entry.
pub struct Satellite {
    pub name: String,
    elements: Elements,
    constants: Constants,
}

impl Satellite {
    pub fn from_elements(tle: &OrbitalElements) -> Result<Self, PredictError> {
        let name = tle.display_name().to_string();
        let elements = Elements::from_tle(
            Some(name.clone()),
            tle.line1.trim_end().as_bytes(),
            tle.line2.trim_end().as_bytes(),
        )?;
        let constants = Constants::from_elements(&elements)?;

        log::info!(
            "Loaded elements for {} (NORAD {}, epoch {})",
            name,
            elements.norad_id,
            elements.datetime
        );

        Ok(Self {
            name,
            elements,
            constants,
        })
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }

    /// Altitude/azimuth of the satellite seen from `station` at `timestamp`.
    pub fn observe(
        &self,
        station: &GroundStation,
        timestamp: DateTime<Utc>,
    ) -> Result<Topocentric, PredictError> {
        let sat_ecef = self.position_ecef_km(timestamp)?;
        let sta_ecef = station.position_ecef_km();

        let dr = [
            sat_ecef[0] - sta_ecef[0],
            sat_ecef[1] - sta_ecef[1],
            sat_ecef[2] - sta_ecef[2],
        ];
        let range_km = (dr[0] * dr[0] + dr[1] * dr[1] + dr[2] * dr[2]).sqrt();

        let (east, north, up) = ecef_to_enu(dr, station.lat_rad(), station.lon_rad());
        let azimuth_deg = east.atan2(north).to_degrees().rem_euclid(360.0);
        let altitude_deg = if range_km > 0.0 {
            (up / range_km).asin().to_degrees()
        } else {
            0.0
        };

        Ok(Topocentric {
            timestamp,
            altitude_deg,
            azimuth_deg,
            range_km,
        })
    }

    pub(crate) fn position_ecef_km(&self, timestamp: DateTime<Utc>) -> Result<[f64; 3], PredictError> {
        let naive = timestamp.naive_utc();
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&naive)
            .map_err(|e| PredictError::Propagation(e.to_string()))?;
        let prediction = self.constants.propagate(minutes)?;

        let sidereal = sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&naive));
        Ok(teme_to_ecef(prediction.position, sidereal))
    }
}

fn teme_to_ecef(pos_teme: [f64; 3], gmst: f64) -> [f64; 3] {
    let cos_gmst = gmst.cos();
    let sin_gmst = gmst.sin();
    [
        pos_teme[0] * cos_gmst + pos_teme[1] * sin_gmst,
        -pos_teme[0] * sin_gmst + pos_teme[1] * cos_gmst,
        pos_teme[2],
    ]
}

fn ecef_to_enu(dr: [f64; 3], lat_rad: f64, lon_rad: f64) -> (f64, f64, f64) {
    let sin_lat = lat_rad.sin();
    let cos_lat = lat_rad.cos();
    let sin_lon = lon_rad.sin();
    let cos_lon = lon_rad.cos();

    let east = -sin_lon * dr[0] + cos_lon * dr[1];
    let north = -sin_lat * cos_lon * dr[0] - sin_lat * sin_lon * dr[1] + cos_lat * dr[2];
    let up = cos_lat * cos_lon * dr[0] + cos_lat * sin_lon * dr[1] + sin_lat * dr[2];
    (east, north, up)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find_elements;
    use chrono::{Duration, TimeZone};

    const ISS: &str = concat!(
        "ISS (ZARYA)             \n",
        "1 25544U 98067A   24001.50000000  .00016717  00000-0  30375-3 0  9995\n",
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.49815350432986\n",
    );

    // Vallado's SGP4 verification object; at epoch TEME r = (7022.465, -1400.083, 0.040) km.
    const VALLADO_00005: &str = concat!(
        "00005\n",
        "1 00005U 58002B   00179.78495062  .00000023  00000-0  28098-4 0  4753\n",
        "2 00005  34.2682 348.7242 1859667 331.7664  19.3264 10.82419157413667\n",
    );

    fn satellite(catalog: &str, name: &str) -> Satellite {
        Satellite::from_elements(&find_elements(catalog, name).unwrap()).unwrap()
    }

    #[test]
    fn parses_epoch_from_catalog_entry() {
        let iss = satellite(ISS, "ISS (ZARYA)");
        assert_eq!(iss.name, "ISS (ZARYA)");
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        assert!((iss.epoch() - expected).num_milliseconds().abs() <= 1);
    }

    #[test]
    fn matches_reference_look_angles() {
        let sat = satellite(VALLADO_00005, "00005");
        let station = GroundStation::new(5.0, 160.0, 0.0);

        let look = sat.observe(&station, sat.epoch()).unwrap();
        assert!((look.altitude_deg - 24.927).abs() < 0.2, "alt {}", look.altitude_deg);
        assert!((look.azimuth_deg - 243.939).abs() < 0.2, "az {}", look.azimuth_deg);
        assert!((look.range_km - 1533.05).abs() < 5.0, "range {}", look.range_km);
        assert!(look.is_above_horizon());
    }

    #[test]
    fn reference_below_horizon_from_new_york() {
        let sat = satellite(VALLADO_00005, "00005");
        let station = GroundStation::new(40.7128, -74.006, 10.0);

        let look = sat.observe(&station, sat.epoch()).unwrap();
        assert!((look.altitude_deg - -59.666).abs() < 0.2, "alt {}", look.altitude_deg);
        assert!((look.azimuth_deg - 304.239).abs() < 0.2, "az {}", look.azimuth_deg);
        assert!(!look.is_above_horizon());
    }

    #[test]
    fn overhead_from_sub_satellite_point() {
        let iss = satellite(ISS, "ISS (ZARYA)");
        let at = iss.epoch() + Duration::minutes(17);

        let ecef = iss.position_ecef_km(at).unwrap();
        let lat = ecef[2].atan2((ecef[0] * ecef[0] + ecef[1] * ecef[1]).sqrt());
        let lon = ecef[1].atan2(ecef[0]);
        let below = GroundStation::new(lat.to_degrees(), lon.to_degrees(), 0.0);

        let look = iss.observe(&below, at).unwrap();
        assert!(look.altitude_deg > 85.0, "alt {}", look.altitude_deg);
        assert!(look.range_km > 350.0 && look.range_km < 480.0);

        let antipode = GroundStation::new(-lat.to_degrees(), lon.to_degrees() + 180.0, 0.0);
        let hidden = iss.observe(&antipode, at).unwrap();
        assert!(hidden.altitude_deg < -60.0);
    }

    #[test]
    fn azimuth_is_normalised() {
        let iss = satellite(ISS, "ISS (ZARYA)");
        let station = GroundStation::new(40.7128, -74.006, 10.0);
        for step in 0..60 {
            let look = iss
                .observe(&station, iss.epoch() + Duration::minutes(step * 3))
                .unwrap();
            assert!((0.0..360.0).contains(&look.azimuth_deg));
            assert!((-90.0..=90.0).contains(&look.altitude_deg));
        }
    }

    #[test]
    fn rejects_malformed_lines() {
        let bad = OrbitalElements {
            name: "BROKEN".to_string(),
            line1: "1 25544U garbage".to_string(),
            line2: "2 25544 garbage".to_string(),
        };
        assert!(matches!(
            Satellite::from_elements(&bad),
            Err(PredictError::InvalidTle(_))
        ));
    }

    #[test]
    fn enu_axes() {
        // observer on the equator at lon 0: +x is up, +y east, +z north
        let (e, n, u) = ecef_to_enu([0.0, 0.0, 1.0], 0.0, 0.0);
        assert!(e.abs() < 1e-12 && (n - 1.0).abs() < 1e-12 && u.abs() < 1e-12);
        let (e, n, u) = ecef_to_enu([0.0, 1.0, 0.0], 0.0, 0.0);
        assert!((e - 1.0).abs() < 1e-12 && n.abs() < 1e-12 && u.abs() < 1e-12);
        let (e, n, u) = ecef_to_enu([1.0, 0.0, 0.0], 0.0, 0.0);
        assert!(e.abs() < 1e-12 && n.abs() < 1e-12 && (u - 1.0).abs() < 1e-12);
    }
}
