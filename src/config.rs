use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::predict::GroundStation;

pub const DEFAULT_LATITUDE_DEG: f64 = 40.7128;
pub const DEFAULT_LONGITUDE_DEG: f64 = -74.0060;
pub const DEFAULT_ELEVATION_M: f64 = 10.0;
pub const DEFAULT_SATELLITE: &str = "ISS (ZARYA)";
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_CATALOG_URL: &str = "https://celestrak.org/NORAD/elements/stations.txt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid station coordinates: {0}")]
    InvalidCoordinates(String),
    #[error("invalid update interval: {0}")]
    InvalidInterval(String),
}

/// Optional YAML configuration file. Every field falls back to the
/// compiled-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub station: Option<StationConfig>,
    pub satellite: Option<String>,
    pub catalog_url: Option<String>,
    pub update_interval: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StationConfig {
    pub coordinates: String,
    #[serde(default)]
    pub altitude_m: f64,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// Command-line overrides, applied on top of the file and the defaults.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct Overrides {
    /// YAML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Catalog name of the satellite to track
    #[arg(long, global = true)]
    pub satellite: Option<String>,
    /// Observer position as "lat, lon" in decimal degrees
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub coordinates: Option<String>,
    /// Observer height above the ellipsoid in metres
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub altitude_m: Option<f64>,
    /// Refresh interval, e.g. "5s" or "1m 30s"
    #[arg(long, global = true)]
    pub interval: Option<String>,
    /// Element catalog URL
    #[arg(long, global = true, conflicts_with = "tle_file")]
    pub catalog_url: Option<String>,
    /// Read the element catalog from a local file instead of downloading it
    #[arg(long, global = true)]
    pub tle_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub station: GroundStation,
    pub satellite: String,
    pub catalog: CatalogSource,
    pub update_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: GroundStation::new(
                DEFAULT_LATITUDE_DEG,
                DEFAULT_LONGITUDE_DEG,
                DEFAULT_ELEVATION_M,
            ),
            satellite: DEFAULT_SATELLITE.to_string(),
            catalog: CatalogSource::Url(DEFAULT_CATALOG_URL.to_string()),
            update_interval: DEFAULT_UPDATE_INTERVAL,
        }
    }
}

impl Config {
    /// Load the file named by `--config` (if any) and apply the overrides.
    pub fn load(overrides: &Overrides) -> Result<Self, ConfigError> {
        let file = match &overrides.config {
            Some(path) => FileConfig::from_file(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(&file, overrides)
    }

    pub fn resolve(file: &FileConfig, overrides: &Overrides) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(station) = &file.station {
            config.station = parse_station(&station.coordinates, Some(station.altitude_m))?;
        }
        if let Some(coordinates) = &overrides.coordinates {
            let altitude = overrides.altitude_m.or(Some(config.station.elevation_m));
            config.station = parse_station(coordinates, altitude)?;
        } else if let Some(altitude) = overrides.altitude_m {
            config.station.elevation_m = altitude;
        }

        if let Some(name) = overrides.satellite.as_ref().or(file.satellite.as_ref()) {
            config.satellite = name.trim().to_string();
        }

        if let Some(path) = &overrides.tle_file {
            config.catalog = CatalogSource::File(path.clone());
        } else if let Some(url) = overrides.catalog_url.as_ref().or(file.catalog_url.as_ref()) {
            config.catalog = CatalogSource::Url(url.clone());
        }

        if let Some(interval) = overrides
            .interval
            .as_deref()
            .or(file.update_interval.as_deref())
        {
            config.update_interval = parse_interval(interval)?;
        }

        Ok(config)
    }
}

fn parse_station(coordinates: &str, altitude_m: Option<f64>) -> Result<GroundStation, ConfigError> {
    GroundStation::from_coordinates(coordinates, altitude_m)
        .ok_or_else(|| ConfigError::InvalidCoordinates(coordinates.to_string()))
}

fn parse_interval(s: &str) -> Result<Duration, ConfigError> {
    let interval = humantime::parse_duration(s.trim())
        .map_err(|e| ConfigError::InvalidInterval(format!("{}: {}", s, e)))?;
    if interval.is_zero() {
        return Err(ConfigError::InvalidInterval(format!("{}: must be positive", s)));
    }
    Ok(interval)
}
