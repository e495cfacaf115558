//! Dataset locations and initial map settings.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_STATIONS_URL: &str = "https://dsc106.com/labs/lab07/data/bluebikes-stations.json";
pub const DEFAULT_TRIPS_URL: &str =
    "https://dsc106.com/labs/lab07/data/bluebikes-traffic-2024-03.csv";

/// Where the station list and trip log are read from (URL or local path).
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    pub stations: String,
    pub trips: String,
}

impl DataSources {
    /// Reads `STATIONS_URL` / `TRIPS_URL`, falling back to the public datasets.
    pub fn from_env() -> Self {
        Self {
            stations: std::env::var("STATIONS_URL")
                .unwrap_or_else(|_| DEFAULT_STATIONS_URL.to_string()),
            trips: std::env::var("TRIPS_URL").unwrap_or_else(|_| DEFAULT_TRIPS_URL.to_string()),
        }
    }

    /// Applies CLI overrides on top of the environment.
    pub fn with_overrides(mut self, stations: Option<String>, trips: Option<String>) -> Self {
        if let Some(stations) = stations {
            self.stations = stations;
        }
        if let Some(trips) = trips {
            self.trips = trips;
        }
        self
    }
}

/// Initial camera and basemap settings.
///
/// Can be loaded from a JSON file; missing keys keep their defaults:
/// ```json
/// { "center": [-71.09415, 42.36027], "zoom": 13.5 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub style: String,
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub width: u32,
    pub height: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            style: "mapbox://styles/mapbox/streets-v12".to_string(),
            center: [-71.09415, 42.36027],
            zoom: 12.0,
            min_zoom: 5.0,
            max_zoom: 18.0,
            width: 1024,
            height: 768,
        }
    }
}

impl MapConfig {
    /// Loads the config from a JSON file at `path`.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read map config '{path}'"))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("invalid map config '{path}'"))?;
        Ok(config)
    }
}
