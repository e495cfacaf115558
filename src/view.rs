//! Map camera, projection and base layers.
//!
//! The camera projects longitude/latitude into viewport pixels with the
//! Web-Mercator projection on 512-px tiles. Markers are only positioned
//! through the [`MapView`] trait, so any map engine that can project a
//! coordinate can drive them.

use serde::Serialize;

use crate::config::MapConfig;

const TILE_SIZE: f64 = 512.0;
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// A position in viewport pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

/// Camera changes that require markers to be repositioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraEvent {
    Move,
    Zoom,
    Resize,
    MoveEnd,
}

/// Anything able to turn a coordinate into a viewport position.
pub trait MapView {
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint;
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    /// `[longitude, latitude]`
    pub center: [f64; 2],
    pub zoom: f64,
    pub width: u32,
    pub height: u32,
    #[serde(skip)]
    min_zoom: f64,
    #[serde(skip)]
    max_zoom: f64,
}

impl Camera {
    pub fn from_config(config: &MapConfig) -> Self {
        let mut camera = Self {
            center: config.center,
            zoom: config.zoom,
            width: config.width,
            height: config.height,
            min_zoom: config.min_zoom,
            max_zoom: config.max_zoom,
        };
        camera.zoom = camera.clamp_zoom(config.zoom);
        camera
    }

    pub fn pan_to(&mut self, lon: f64, lat: f64) -> CameraEvent {
        self.center = [lon, lat];
        CameraEvent::Move
    }

    pub fn zoom_to(&mut self, zoom: f64) -> CameraEvent {
        self.zoom = self.clamp_zoom(zoom);
        CameraEvent::Zoom
    }

    pub fn resize(&mut self, width: u32, height: u32) -> CameraEvent {
        self.width = width;
        self.height = height;
        CameraEvent::Resize
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * self.zoom.exp2()
    }
}

impl MapView for Camera {
    fn project(&self, lon: f64, lat: f64) -> ScreenPoint {
        let world = self.world_size();
        let (x, y) = mercator(lon, lat);
        let (cx, cy) = mercator(self.center[0], self.center[1]);

        ScreenPoint {
            x: (x - cx) * world + self.width as f64 / 2.0,
            y: (y - cy) * world + self.height as f64 / 2.0,
        }
    }
}

/// Normalized Web-Mercator coordinates in `[0, 1]`.
fn mercator(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (lon + 180.0) / 360.0;
    let y = (1.0 - (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln() / std::f64::consts::PI) / 2.0;
    (x, y)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LinePaint {
    #[serde(rename = "line-color")]
    pub color: String,
    #[serde(rename = "line-width")]
    pub width: f64,
    #[serde(rename = "line-opacity")]
    pub opacity: f64,
}

/// A GeoJSON line overlay drawn by the map engine under the markers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineLayer {
    pub id: String,
    pub source: String,
    pub data: String,
    pub paint: LinePaint,
}

/// The Boston and Cambridge bike networks.
pub fn base_layers() -> Vec<LineLayer> {
    vec![
        LineLayer {
            id: "bike-lanes".to_string(),
            source: "boston_route".to_string(),
            data: "https://bostonopendata-boston.opendata.arcgis.com/datasets/boston::existing-bike-network-2022.geojson".to_string(),
            paint: LinePaint {
                color: "#4285F4".to_string(),
                width: 5.0,
                opacity: 0.4,
            },
        },
        LineLayer {
            id: "cambridge-bike-lanes".to_string(),
            source: "cambridge_route".to_string(),
            data: "https://raw.githubusercontent.com/cambridgegis/cambridgegis_data/main/Recreation/Bike_Facilities/RECREATION_BikeFacilities.geojson".to_string(),
            paint: LinePaint {
                color: "#34A853".to_string(),
                width: 3.0,
                opacity: 0.4,
            },
        },
    ]
}
