//! Station markers: size, colour and tooltip derived from traffic.

use serde::Serialize;

use crate::scale::{QuantizeScale, SqrtScale};
use crate::types::Station;
use crate::view::{MapView, ScreenPoint};

/// Fixed circle styling.
pub const STROKE: &str = "white";
pub const STROKE_WIDTH: f64 = 1.0;
pub const OPACITY: f64 = 0.8;
pub const DEFAULT_FILL: &str = "steelblue";

const DEPARTURE_COLOR: [u8; 3] = [0x46, 0x82, 0xb4]; // steelblue
const ARRIVAL_COLOR: [u8; 3] = [0xff, 0x8c, 0x00]; // darkorange

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub short_name: String,
    pub name: Option<String>,
    pub lon: f64,
    pub lat: f64,
    pub arrivals: u32,
    pub departures: u32,
    pub total_traffic: u32,
    pub radius: f64,
    /// Quantized departure ratio; `None` for stations without traffic.
    pub departure_mix: Option<f64>,
    pub fill: String,
    pub tooltip: String,
    pub position: ScreenPoint,
}

/// Builds one marker per station, scaling radii against the busiest station.
pub fn build_markers(stations: &[Station], view: &impl MapView) -> Vec<Marker> {
    let max_traffic = stations.iter().map(|s| s.total_traffic).max().unwrap_or(0);
    let radius = SqrtScale::radius(max_traffic);
    let mix = QuantizeScale::default();

    stations
        .iter()
        .map(|s| {
            let departure_mix = mix.apply(s.departure_ratio());
            Marker {
                short_name: s.short_name.clone(),
                name: s.name.clone(),
                lon: s.lon,
                lat: s.lat,
                arrivals: s.arrivals,
                departures: s.departures,
                total_traffic: s.total_traffic,
                radius: radius.apply(s.total_traffic as f64),
                departure_mix,
                fill: fill_color(departure_mix),
                tooltip: tooltip(s),
                position: view.project(s.lon, s.lat),
            }
        })
        .collect()
}

/// Re-projects markers after a camera change. Sizes and colours are untouched.
pub fn reposition(markers: &mut [Marker], view: &impl MapView) {
    for marker in markers {
        marker.position = view.project(marker.lon, marker.lat);
    }
}

pub fn tooltip(station: &Station) -> String {
    format!(
        "{} trips ({} departures, {} arrivals)",
        station.total_traffic, station.departures, station.arrivals
    )
}

/// Mixes the departure and arrival colours in sRGB; 1.0 is all departures.
pub fn fill_color(departure_mix: Option<f64>) -> String {
    let Some(mix) = departure_mix else {
        return DEFAULT_FILL.to_string();
    };
    let mix = mix.clamp(0.0, 1.0);
    let channel = |i: usize| {
        (DEPARTURE_COLOR[i] as f64 * mix + ARRIVAL_COLOR[i] as f64 * (1.0 - mix)).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", channel(0), channel(1), channel(2))
}
