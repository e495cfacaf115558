//! Output formatting and persistence for markers and traffic statistics.
//!
//! Supports pretty-printing, GeoJSON marker layers, full map documents and
//! CSV append.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::marker::{self, Marker};
use crate::stats::TrafficStats;
use crate::view::{Camera, LineLayer};
use csv::WriterBuilder;
use std::fs::OpenOptions;
use std::path::Path;

/// Everything needed to redraw the map: basemap, camera, overlays and markers.
#[derive(Debug, Serialize)]
pub struct MapDocument<'a> {
    pub style: &'a str,
    pub camera: &'a Camera,
    pub layers: &'a [LineLayer],
    pub time_filter: i32,
    pub label: String,
    pub markers: Value,
}

/// Logs traffic statistics using Rust's debug pretty-print format.
pub fn print_pretty(stats: &TrafficStats) {
    debug!("{:#?}", stats);
}

/// Logs traffic statistics as pretty-printed JSON.
pub fn print_json(stats: &TrafficStats) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}

/// Builds a GeoJSON `FeatureCollection` with one `Point` per marker.
pub fn marker_collection(markers: &[Marker]) -> Value {
    let features: Vec<Value> = markers
        .iter()
        .map(|m| {
            json!({
                "type": "Feature",
                "id": m.short_name,
                "geometry": { "type": "Point", "coordinates": [m.lon, m.lat] },
                "properties": {
                    "short_name": m.short_name,
                    "name": m.name,
                    "arrivals": m.arrivals,
                    "departures": m.departures,
                    "total_traffic": m.total_traffic,
                    "radius": m.radius,
                    "departure_mix": m.departure_mix,
                    "fill": m.fill,
                    "stroke": marker::STROKE,
                    "stroke_width": marker::STROKE_WIDTH,
                    "opacity": marker::OPACITY,
                    "tooltip": m.tooltip,
                    "cx": m.position.x,
                    "cy": m.position.y,
                }
            })
        })
        .collect();

    json!({ "type": "FeatureCollection", "features": features })
}

/// Writes `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json(path: &str, value: &impl Serialize) -> Result<()> {
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let body = serde_json::to_vec_pretty(value)?;
    std::fs::write(path, body).with_context(|| format!("failed to write '{path}'"))?;
    debug!(path, "JSON written");
    Ok(())
}

/// Appends a [`TrafficStats`] record as a row to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &str, stats: &TrafficStats) -> Result<()> {
    let file_exists = Path::new(path).exists();
    debug!(path, file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // IMPORTANT when appending
        .from_writer(file);

    writer.serialize(stats)?;
    writer.flush()?;

    Ok(())
}
