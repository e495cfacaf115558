//! Decoders for the station list (JSON) and the trip log (CSV).

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDateTime};
use serde::Deserialize;
use tracing::debug;

use crate::types::{Station, Trip};

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Deserialize)]
struct StationFeed {
    data: StationData,
}

#[derive(Deserialize)]
struct StationData {
    stations: Vec<Station>,
}

/// Column positions of the trip log fields; `None` when the header lacks one.
struct TripColumns {
    start_station_id: Option<usize>,
    end_station_id: Option<usize>,
    started_at: Option<usize>,
    ended_at: Option<usize>,
}

impl TripColumns {
    fn from_headers(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        Self {
            start_station_id: find("start_station_id"),
            end_station_id: find("end_station_id"),
            started_at: find("started_at"),
            ended_at: find("ended_at"),
        }
    }
}

/// Field `column` of `record`, or `""` when the column or the cell is missing.
fn cell(record: &csv::StringRecord, column: Option<usize>) -> &str {
    column.and_then(|i| record.get(i)).unwrap_or("")
}

/// Decodes `{ "data": { "stations": [...] } }`.
///
/// # Errors
///
/// Returns an error if the document is not valid JSON or lacks the station list.
pub fn parse_stations(bytes: &[u8]) -> Result<Vec<Station>> {
    let doc: StationFeed =
        serde_json::from_slice(bytes).context("malformed station document")?;
    Ok(doc.data.stations)
}

/// Decodes the trip CSV without validating rows.
///
/// Missing columns or short rows yield empty station ids, unparseable
/// timestamps are kept as `None`. Rows the CSV reader cannot decode at all
/// are skipped and counted.
///
/// # Errors
///
/// Returns an error if the header row cannot be read.
pub fn parse_trips(bytes: &[u8]) -> Result<Vec<Trip>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let columns = TripColumns::from_headers(rdr.headers().context("malformed trip log header")?);

    let mut trips = Vec::new();
    let mut invalid_timestamps = 0usize;
    let mut unreadable_rows = 0usize;

    for result in rdr.records() {
        let Ok(record) = result else {
            unreadable_rows += 1;
            continue;
        };

        let started_at = parse_timestamp(cell(&record, columns.started_at));
        let ended_at = parse_timestamp(cell(&record, columns.ended_at));
        invalid_timestamps += started_at.is_none() as usize + ended_at.is_none() as usize;

        trips.push(Trip {
            start_station_id: cell(&record, columns.start_station_id).to_string(),
            end_station_id: cell(&record, columns.end_station_id).to_string(),
            started_at,
            ended_at,
        });
    }

    debug!(
        trips = trips.len(),
        invalid_timestamps,
        unreadable_rows,
        "Trip log parsed"
    );
    Ok(trips)
}

/// Parses the wall-clock part of a timestamp. RFC 3339 offsets are dropped.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_local());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
}
