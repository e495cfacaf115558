//! Per-station arrival/departure tallies.

use std::collections::HashMap;

use crate::types::{Station, Trip};

/// Counts trips by station and returns fresh station records carrying the
/// tallies, in input order.
///
/// Trips whose station ids match no station are counted but never attributed.
pub fn aggregate(stations: &[Station], trips: &[Trip]) -> Vec<Station> {
    let mut departures: HashMap<&str, u32> = HashMap::new();
    let mut arrivals: HashMap<&str, u32> = HashMap::new();

    for trip in trips {
        *departures.entry(trip.start_station_id.as_str()).or_default() += 1;
        *arrivals.entry(trip.end_station_id.as_str()).or_default() += 1;
    }

    stations
        .iter()
        .map(|station| {
            let id = station.short_name.as_str();
            let departures = departures.get(id).copied().unwrap_or(0);
            let arrivals = arrivals.get(id).copied().unwrap_or(0);

            Station {
                arrivals,
                departures,
                total_traffic: arrivals + departures,
                ..station.clone()
            }
        })
        .collect()
}
