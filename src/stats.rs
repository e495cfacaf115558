use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::slider;
use crate::types::{Station, TimeFilter};

/// Summary of one filter pass, one row per slider position in timeline output.
#[derive(Debug, Default, Serialize)]
pub struct TrafficStats {
    pub timestamp: DateTime<Utc>,
    pub time_filter: TimeFilter,
    pub label: String,

    pub total_trips: usize,
    pub active_trips: usize,
    pub stations: usize,

    // attribution
    pub matched_departures: u64,
    pub matched_arrivals: u64,
    pub unmatched_departures: u64,

    pub busiest_station: Option<String>,
    pub busiest_traffic: u32,
}

impl TrafficStats {
    /// `stations` must be the output of [`crate::traffic::aggregate`] over the
    /// `active_trips` trips that survived the filter.
    pub fn from_pass(
        filter: TimeFilter,
        total_trips: usize,
        active_trips: usize,
        stations: &[Station],
    ) -> Self {
        let matched_departures: u64 = stations.iter().map(|s| s.departures as u64).sum();
        let matched_arrivals: u64 = stations.iter().map(|s| s.arrivals as u64).sum();

        // first station wins ties
        let busiest = stations
            .iter()
            .filter(|s| s.total_traffic > 0)
            .fold(None::<&Station>, |best, s| match best {
                Some(b) if b.total_traffic >= s.total_traffic => Some(b),
                _ => Some(s),
            });

        TrafficStats {
            timestamp: Utc::now(),
            time_filter: filter,
            label: slider::label(filter),
            total_trips,
            active_trips,
            stations: stations.len(),
            matched_departures,
            matched_arrivals,
            unmatched_departures: (active_trips as u64).saturating_sub(matched_departures),
            busiest_station: busiest.map(|s| s.short_name.clone()),
            busiest_traffic: busiest.map(|s| s.total_traffic).unwrap_or(0),
        }
    }

    pub fn pct(part: u64, total: u64) -> f64 {
        if total == 0 {
            0.0
        } else {
            (part as f64 / total as f64) * 100.0
        }
    }

    /// Share of active trips whose start station is on the map.
    pub fn attributed_pct(&self) -> f64 {
        Self::pct(self.matched_departures, self.active_trips as u64)
    }
}
