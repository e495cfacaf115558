//! Core data types: stations, trips and the time-of-day filter.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// A bike-share dock location.
///
/// `arrivals`, `departures` and `total_traffic` are derived by
/// [`crate::traffic::aggregate`] and overwritten on every pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub short_name: String,
    pub lon: f64,
    pub lat: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub capacity: Option<u32>,

    #[serde(default, skip_deserializing)]
    pub arrivals: u32,
    #[serde(default, skip_deserializing)]
    pub departures: u32,
    #[serde(default, skip_deserializing)]
    pub total_traffic: u32,
}

impl Station {
    pub fn new(short_name: &str, lon: f64, lat: f64) -> Self {
        Self {
            short_name: short_name.to_string(),
            lon,
            lat,
            name: None,
            capacity: None,
            arrivals: 0,
            departures: 0,
            total_traffic: 0,
        }
    }

    /// Share of this station's traffic that leaves from it.
    ///
    /// `NaN` when the station saw no traffic at all.
    pub fn departure_ratio(&self) -> f64 {
        self.departures as f64 / self.total_traffic as f64
    }
}

/// A single rental. `None` timestamps are rows whose time could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_station_id: String,
    pub end_station_id: String,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
}

impl Trip {
    pub fn start_minute(&self) -> Option<i32> {
        self.started_at.as_ref().map(minutes_since_midnight)
    }

    pub fn end_minute(&self) -> Option<i32> {
        self.ended_at.as_ref().map(minutes_since_midnight)
    }
}

/// Wall-clock minutes since midnight, in `0..=1439`. Date and seconds are ignored.
pub fn minutes_since_midnight(ts: &NaiveDateTime) -> i32 {
    (ts.hour() * 60 + ts.minute()) as i32
}

/// Slider position: either no filter or a target minute of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(into = "i32")]
pub enum TimeFilter {
    #[default]
    Any,
    Minute(i32),
}

impl TimeFilter {
    /// Raw slider value used for "no filter".
    pub const ANY: i32 = -1;

    pub fn is_any(&self) -> bool {
        matches!(self, TimeFilter::Any)
    }
}

impl From<i32> for TimeFilter {
    fn from(value: i32) -> Self {
        if value == Self::ANY {
            TimeFilter::Any
        } else {
            TimeFilter::Minute(value)
        }
    }
}

impl From<TimeFilter> for i32 {
    fn from(filter: TimeFilter) -> Self {
        match filter {
            TimeFilter::Any => TimeFilter::ANY,
            TimeFilter::Minute(m) => m,
        }
    }
}
