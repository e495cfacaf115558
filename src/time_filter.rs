//! Time-of-day filtering of the trip log.

use crate::types::{TimeFilter, Trip};

/// Half-width of the window around the slider position, in minutes.
pub const WINDOW_MINUTES: u32 = 60;

/// Keeps the trips that start or end within [`WINDOW_MINUTES`] of `filter`.
///
/// `TimeFilter::Any` returns every trip. The window does not wrap around
/// midnight. Trips with unparseable timestamps only pass the `Any` filter.
pub fn filter_by_time(trips: &[Trip], filter: TimeFilter) -> Vec<Trip> {
    match filter {
        TimeFilter::Any => trips.to_vec(),
        TimeFilter::Minute(target) => trips
            .iter()
            .filter(|trip| in_window(trip, target))
            .cloned()
            .collect(),
    }
}

/// Whether either end of `trip` lies within the window around `target`.
pub fn in_window(trip: &Trip, target: i32) -> bool {
    let near = |minute: Option<i32>| minute.is_some_and(|m| m.abs_diff(target) <= WINDOW_MINUTES);
    near(trip.start_minute()) || near(trip.end_minute())
}
