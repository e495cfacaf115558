//! The map controller: owns the loaded datasets and reacts to camera and
//! slider events.
//!
//! Camera events only move existing markers. Slider input re-filters the
//! trip log, re-aggregates station traffic and redraws every marker.

use anyhow::Result;
use tracing::{debug, error, info};

use crate::config::DataSources;
use crate::fetch::{HttpClient, fetch_source};
use crate::loader::{parse_stations, parse_trips};
use crate::marker::{self, Marker};
use crate::stats::TrafficStats;
use crate::time_filter::filter_by_time;
use crate::traffic::aggregate;
use crate::types::{Station, TimeFilter, Trip};
use crate::view::{CameraEvent, MapView};

/// Rendering surface for station markers.
pub trait MarkerLayer {
    /// Replaces all markers (new sizes, colours and tooltips).
    fn draw(&mut self, markers: &[Marker]);
    /// Markers kept their styling but moved on screen.
    fn reposition(&mut self, markers: &[Marker]);
}

/// A layer that only logs what would be drawn.
#[derive(Debug, Default)]
pub struct TracingLayer;

impl MarkerLayer for TracingLayer {
    fn draw(&mut self, markers: &[Marker]) {
        debug!(markers = markers.len(), "Markers drawn");
    }

    fn reposition(&mut self, markers: &[Marker]) {
        debug!(markers = markers.len(), "Markers repositioned");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Camera(CameraEvent),
    /// Raw slider value in `-1..=1439`.
    SliderInput(i32),
}

/// Fetches the station list, then the trip log.
#[tracing::instrument(skip(client))]
pub async fn load_datasets<C: HttpClient>(
    client: &C,
    sources: &DataSources,
) -> Result<(Vec<Station>, Vec<Trip>)> {
    let stations = parse_stations(&fetch_source(client, &sources.stations).await?)?;
    let trips = parse_trips(&fetch_source(client, &sources.trips).await?)?;

    info!(
        stations = stations.len(),
        trips = trips.len(),
        "Datasets loaded"
    );
    Ok((stations, trips))
}

pub struct TrafficMap<L> {
    stations: Vec<Station>,
    trips: Vec<Trip>,
    time_filter: TimeFilter,
    traffic: Vec<Station>,
    markers: Vec<Marker>,
    stats: TrafficStats,
    layer: L,
    loaded: bool,
}

impl<L: MarkerLayer> TrafficMap<L> {
    /// An empty map: base layers only, no markers.
    pub fn new(layer: L) -> Self {
        Self {
            stations: Vec::new(),
            trips: Vec::new(),
            time_filter: TimeFilter::Any,
            traffic: Vec::new(),
            markers: Vec::new(),
            stats: TrafficStats::default(),
            layer,
            loaded: false,
        }
    }

    /// Loads both datasets and draws the unfiltered markers.
    ///
    /// A failed load is logged and leaves the map without markers.
    pub async fn initialize<C: HttpClient>(
        layer: L,
        client: &C,
        sources: &DataSources,
        view: &impl MapView,
    ) -> Self {
        let mut map = Self::new(layer);
        match load_datasets(client, sources).await {
            Ok((stations, trips)) => map.on_load(stations, trips, view),
            Err(e) => error!(error = %e, "Error loading datasets"),
        }
        map
    }

    pub fn on_load(&mut self, stations: Vec<Station>, trips: Vec<Trip>, view: &impl MapView) {
        self.stations = stations;
        self.trips = trips;
        self.loaded = true;
        self.recompute(view);
    }

    pub fn on_slider_input(&mut self, value: i32, view: &impl MapView) -> &TrafficStats {
        self.time_filter = TimeFilter::from(value);
        self.recompute(view);
        &self.stats
    }

    pub fn on_camera(&mut self, event: CameraEvent, view: &impl MapView) {
        marker::reposition(&mut self.markers, view);
        self.layer.reposition(&self.markers);
        debug!(?event, "Camera changed");
    }

    pub fn dispatch(&mut self, event: UiEvent, view: &impl MapView) {
        match event {
            UiEvent::Camera(e) => self.on_camera(e, view),
            UiEvent::SliderInput(value) => {
                self.on_slider_input(value, view);
            }
        }
    }

    fn recompute(&mut self, view: &impl MapView) {
        let active = filter_by_time(&self.trips, self.time_filter);
        self.traffic = aggregate(&self.stations, &active);
        self.markers = marker::build_markers(&self.traffic, view);
        self.stats = TrafficStats::from_pass(
            self.time_filter,
            self.trips.len(),
            active.len(),
            &self.traffic,
        );
        self.layer.draw(&self.markers);

        debug!(
            time_filter = i32::from(self.time_filter),
            active_trips = active.len(),
            "Traffic recomputed"
        );
    }

    /// False until both datasets were loaded; the map then shows base layers only.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn time_filter(&self) -> TimeFilter {
        self.time_filter
    }

    pub fn stations(&self) -> &[Station] {
        &self.traffic
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn stats(&self) -> &TrafficStats {
        &self.stats
    }

    pub fn layer(&self) -> &L {
        &self.layer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::ScreenPoint;
    use chrono::NaiveDate;

    #[derive(Default)]
    struct Recording {
        draws: usize,
        repositions: usize,
    }

    impl MarkerLayer for Recording {
        fn draw(&mut self, _markers: &[Marker]) {
            self.draws += 1;
        }

        fn reposition(&mut self, _markers: &[Marker]) {
            self.repositions += 1;
        }
    }

    struct Offset(f64);

    impl MapView for Offset {
        fn project(&self, lon: f64, lat: f64) -> ScreenPoint {
            ScreenPoint {
                x: lon + self.0,
                y: lat,
            }
        }
    }

    fn trip(start: &str, end: &str, start_min: u32, end_min: u32) -> Trip {
        let at = |m: u32| {
            NaiveDate::from_ymd_opt(2024, 3, 5)
                .unwrap()
                .and_hms_opt(m / 60, m % 60, 0)
        };
        Trip {
            start_station_id: start.into(),
            end_station_id: end.into(),
            started_at: at(start_min),
            ended_at: at(end_min),
        }
    }

    fn loaded() -> TrafficMap<Recording> {
        let mut map = TrafficMap::new(Recording::default());
        map.on_load(
            vec![Station::new("A", 0.0, 0.0), Station::new("B", 1.0, 1.0)],
            vec![trip("A", "B", 480, 500), trip("A", "A", 1000, 1010)],
            &Offset(0.0),
        );
        map
    }

    #[test]
    fn test_load_draws_unfiltered() {
        let map = loaded();
        assert!(map.is_loaded());
        assert_eq!(map.layer().draws, 1);
        assert_eq!(map.time_filter(), TimeFilter::Any);
        assert_eq!(map.stations()[0].total_traffic, 3);
        assert_eq!(map.markers()[0].radius, 25.0);
        assert_eq!(map.stats().active_trips, 2);
    }

    #[test]
    fn test_slider_recomputes_without_accumulating() {
        let mut map = loaded();
        let stats = map.on_slider_input(490, &Offset(0.0));
        assert_eq!(stats.active_trips, 1);
        assert_eq!(map.stations()[0].departures, 1);
        assert_eq!(map.stations()[0].arrivals, 0);
        assert_eq!(map.stations()[1].arrivals, 1);

        map.on_slider_input(-1, &Offset(0.0));
        assert_eq!(map.stations()[0].total_traffic, 3);
        assert_eq!(map.layer().draws, 3);
    }

    #[test]
    fn test_camera_event_only_repositions() {
        let mut map = loaded();
        let radius = map.markers()[1].radius;

        map.dispatch(UiEvent::Camera(CameraEvent::Move), &Offset(5.0));
        assert_eq!(map.markers()[1].position.x, 6.0);
        assert_eq!(map.markers()[1].radius, radius);
        assert_eq!(map.layer().draws, 1);
        assert_eq!(map.layer().repositions, 1);
    }

    #[test]
    fn test_pan_repositions_markers() {
        let mut map = loaded();
        let mut camera = crate::view::Camera::from_config(&crate::config::MapConfig::default());
        map.on_camera(CameraEvent::MoveEnd, &camera);
        let before = map.markers()[1].position;

        let event = camera.pan_to(camera.center[0] + 0.05, camera.center[1]);
        map.dispatch(UiEvent::Camera(event), &camera);
        assert!(map.markers()[1].position.x < before.x);
        assert_eq!(map.markers()[1].position.y, before.y);
        assert_eq!(map.layer().repositions, 2);
    }

    #[tokio::test]
    async fn test_initialize_from_local_files() {
        let client = crate::fetch::BasicClient::new().unwrap();
        let sources = DataSources {
            stations: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/stations.json").into(),
            trips: concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/trips.csv").into(),
        };
        let map = TrafficMap::initialize(Recording::default(), &client, &sources, &Offset(0.0)).await;
        assert!(map.is_loaded());
        assert_eq!(map.markers().len(), 4);
        assert_eq!(map.stats().total_trips, 7);
        assert_eq!(map.layer().draws, 1);
    }

    #[test]
    fn test_dispatch_slider() {
        let mut map = loaded();
        map.dispatch(UiEvent::SliderInput(1005), &Offset(0.0));
        assert_eq!(map.time_filter(), TimeFilter::Minute(1005));
        assert_eq!(map.stations()[0].total_traffic, 2);
        assert_eq!(map.stations()[1].total_traffic, 0);
    }

    #[test]
    fn test_empty_map_has_no_markers() {
        let mut map = TrafficMap::new(Recording::default());
        map.on_camera(CameraEvent::Resize, &Offset(0.0));
        assert!(map.markers().is_empty());
        map.on_slider_input(600, &Offset(0.0));
        assert!(map.markers().is_empty());
    }

    #[tokio::test]
    async fn test_failed_initialize_leaves_base_map() {
        let client = crate::fetch::BasicClient::new().unwrap();
        let sources = DataSources {
            stations: "/nonexistent/stations.json".into(),
            trips: "/nonexistent/trips.csv".into(),
        };
        let map = TrafficMap::initialize(Recording::default(), &client, &sources, &Offset(0.0)).await;
        assert!(!map.is_loaded());
        assert!(map.markers().is_empty());
        assert_eq!(map.layer().draws, 0);
    }
}
