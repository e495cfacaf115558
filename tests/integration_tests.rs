use bike_traffic_map::controller::{TracingLayer, TrafficMap};
use bike_traffic_map::loader::{parse_stations, parse_trips};
use bike_traffic_map::marker::build_markers;
use bike_traffic_map::output::marker_collection;
use bike_traffic_map::time_filter::filter_by_time;
use bike_traffic_map::traffic::aggregate;
use bike_traffic_map::types::TimeFilter;
use bike_traffic_map::config::MapConfig;
use bike_traffic_map::view::Camera;

fn fixtures() -> (
    Vec<bike_traffic_map::types::Station>,
    Vec<bike_traffic_map::types::Trip>,
) {
    let stations = parse_stations(include_bytes!("fixtures/stations.json"))
        .expect("Failed to parse stations");
    let trips = parse_trips(include_bytes!("fixtures/trips.csv")).expect("Failed to parse trips");
    (stations, trips)
}

#[test]
fn test_full_pipeline_unfiltered() {
    let (stations, trips) = fixtures();
    assert_eq!(stations.len(), 4);
    assert_eq!(trips.len(), 7);

    let traffic = aggregate(&stations, &filter_by_time(&trips, TimeFilter::Any));
    let by_id = |id: &str| traffic.iter().find(|s| s.short_name == id).unwrap();

    assert_eq!(by_id("M32006").departures, 3);
    assert_eq!(by_id("M32006").arrivals, 3);
    assert_eq!(by_id("M32011").departures, 2);
    assert_eq!(by_id("M32011").arrivals, 2);
    assert_eq!(by_id("A32000").total_traffic, 2);
    assert_eq!(by_id("D32005").total_traffic, 0);

    // r07 starts at an unknown station
    let departures: u32 = traffic.iter().map(|s| s.departures).sum();
    assert_eq!(departures, 6);
}

#[test]
fn test_full_pipeline_morning_window() {
    let (stations, trips) = fixtures();
    // 8:45 AM
    let active = filter_by_time(&trips, TimeFilter::Minute(525));
    let ids: Vec<_> = active.iter().map(|t| t.start_station_id.as_str()).collect();
    assert_eq!(ids, vec!["M32006", "M32011", "A32000"]);

    let traffic = aggregate(&stations, &active);
    let camera = Camera::from_config(&MapConfig::default());
    let markers = build_markers(&traffic, &camera);

    let busiest = markers.iter().find(|m| m.short_name == "M32006").unwrap();
    assert_eq!(busiest.radius, 25.0);
    assert_eq!(busiest.tooltip, "3 trips (1 departures, 2 arrivals)");
    assert_eq!(busiest.departure_mix, Some(0.5));

    let idle = markers.iter().find(|m| m.short_name == "D32005").unwrap();
    assert_eq!(idle.radius, 0.0);
    assert_eq!(idle.departure_mix, None);
}

#[test]
fn test_controller_scrub_and_render() {
    let (stations, trips) = fixtures();
    let camera = Camera::from_config(&MapConfig::default());
    let mut map = TrafficMap::new(TracingLayer);
    map.on_load(stations, trips, &camera);

    assert_eq!(map.stats().active_trips, 7);

    // 6:00 PM: r04 and r05
    let stats = map.on_slider_input(1080, &camera);
    assert_eq!(stats.active_trips, 2);
    assert_eq!(stats.busiest_station.as_deref(), Some("M32006"));

    let fc = marker_collection(map.markers());
    assert_eq!(fc["features"].as_array().unwrap().len(), 4);

    // 12:05 AM does not see r06's late-night start across midnight, only its end
    let stats = map.on_slider_input(5, &camera);
    assert_eq!(stats.active_trips, 1);
    assert_eq!(stats.unmatched_departures, 0);
}
