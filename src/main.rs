//! CLI entry point for the bike-share traffic map.
//!
//! Provides subcommands for rendering the station marker layer at a given
//! time of day, listing the busiest stations, and scrubbing the time slider
//! across the day.

use anyhow::Result;
use bike_traffic_map::{
    config::{DataSources, MapConfig},
    controller::{TracingLayer, TrafficMap},
    fetch::BasicClient,
    output::{MapDocument, append_record, marker_collection, print_json, print_pretty, write_json},
    publish::write_json_to_s3,
    slider,
    view::{Camera, base_layers},
};
use clap::{Args, Parser, Subcommand};
use std::ffi::OsStr;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "bike_traffic_map")]
#[command(about = "Bike-share station traffic by time of day", long_about = None)]
struct Cli {
    #[command(flatten)]
    sources: SourceArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SourceArgs {
    /// Station list JSON (file or URL); defaults to $STATIONS_URL
    #[arg(long, global = true)]
    stations: Option<String>,

    /// Trip log CSV (file or URL); defaults to $TRIPS_URL
    #[arg(long, global = true)]
    trips: Option<String>,

    /// JSON file overriding the initial camera and basemap
    #[arg(long, global = true)]
    map_config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the marker layer for one slider position
    Render {
        /// Minute of the day (0-1439), or -1 for all trips
        #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
        time: i32,

        /// GeoJSON file to write markers to
        #[arg(short, long, default_value = "markers.geojson")]
        output: String,

        /// Optional: also write a full map document (camera, layers, markers)
        #[arg(long)]
        document: Option<String>,

        /// Optional: S3 bucket to upload the marker layer to
        #[arg(long)]
        s3_bucket: Option<String>,

        /// Optional: Gzip compress the upload
        #[arg(long, default_value_t = false)]
        gzip: bool,
    },
    /// Log the busiest stations for one slider position
    Stations {
        #[arg(short, long, default_value_t = -1, allow_hyphen_values = true)]
        time: i32,

        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },
    /// Scrub the slider across the day and append one stats row per position
    Timeline {
        /// Minutes between slider positions
        #[arg(short, long, default_value_t = 60)]
        step: u32,

        /// CSV file to append results to
        #[arg(short, long, default_value = "timeline.csv")]
        output: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/bike_traffic_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("bike_traffic_map.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let sources = DataSources::from_env().with_overrides(cli.sources.stations, cli.sources.trips);
    let map_config = match &cli.sources.map_config {
        Some(path) => MapConfig::load(path)?,
        None => MapConfig::default(),
    };
    let camera = Camera::from_config(&map_config);

    let client = BasicClient::new()?;
    let mut map = TrafficMap::initialize(TracingLayer, &client, &sources, &camera).await;
    if !map.is_loaded() {
        anyhow::bail!("no station data loaded from '{}' / '{}'", sources.stations, sources.trips);
    }

    match cli.command {
        Commands::Render {
            time,
            output,
            document,
            s3_bucket,
            gzip,
        } => {
            let stats = map.on_slider_input(time, &camera);
            print_pretty(stats);

            let markers = marker_collection(map.markers());
            write_json(&output, &markers)?;
            info!(output = %output, markers = map.markers().len(), "Marker layer written");

            if let Some(path) = document {
                let layers = base_layers();
                let doc = MapDocument {
                    style: &map_config.style,
                    camera: &camera,
                    layers: &layers,
                    time_filter: time,
                    label: slider::label(map.time_filter()),
                    markers: markers.clone(),
                };
                write_json(&path, &doc)?;
                info!(document = %path, "Map document written");
            }

            if let Some(bucket) = s3_bucket {
                let config = aws_config::load_from_env().await;
                let s3 = aws_sdk_s3::Client::new(&config);
                let key = match i32::from(map.time_filter()) {
                    -1 => "markers/any.geojson".to_string(),
                    minute => format!("markers/minute={minute}.geojson"),
                };
                write_json_to_s3(&s3, &bucket, &key, &markers, gzip).await?;
            }
        }
        Commands::Stations { time, limit } => {
            let stats = map.on_slider_input(time, &camera);
            print_json(stats)?;

            let mut ranked: Vec<_> = map.stations().iter().collect();
            ranked.sort_by(|a, b| b.total_traffic.cmp(&a.total_traffic));

            for station in ranked.into_iter().take(limit) {
                info!(
                    short_name = %station.short_name,
                    name = station.name.as_deref().unwrap_or(""),
                    total = station.total_traffic,
                    departures = station.departures,
                    arrivals = station.arrivals,
                    "Station"
                );
            }
        }
        Commands::Timeline { step, output } => {
            for position in slider::scrub_positions(step) {
                let stats = map.on_slider_input(position.into(), &camera);
                info!(
                    label = %stats.label,
                    active_trips = stats.active_trips,
                    busiest = stats.busiest_station.as_deref().unwrap_or("-"),
                    "Slider position"
                );
                append_record(&output, stats)?;
            }
            info!(output = %output, "Timeline written");
        }
    }

    Ok(())
}
