//! CLI entry point for quake_atlas.
//!
//! Loads the earthquake feed once and prints the per-country tally, the
//! country selector, a single country's selection, or the map markers.

use anyhow::{Result, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use quake_atlas::atlas::{Dataset, LoadState};
use quake_atlas::country::event_country;
use quake_atlas::fetch::{BasicClient, DEFAULT_FEED_URL};
use quake_atlas::output::{Summary, append_tally, print_json, print_pretty};
use quake_atlas::view::Marker;
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
#[command(name = "quake_atlas")]
#[command(about = "Summarize the USGS earthquake feed by country", long_about = None)]
struct Cli {
    /// Feed URL or local GeoJSON file. Falls back to $QUAKE_FEED_URL, then
    /// the USGS past-day feed.
    #[arg(short, long, global = true, value_name = "FILE_OR_URL")]
    source: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the per-country tally, most active first
    Summary {
        /// Emit the tally as JSON instead of a table
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Optional: CSV file to append tally rows to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// List the entries of the country selector
    Countries,
    /// Show the count and map bounds for one country
    Select {
        /// Country label, e.g. "Japan" or "Unknown"
        country: String,
    },
    /// List map markers with their severity tier
    Markers {
        /// Only show markers of this country
        #[arg(short, long)]
        country: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/quake_atlas.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("quake_atlas.log"));

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

    let source = cli
        .source
        .or_else(|| std::env::var("QUAKE_FEED_URL").ok())
        .unwrap_or_else(|| DEFAULT_FEED_URL.to_string());

    let state = load(&source).await?;
    let dataset = state
        .dataset()
        .ok_or_else(|| anyhow!("{}", state.error().unwrap_or("feed not loaded")))?;

    match cli.command {
        Commands::Summary { json, output } => {
            let summary = Summary::from_dataset(dataset);
            print_pretty(&summary);

            if json {
                print_json(&summary)?;
            } else {
                for row in &summary.countries {
                    println!("{:<40} {:>5}", row.country, row.count);
                }
            }

            if let Some(path) = output {
                append_tally(&path, &summary)?;
                info!(path = %path, rows = summary.countries.len(), "Tally appended");
            }
        }
        Commands::Countries => {
            for option in dataset.selector_options() {
                if option.value.is_empty() {
                    continue;
                }
                let count = dataset.index().count(&option.value);
                println!("{:<40} {:>5}", option.label, count);
            }
        }
        Commands::Select { country } => {
            let selection = dataset.select(&country);
            if let Some(message) = selection.message() {
                println!("{message}");
            }
            match selection.bounds {
                Some(bounds) => {
                    let center = bounds.center();
                    println!("center: {:.3},{:.3}", center.lat, center.lng);
                    if let Some(viewport) = selection.viewport() {
                        println!("{}", serde_json::to_string_pretty(&viewport)?);
                    }
                }
                None => info!(country = %country, "No viewport change"),
            }
        }
        Commands::Markers { country } => {
            let selected = dataset.events().iter().filter(|e| {
                country
                    .as_deref()
                    .is_none_or(|c| event_country(e) == c)
            });
            for marker in selected.map(Marker::from_event) {
                println!(
                    "[{:>6}] {:>8.3},{:>9.3}  {}",
                    marker.tier,
                    marker.position.lat,
                    marker.position.lng,
                    marker.popup.render(&Local).replace('\n', " | ")
                );
            }
        }
    }

    Ok(())
}

/// Loads the feed from a local file path or fetches it over HTTP.
#[tracing::instrument]
async fn load(source: &str) -> Result<LoadState> {
    let state = if source.starts_with("http") {
        LoadState::load(&BasicClient::new(), source).await
    } else {
        let bytes = std::fs::read(source)?;
        LoadState::from_result(Dataset::from_bytes(&bytes))
    };
    Ok(state)
}
