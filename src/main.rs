//! Earthquake Monitoring Service - Dashboard CLI
//!
//! Fetches recent earthquakes from the USGS summary feed, filters them by
//! severity, time window and region, and either:
//! 1. Prints one dashboard (summary, table, histograms, map framing), or
//! 2. Serves dashboards as JSON over HTTP, one render per request.
//!
//! Usage:
//!   cargo run --release                                  # Puerto Rico, all, past month
//!   cargo run --release -- --region world --severity 4.5 # Worldwide M4.5+
//!   cargo run --release -- --endpoint 8080               # Serve /dashboard on port 8080
//!
//! Environment:
//!   QUAKEMON_FEED_URL - override the feed base URL
//!   RUST_LOG          - log verbosity (e.g. `info`, `quakemon_service=debug`)

use std::path::PathBuf;

use clap::Parser;
use quakemon_service::config::{self, DashboardConfig};
use quakemon_service::dashboard::render_dashboard;
use quakemon_service::endpoint;
use quakemon_service::ingest::UsgsQuakeFeed;
use quakemon_service::model::{GeoRegion, Period, Severity};
use quakemon_service::render::format_view;

#[derive(Parser)]
#[command(name = "quakemon", about = "Earthquake dashboard for Puerto Rico and the world")]
struct Cli {
    /// Feed severity: all, significant, 4.5, 2.5, 1.0
    #[arg(long)]
    severity: Option<Severity>,
    /// Time window: day, week, month
    #[arg(long)]
    period: Option<Period>,
    /// Region: puerto-rico or world
    #[arg(long)]
    region: Option<GeoRegion>,
    /// Table rows to show (5-20)
    #[arg(long, value_parser = clap::value_parser!(u8).range(5..=20))]
    count: Option<u8>,
    /// Hide the map section
    #[arg(long)]
    no_map: bool,
    /// Hide the events table
    #[arg(long)]
    no_table: bool,
    /// Configuration file (defaults to ./quakemon.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Serve dashboards over HTTP on this port instead of printing one
    #[arg(long)]
    endpoint: Option<u16>,
}

impl Cli {
    /// Command-line selections layered over the configured defaults.
    fn selections(&self, defaults: &DashboardConfig) -> DashboardConfig {
        let mut selections = defaults.clone();
        if let Some(severity) = self.severity {
            selections.severity = severity;
        }
        if let Some(period) = self.period {
            selections.period = period;
        }
        if let Some(region) = self.region {
            selections.region = region;
        }
        if let Some(count) = self.count {
            selections.event_count = usize::from(count);
        }
        if self.no_map {
            selections.show_map = false;
        }
        if self.no_table {
            selections.show_table = false;
        }
        selections
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let service_config = config::load_config(cli.config.as_deref())?;
    let feed = UsgsQuakeFeed::new(&service_config.feed)?;

    if let Some(port) = cli.endpoint {
        println!("🌎 Earthquake Monitoring Service");
        println!("================================\n");
        println!("   Feed: {}", feed.base_url());
        endpoint::start_endpoint_server(port, &feed, &service_config)?;
        return Ok(());
    }

    let selections = cli.selections(&service_config.dashboard);
    println!(
        "🌎 Earthquakes: severity {}, past {}, region {}\n",
        selections.severity, selections.period, selections.region
    );

    let view = render_dashboard(&feed, &selections, &service_config.histogram)?;
    print!("{}", format_view(&view));

    Ok(())
}
