/// quakemon_service: earthquake dashboard for Puerto Rico and the world.
///
/// # Module structure
///
/// ```text
/// quakemon_service
/// ├── model       — shared data types (RawEvent, CleanedEvent, GeoRegion, FeedError, …)
/// ├── config      — service settings and dashboard selections (quakemon.toml)
/// ├── ingest
/// │   ├── usgs_quakes — USGS summary feed: URL construction + GeoJSON parsing
/// │   └── fixtures (test only) — representative feed payloads
/// ├── analysis
/// │   ├── transform — coercion, classification, region filter, summary stats
/// │   └── histogram — equal-width frequency bins
/// ├── dashboard   — one render cycle: feed → table → view model
/// ├── render      — plain-text terminal output
/// └── endpoint    — HTTP API serving dashboards as JSON
/// ```

/// Public modules
pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod endpoint;
pub mod ingest;
pub mod model;
pub mod render;
