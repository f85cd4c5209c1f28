/// Dashboard composition: one render cycle from selections to view model.
///
/// `render_dashboard` queries the feed, builds the event table and, when
/// anything survives the filters, derives the summary, table rows,
/// histograms and map view. An empty table short-circuits to
/// `DashboardView::NoData` before any aggregate is computed.

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use crate::analysis::histogram::{frequency_histogram, HistogramBin};
use crate::analysis::transform::{build_table, summarize};
use crate::config::{DashboardConfig, HistogramSettings};
use crate::ingest::FeedAdapter;
use crate::model::{CleanedEvent, Classification, EventSummary, FeedError, GeoRegion};

pub const NO_DATA_MESSAGE: &str = "No seismic events for the selected filters.";

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// One row of the events table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub timestamp: Option<DateTime<Utc>>,
    pub place: String,
    pub magnitude: f64,
    pub classification: Classification,
}

/// A single map marker. Color is driven by `magnitude`, radius by `size`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub magnitude: f64,
    pub size: f64,
    pub place: String,
    pub depth: Option<f64>,
    pub classification: Classification,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapView {
    pub center_latitude: f64,
    pub center_longitude: f64,
    pub zoom: u8,
    pub points: Vec<MapPoint>,
}

/// Everything a front end needs to draw a populated dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub requested_at: DateTime<Utc>,
    pub summary: EventSummary,
    /// `None` when the table is switched off.
    pub table: Option<Vec<TableRow>>,
    pub magnitude_histogram: Vec<HistogramBin>,
    pub depth_histogram: Vec<HistogramBin>,
    /// `None` when the map is switched off.
    pub map: Option<MapView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DashboardView {
    Ready(Dashboard),
    NoData {
        requested_at: DateTime<Utc>,
        message: String,
    },
}

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// First `limit` events in feed order.
pub fn table_rows(events: &[CleanedEvent], limit: usize) -> Vec<TableRow> {
    events
        .iter()
        .take(limit)
        .map(|e| TableRow {
            timestamp: e.timestamp,
            place: e.place.clone(),
            magnitude: e.magnitude,
            classification: e.classification,
        })
        .collect()
}

pub fn map_view(events: &[CleanedEvent], region: GeoRegion) -> MapView {
    let (center_latitude, center_longitude) = region.map_center();

    MapView {
        center_latitude,
        center_longitude,
        zoom: region.map_zoom(),
        points: events
            .iter()
            .map(|e| MapPoint {
                latitude: e.latitude,
                longitude: e.longitude,
                magnitude: e.magnitude,
                size: e.marker_size,
                place: e.place.clone(),
                depth: e.depth,
                classification: e.classification,
            })
            .collect(),
    }
}

/// Derives the view model from an already-built table.
///
/// Pure apart from the caller-supplied timestamp, which keeps it testable.
pub fn compose_dashboard(
    events: &[CleanedEvent],
    config: &DashboardConfig,
    histograms: &HistogramSettings,
    requested_at: DateTime<Utc>,
) -> DashboardView {
    let Some(summary) = summarize(events) else {
        return DashboardView::NoData {
            requested_at,
            message: NO_DATA_MESSAGE.to_string(),
        };
    };

    let magnitudes: Vec<f64> = events.iter().map(|e| e.magnitude).collect();
    let depths: Vec<f64> = events.iter().filter_map(|e| e.depth).collect();

    DashboardView::Ready(Dashboard {
        requested_at,
        summary,
        table: config
            .show_table
            .then(|| table_rows(events, config.table_rows())),
        magnitude_histogram: frequency_histogram(&magnitudes, histograms.magnitude_bins),
        depth_histogram: frequency_histogram(&depths, histograms.depth_bins),
        map: config.show_map.then(|| map_view(events, config.region)),
    })
}

/// Runs one full render cycle against the feed.
///
/// # Errors
/// Feed failures are returned unchanged; there is no local recovery.
pub fn render_dashboard(
    feed: &dyn FeedAdapter,
    config: &DashboardConfig,
    histograms: &HistogramSettings,
) -> Result<DashboardView, FeedError> {
    let requested_at = Utc::now();
    let raw = feed.query(config.severity, config.period)?;
    let events = build_table(&raw, config.region);

    info!(
        "Dashboard {}_{} ({}): {} of {} events kept",
        config.severity,
        config.period,
        config.region,
        events.len(),
        raw.len()
    );

    Ok(compose_dashboard(&events, config, histograms, requested_at))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
