/// Feed ingestion.
///
/// - `usgs_quakes` — USGS earthquake summary feed: URL construction,
///   GeoJSON parsing and the blocking HTTP client.
/// - `fixtures` (test only) — representative feed payloads.

pub mod usgs_quakes;

#[cfg(test)]
pub(crate) mod fixtures;

pub use usgs_quakes::{FeedAdapter, UsgsQuakeFeed};
