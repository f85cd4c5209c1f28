/// USGS earthquake summary feed client.
///
/// Handles URL construction and GeoJSON parsing for the real-time summary
/// feeds published at:
///   https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/
///
/// One feed exists per (severity, period) pair, e.g. `4.5_week.geojson`.
/// See `fixtures.rs` for annotated examples of the response structure.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::Deserialize;
use serde_json::Value;

use crate::config::FeedSettings;
use crate::model::{FeedError, FeedValue, Period, RawEvent, Severity};

pub const DEFAULT_FEED_BASE_URL: &str = "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

// ---------------------------------------------------------------------------
// Feed abstraction
// ---------------------------------------------------------------------------

/// Source of raw seismic events for one severity/period selection.
///
/// Failures are fatal for the current render cycle; implementations do
/// not retry.
pub trait FeedAdapter {
    fn query(&self, severity: Severity, period: Period) -> Result<Vec<RawEvent>, FeedError>;
}

// ---------------------------------------------------------------------------
// Serde structures for GeoJSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

// Members are read as loose `Value`s so a null or mistyped field in one
// feature never fails the whole collection.
#[derive(Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Value,
    #[serde(default)]
    geometry: Value,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds the summary feed URL for a severity and period.
///
/// # Example
/// ```
/// use quakemon_service::ingest::usgs_quakes::{build_feed_url, DEFAULT_FEED_BASE_URL};
/// use quakemon_service::model::{Period, Severity};
///
/// let url = build_feed_url(DEFAULT_FEED_BASE_URL, Severity::M4_5, Period::Week);
/// assert!(url.ends_with("/4.5_week.geojson"));
/// ```
pub fn build_feed_url(base_url: &str, severity: Severity, period: Period) -> String {
    format!(
        "{}/{}_{}.geojson",
        base_url.trim_end_matches('/'),
        severity.as_ref(),
        period.as_ref()
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

fn feed_value(value: Option<&Value>) -> FeedValue {
    match value {
        Some(Value::Number(n)) => n.as_f64().map_or(FeedValue::Missing, FeedValue::Number),
        Some(Value::String(s)) => FeedValue::Text(s.clone()),
        _ => FeedValue::Missing,
    }
}

/// USGS reports `time` as milliseconds since the epoch. Some mirrors send
/// RFC 3339 strings instead; anything else is left empty.
fn parse_event_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        _ => None,
    }
}

/// Parses a summary feed GeoJSON body into raw events, in feed order.
///
/// Field values are not validated here: a null magnitude or a string
/// latitude is carried through as a `FeedValue` for the transformer to
/// judge. A feature with null or missing geometry yields missing
/// coordinates, and a null or non-text place becomes an empty string.
///
/// # Errors
/// `FeedError::Parse` when the body is not a FeatureCollection.
pub fn parse_feed_response(json: &str) -> Result<Vec<RawEvent>, FeedError> {
    let collection: FeatureCollection = serde_json::from_str(json)
        .map_err(|e| FeedError::Parse(format!("GeoJSON deserialization failed: {}", e)))?;

    let events = collection
        .features
        .into_iter()
        .map(|feature| {
            let properties = &feature.properties;
            let coordinates = feature
                .geometry
                .get("coordinates")
                .and_then(Value::as_array)
                .map(Vec::as_slice)
                .unwrap_or_default();

            RawEvent {
                timestamp: properties.get("time").and_then(parse_event_time),
                longitude: feed_value(coordinates.first()),
                latitude: feed_value(coordinates.get(1)),
                place: properties
                    .get("place")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                magnitude: feed_value(properties.get("mag")),
                depth: feed_value(coordinates.get(2)),
            }
        })
        .collect();

    Ok(events)
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Blocking client for the live USGS summary feeds.
pub struct UsgsQuakeFeed {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl UsgsQuakeFeed {
    pub fn new(settings: &FeedSettings) -> Result<Self, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl FeedAdapter for UsgsQuakeFeed {
    fn query(&self, severity: Severity, period: Period) -> Result<Vec<RawEvent>, FeedError> {
        let url = build_feed_url(&self.base_url, severity, period);
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/geo+json, application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(FeedError::Status {
                status: response.status().as_u16(),
                url,
            });
        }

        let body = response.text()?;
        let events = parse_feed_response(&body)?;
        info!("Feed {}_{} returned {} events", severity, period, events.len());

        Ok(events)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- URL construction ----------------------------------------------------

    #[test]
    fn test_build_feed_url_uses_feed_segments() {
        assert_eq!(
            build_feed_url(DEFAULT_FEED_BASE_URL, Severity::All, Period::Month),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson"
        );
        assert_eq!(
            build_feed_url(DEFAULT_FEED_BASE_URL, Severity::Significant, Period::Day),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/significant_day.geojson"
        );
        assert_eq!(
            build_feed_url(DEFAULT_FEED_BASE_URL, Severity::M1_0, Period::Week),
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_week.geojson"
        );
    }

    #[test]
    fn test_build_feed_url_tolerates_trailing_slash() {
        assert_eq!(
            build_feed_url("http://localhost:9000/feed/", Severity::M2_5, Period::Day),
            "http://localhost:9000/feed/2.5_day.geojson"
        );
    }

    // --- Parsing: happy path -------------------------------------------------

    #[test]
    fn test_parse_puerto_rico_feed() {
        let events = parse_feed_response(fixture_puerto_rico_json()).expect("fixture should parse");
        assert_eq!(events.len(), 3);

        let first = &events[0];
        assert_eq!(first.place, "8 km SSW of Tallaboa, Puerto Rico");
        assert_eq!(first.magnitude, FeedValue::Number(2.94));
        assert_eq!(first.longitude, FeedValue::Number(-66.7355));
        assert_eq!(first.latitude, FeedValue::Number(17.9211));
        assert_eq!(first.depth, FeedValue::Number(11.37));
        assert_eq!(
            first.timestamp,
            DateTime::<Utc>::from_timestamp_millis(1_714_566_000_000)
        );
    }

    #[test]
    fn test_parse_preserves_feed_order() {
        let events = parse_feed_response(fixture_puerto_rico_json()).expect("fixture should parse");
        let places: Vec<&str> = events.iter().map(|e| e.place.as_str()).collect();
        assert_eq!(
            places,
            vec![
                "8 km SSW of Tallaboa, Puerto Rico",
                "Puerto Rico region",
                "45 km N of Hatillo, Puerto Rico",
            ]
        );
    }

    // --- Parsing: malformed values -------------------------------------------

    #[test]
    fn test_parse_carries_null_and_string_values_through() {
        let events = parse_feed_response(fixture_malformed_values_json()).expect("fixture should parse");
        assert_eq!(events.len(), 3);

        assert_eq!(events[0].magnitude, FeedValue::Missing);
        assert_eq!(events[1].magnitude, FeedValue::Text("3.1".to_string()));
        assert_eq!(events[1].latitude, FeedValue::Text("18.1".to_string()));
        assert_eq!(events[2].longitude, FeedValue::Missing);
        assert_eq!(events[2].latitude, FeedValue::Missing);
        assert_eq!(events[2].place, "");
    }

    #[test]
    fn test_parse_accepts_rfc3339_time() {
        let events = parse_feed_response(fixture_malformed_values_json()).expect("fixture should parse");
        let expected = DateTime::parse_from_rfc3339("2024-05-01T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(events[1].timestamp, Some(expected));
        assert_eq!(events[2].timestamp, None);
    }

    #[test]
    fn test_parse_tolerates_null_members() {
        let events = parse_feed_response(fixture_null_members_json()).expect("fixture should parse");
        assert_eq!(events.len(), 3);

        assert_eq!(events[1].magnitude, FeedValue::Number(2.8));
        assert_eq!(events[1].longitude, FeedValue::Missing);
        assert_eq!(events[1].depth, FeedValue::Missing);
        assert_eq!(events[1].place, "");

        assert_eq!(events[2].magnitude, FeedValue::Missing);
        assert_eq!(events[2].timestamp, None);
        assert_eq!(events[2].latitude, FeedValue::Number(18.3));

        let table = crate::analysis::transform::build_table(&events, crate::model::GeoRegion::World);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].place, "12 km S of Ponce, Puerto Rico");
    }

    #[test]
    fn test_parse_empty_feature_collection() {
        let events = parse_feed_response(fixture_empty_feed_json()).expect("fixture should parse");
        assert!(events.is_empty());
    }

    #[test]
    fn test_parse_rejects_non_geojson_body() {
        let result = parse_feed_response("<html>Service Unavailable</html>");
        assert!(matches!(result, Err(FeedError::Parse(_))));

        let result = parse_feed_response(r#"{"type": "FeatureCollection"}"#);
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_usgs_feed_keeps_configured_base_url() {
        let settings = FeedSettings {
            base_url: "http://localhost:9000/feed".to_string(),
            ..FeedSettings::default()
        };
        let feed = UsgsQuakeFeed::new(&settings).expect("client should build");
        assert_eq!(feed.base_url(), "http://localhost:9000/feed");
    }
}
