/// Shared data types for the earthquake dashboard service.
///
/// Raw feed records (`RawEvent`), cleaned and classified records
/// (`CleanedEvent`), the feed query enums (`Severity`, `Period`) and the
/// geographic filter (`GeoRegion`) all live here so the ingest, analysis
/// and dashboard layers agree on one vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Feed query parameters
// ---------------------------------------------------------------------------

/// Severity filter understood by the USGS summary feed.
///
/// The string forms are the feed's own path segments, so
/// `Severity::M4_5.as_ref()` is `"4.5"`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
pub enum Severity {
    #[default]
    #[serde(rename = "all")]
    #[strum(serialize = "all")]
    All,
    #[serde(rename = "significant")]
    #[strum(serialize = "significant")]
    Significant,
    #[serde(rename = "4.5")]
    #[strum(serialize = "4.5")]
    M4_5,
    #[serde(rename = "2.5")]
    #[strum(serialize = "2.5")]
    M2_5,
    #[serde(rename = "1.0")]
    #[strum(serialize = "1.0")]
    M1_0,
}

/// Time window covered by a feed query.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    #[default]
    Month,
}

// ---------------------------------------------------------------------------
// Geography
// ---------------------------------------------------------------------------

/// Puerto Rico bounding box (inclusive on every edge).
pub const PUERTO_RICO_LAT_RANGE: (f64, f64) = (17.0, 19.0);
pub const PUERTO_RICO_LON_RANGE: (f64, f64) = (-68.0, -64.0);

/// Geographic constraint applied after retrieval.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum GeoRegion {
    #[default]
    PuertoRico,
    World,
}

impl GeoRegion {
    /// True when the coordinate falls inside this region.
    pub fn contains(self, latitude: f64, longitude: f64) -> bool {
        match self {
            GeoRegion::PuertoRico => {
                let (lat_min, lat_max) = PUERTO_RICO_LAT_RANGE;
                let (lon_min, lon_max) = PUERTO_RICO_LON_RANGE;
                latitude >= lat_min
                    && latitude <= lat_max
                    && longitude >= lon_min
                    && longitude <= lon_max
            }
            GeoRegion::World => true,
        }
    }

    /// Map center as (latitude, longitude).
    pub fn map_center(self) -> (f64, f64) {
        match self {
            GeoRegion::PuertoRico => (18.2, -66.3),
            GeoRegion::World => (0.0, 0.0),
        }
    }

    pub fn map_zoom(self) -> u8 {
        match self {
            GeoRegion::PuertoRico => 7,
            GeoRegion::World => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A loosely-typed numeric field as delivered by the feed.
///
/// The USGS GeoJSON normally carries numbers, but mirrors and hand-built
/// feeds sometimes send strings or nulls, so nothing is assumed until
/// `parse_optional_number` has looked at it.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedValue {
    Number(f64),
    Text(String),
    Missing,
}

impl From<f64> for FeedValue {
    fn from(value: f64) -> Self {
        FeedValue::Number(value)
    }
}

impl From<&str> for FeedValue {
    fn from(value: &str) -> Self {
        FeedValue::Text(value.to_string())
    }
}

impl From<Option<f64>> for FeedValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(FeedValue::Missing, FeedValue::Number)
    }
}

/// One seismic event exactly as the feed reported it.
#[derive(Debug, Clone, PartialEq)]
pub struct RawEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub longitude: FeedValue,
    pub latitude: FeedValue,
    pub place: String,
    pub magnitude: FeedValue,
    pub depth: FeedValue,
}

/// Magnitude bucket label.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Classification {
    Micro,
    Minor,
    Light,
    Moderate,
    Strong,
    Major,
    Extreme,
    Legendary,
}

/// A feed event after coercion, classification and marker sizing.
///
/// Magnitude, latitude and longitude are always finite; `marker_size` is
/// always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedEvent {
    pub timestamp: Option<DateTime<Utc>>,
    pub longitude: f64,
    pub latitude: f64,
    pub place: String,
    pub magnitude: f64,
    /// Depth in kilometers; `None` when the feed value was unusable.
    pub depth: Option<f64>,
    pub classification: Classification,
    pub marker_size: f64,
}

/// Aggregate statistics over a non-empty set of cleaned events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventSummary {
    pub count: usize,
    pub mean_magnitude: f64,
    /// `None` when no event in the set carried a usable depth.
    pub mean_depth: Option<f64>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a feed value could not be turned into a number.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoercionError {
    #[error("value is missing")]
    Missing,
    #[error("value '{0}' is not numeric")]
    NotNumeric(String),
    #[error("value is not finite")]
    NonFinite,
}

/// Failures talking to or decoding the earthquake feed.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Transport-level failure (DNS, TLS, timeout, connection reset).
    #[error("Feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The feed answered with a non-success status.
    #[error("Feed returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// The body was not a GeoJSON FeatureCollection we understand.
    #[error("Feed parse error: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_severity_string_forms_match_feed_segments() {
        assert_eq!(Severity::All.as_ref(), "all");
        assert_eq!(Severity::Significant.as_ref(), "significant");
        assert_eq!(Severity::M4_5.as_ref(), "4.5");
        assert_eq!(Severity::M2_5.as_ref(), "2.5");
        assert_eq!(Severity::M1_0.as_ref(), "1.0");
        assert_eq!(Severity::from_str("2.5").unwrap(), Severity::M2_5);
        assert!(Severity::from_str("3.0").is_err());
    }

    #[test]
    fn test_period_parsing_and_default() {
        assert_eq!(Period::from_str("week").unwrap(), Period::Week);
        assert_eq!(Period::default(), Period::Month);
        assert_eq!(Period::Day.to_string(), "day");
    }

    #[test]
    fn test_region_parsing_is_case_insensitive() {
        assert_eq!(GeoRegion::from_str("puerto-rico").unwrap(), GeoRegion::PuertoRico);
        assert_eq!(GeoRegion::from_str("World").unwrap(), GeoRegion::World);
        assert_eq!(GeoRegion::default(), GeoRegion::PuertoRico);
    }

    #[test]
    fn test_puerto_rico_bounds_are_inclusive() {
        let pr = GeoRegion::PuertoRico;
        assert!(pr.contains(17.0, -68.0));
        assert!(pr.contains(19.0, -64.0));
        assert!(pr.contains(18.2, -66.3));
        assert!(!pr.contains(16.99, -66.0));
        assert!(!pr.contains(18.0, -63.99));
        assert!(!pr.contains(19.01, -66.0));
    }

    #[test]
    fn test_world_contains_everything() {
        assert!(GeoRegion::World.contains(-89.9, 179.9));
        assert!(GeoRegion::World.contains(0.0, 0.0));
    }

    #[test]
    fn test_region_map_view() {
        assert_eq!(GeoRegion::PuertoRico.map_center(), (18.2, -66.3));
        assert_eq!(GeoRegion::PuertoRico.map_zoom(), 7);
        assert_eq!(GeoRegion::World.map_center(), (0.0, 0.0));
        assert_eq!(GeoRegion::World.map_zoom(), 1);
    }

    #[test]
    fn test_classification_labels() {
        assert_eq!(Classification::Micro.as_ref(), "micro");
        assert_eq!(Classification::Legendary.to_string(), "legendary");
        assert_eq!(Classification::Moderate.as_ref(), "moderate");
        assert_eq!(
            serde_json::to_string(&Classification::Minor).unwrap(),
            "\"minor\""
        );
    }
}
