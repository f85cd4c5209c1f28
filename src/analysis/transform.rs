/// Event transformation pipeline: coercion, classification, marker sizing,
/// region filtering and summary statistics.
///
/// Everything here is a pure function of its inputs. `build_table` never
/// fails; records it cannot use are dropped and the reason is logged at
/// debug level only.

use log::debug;

use crate::model::{
    CleanedEvent, Classification, CoercionError, EventSummary, FeedValue, GeoRegion, RawEvent,
};

/// Marker size substituted when |magnitude| is not positive.
pub const MIN_MARKER_SIZE: f64 = 0.1;

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Turns a loosely-typed feed value into a finite `f64`.
///
/// Text is trimmed before parsing. NaN and infinities are rejected even
/// when they parse, so nothing downstream has to reason about them.
pub fn parse_optional_number(value: &FeedValue) -> Result<f64, CoercionError> {
    let number = match value {
        FeedValue::Number(n) => *n,
        FeedValue::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(CoercionError::Missing);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| CoercionError::NotNumeric(trimmed.to_string()))?
        }
        FeedValue::Missing => return Err(CoercionError::Missing),
    };

    if number.is_finite() {
        Ok(number)
    } else {
        Err(CoercionError::NonFinite)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Buckets a magnitude into its label. Intervals are closed on the left.
pub fn classify(magnitude: f64) -> Classification {
    if magnitude < 2.0 {
        Classification::Micro
    } else if magnitude < 4.0 {
        Classification::Minor
    } else if magnitude < 5.0 {
        Classification::Light
    } else if magnitude < 6.0 {
        Classification::Moderate
    } else if magnitude < 7.0 {
        Classification::Strong
    } else if magnitude < 8.0 {
        Classification::Major
    } else if magnitude < 10.0 {
        Classification::Extreme
    } else {
        Classification::Legendary
    }
}

/// Visual marker size for a magnitude; always strictly positive.
pub fn marker_size(magnitude: f64) -> f64 {
    let size = magnitude.abs();
    if size <= 0.0 { MIN_MARKER_SIZE } else { size }
}

// ---------------------------------------------------------------------------
// Table construction
// ---------------------------------------------------------------------------

/// Cleans one raw record. `None` means the record is dropped.
fn clean_event(raw: &RawEvent) -> Option<CleanedEvent> {
    let coerce = |field: &str, value: &FeedValue| match parse_optional_number(value) {
        Ok(n) => Some(n),
        Err(e) => {
            debug!("Dropping event '{}': {} {}", raw.place, field, e);
            None
        }
    };

    let magnitude = coerce("magnitude", &raw.magnitude)?;
    let latitude = coerce("latitude", &raw.latitude)?;
    let longitude = coerce("longitude", &raw.longitude)?;
    let depth = parse_optional_number(&raw.depth).ok();

    Some(CleanedEvent {
        timestamp: raw.timestamp,
        longitude,
        latitude,
        place: raw.place.clone(),
        magnitude,
        depth,
        classification: classify(magnitude),
        marker_size: marker_size(magnitude),
    })
}

/// Builds the cleaned, classified, region-filtered event table.
///
/// Feed order is preserved among surviving records. An empty result is a
/// normal outcome and means "no data for these filters".
pub fn build_table(raw_events: &[RawEvent], region: GeoRegion) -> Vec<CleanedEvent> {
    let table: Vec<CleanedEvent> = raw_events
        .iter()
        .filter_map(clean_event)
        .filter(|event| region.contains(event.latitude, event.longitude))
        .collect();

    debug!(
        "build_table: {} raw -> {} cleaned ({})",
        raw_events.len(),
        table.len(),
        region
    );

    table
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

/// Rounds to two decimal places, exact ties going to the even digit
/// (1.125 becomes 1.12).
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Count and rounded means over the table.
///
/// Returns `None` for an empty table; callers treat that as the no-data
/// state and skip every aggregate view.
pub fn summarize(events: &[CleanedEvent]) -> Option<EventSummary> {
    if events.is_empty() {
        return None;
    }

    let count = events.len();
    let mean_magnitude = events.iter().map(|e| e.magnitude).sum::<f64>() / count as f64;

    let depths: Vec<f64> = events.iter().filter_map(|e| e.depth).collect();
    let mean_depth = if depths.is_empty() {
        None
    } else {
        Some(round2(depths.iter().sum::<f64>() / depths.len() as f64))
    };

    Some(EventSummary {
        count,
        mean_magnitude: round2(mean_magnitude),
        mean_depth,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
