/// Data shaping for the earthquake dashboard.
///
/// Submodules:
/// - `transform` — coercion, classification, region filtering, summary stats.
/// - `histogram` — equal-width frequency bins for the magnitude/depth charts.

pub mod histogram;
pub mod transform;
