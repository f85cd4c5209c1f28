/// Test fixtures: representative GeoJSON payloads from the USGS
/// earthquake summary feeds.
///
/// These fixtures are structurally complete but trimmed to the properties
/// the parser reads. They reflect the real envelope returned by:
///   https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson
///
/// Summary feed shape:
///   features[]
///     .properties.mag    — magnitude (number, occasionally null)
///     .properties.place  — free-text location (string or null)
///     .properties.time   — epoch milliseconds
///     .geometry.coordinates — [longitude, latitude, depth_km]
///
/// Note: coordinates are longitude FIRST, as in all GeoJSON.

/// Three Puerto Rico events: one inside the island bounding box, one at
/// its northern edge (19.0), and one offshore to the north (19.8).
#[cfg(test)]
pub(crate) fn fixture_puerto_rico_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "metadata": {
        "generated": 1714570000000,
        "url": "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_month.geojson",
        "title": "USGS All Earthquakes, Past Month",
        "status": 200,
        "api": "1.10.3",
        "count": 3
      },
      "features": [
        {
          "type": "Feature",
          "properties": {
            "mag": 2.94,
            "place": "8 km SSW of Tallaboa, Puerto Rico",
            "time": 1714566000000,
            "magType": "md",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [-66.7355, 17.9211, 11.37] },
          "id": "pr71445123"
        },
        {
          "type": "Feature",
          "properties": {
            "mag": 1.87,
            "place": "Puerto Rico region",
            "time": 1714562400000,
            "magType": "md",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [-65.4101, 19.0, 25.0] },
          "id": "pr71445120"
        },
        {
          "type": "Feature",
          "properties": {
            "mag": 3.45,
            "place": "45 km N of Hatillo, Puerto Rico",
            "time": 1714558800000,
            "magType": "md",
            "type": "earthquake"
          },
          "geometry": { "type": "Point", "coordinates": [-66.8213, 19.8112, 38.2] },
          "id": "pr71445117"
        }
      ]
    }"#
}

/// Events with unusable values: a null magnitude, string-typed numbers
/// with an RFC 3339 time, and a feature with no geometry or place at all.
#[cfg(test)]
pub(crate) fn fixture_malformed_values_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "mag": null, "place": "10 km E of Yauco, Puerto Rico", "time": 1714566000000 },
          "geometry": { "type": "Point", "coordinates": [-66.7, 18.0, 9.0] }
        },
        {
          "type": "Feature",
          "properties": { "mag": "3.1", "place": "Mona Passage", "time": "2024-05-01T12:00:00Z" },
          "geometry": { "type": "Point", "coordinates": ["-67.5", "18.1", "bad"] }
        },
        {
          "type": "Feature",
          "properties": { "mag": 4.2, "place": null },
          "geometry": null
        }
      ]
    }"#
}

/// A quiet day: valid envelope, no features.
#[cfg(test)]
pub(crate) fn fixture_empty_feed_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "metadata": { "title": "USGS Significant Earthquakes, Past Day", "status": 200, "count": 0 },
      "features": []
    }"#
}

/// Features whose members are null or mistyped: null coordinates, a
/// numeric place, and null properties. Only the first feature is usable.
#[cfg(test)]
pub(crate) fn fixture_null_members_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "properties": { "mag": 3.4, "place": "12 km S of Ponce, Puerto Rico", "time": 1714566000000 },
          "geometry": { "type": "Point", "coordinates": [-66.6, 17.9, 14.0] }
        },
        {
          "type": "Feature",
          "properties": { "mag": 2.8, "place": 42, "time": 1714565000000 },
          "geometry": { "type": "Point", "coordinates": null }
        },
        {
          "type": "Feature",
          "properties": null,
          "geometry": { "type": "Point", "coordinates": [-66.2, 18.3, 7.0] }
        }
      ]
    }"#
}
