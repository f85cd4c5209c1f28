/// Plain-text rendering of a dashboard for the terminal.

use std::fmt::Write;

use crate::analysis::histogram::HistogramBin;
use crate::dashboard::{Dashboard, DashboardView, MapView, TableRow};

/// Widest histogram bar, in characters.
const BAR_WIDTH: usize = 40;

pub fn format_view(view: &DashboardView) -> String {
    match view {
        DashboardView::NoData {
            requested_at,
            message,
        } => format!("Requested: {}\n\n⚠️  {}\n", requested_at, message),
        DashboardView::Ready(dashboard) => format_dashboard(dashboard),
    }
}

fn format_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();
    let summary = &dashboard.summary;

    let _ = writeln!(out, "Requested:       {}", dashboard.requested_at);
    let _ = writeln!(out, "Events:          {}", summary.count);
    let _ = writeln!(out, "Mean magnitude:  {:.2}", summary.mean_magnitude);
    match summary.mean_depth {
        Some(depth) => {
            let _ = writeln!(out, "Mean depth (km): {:.2}", depth);
        }
        None => {
            let _ = writeln!(out, "Mean depth (km): n/a");
        }
    }

    if let Some(rows) = &dashboard.table {
        out.push('\n');
        out.push_str(&format_table(rows));
    }

    out.push('\n');
    out.push_str(&format_histogram("Magnitude histogram", &dashboard.magnitude_histogram));
    out.push('\n');
    out.push_str(&format_histogram("Depth histogram (km)", &dashboard.depth_histogram));

    if let Some(map) = &dashboard.map {
        out.push('\n');
        out.push_str(&format_map(map));
    }

    out
}

pub fn format_table(rows: &[TableRow]) -> String {
    let mut out = String::from("Seismic events\n");
    let _ = writeln!(
        out,
        "{:<20}  {:<40}  {:>9}  {}",
        "Time (UTC)", "Place", "Magnitude", "Class"
    );

    for row in rows {
        let time = row
            .timestamp
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "-".to_string());
        let place: String = row.place.chars().take(40).collect();
        let _ = writeln!(
            out,
            "{:<20}  {:<40}  {:>9.2}  {}",
            time, place, row.magnitude, row.classification
        );
    }

    out
}

pub fn format_histogram(title: &str, bins: &[HistogramBin]) -> String {
    let mut out = format!("{}\n", title);
    let peak = bins.iter().map(|b| b.count).max().unwrap_or(0);

    if peak == 0 {
        out.push_str("  (no values)\n");
        return out;
    }

    for bin in bins {
        let bar = "#".repeat(bin.count * BAR_WIDTH / peak);
        let _ = writeln!(
            out,
            "  {:>8.2} - {:<8.2} | {:<width$} {}",
            bin.lower,
            bin.upper,
            bar,
            bin.count,
            width = BAR_WIDTH
        );
    }

    out
}

fn format_map(map: &MapView) -> String {
    format!(
        "Map: center ({:.1}, {:.1}), zoom {}, {} markers\n",
        map.center_latitude,
        map.center_longitude,
        map.zoom,
        map.points.len()
    )
}
