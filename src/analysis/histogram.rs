/// Equal-width frequency histograms for the magnitude and depth charts.

use serde::{Deserialize, Serialize};

/// One histogram bar. `lower` is inclusive; `upper` is exclusive except on
/// the last bin, which also counts values equal to the maximum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Buckets `values` into `bin_count` equal-width bins spanning [min, max].
///
/// Empty input (or `bin_count == 0`) yields no bins. When every value is
/// identical there is nothing to spread over, so a single bin holds them all.
pub fn frequency_histogram(values: &[f64], bin_count: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len(),
        }];
    }

    let width = (max - min) / bin_count as f64;
    let mut bins: Vec<HistogramBin> = (0..bin_count)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bin_count { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for &value in values {
        let index = (((value - min) / width) as usize).min(bin_count - 1);
        bins[index].count += 1;
    }

    bins
}
