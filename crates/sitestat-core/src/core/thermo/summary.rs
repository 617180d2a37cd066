use nalgebra::DMatrix;
use serde::Serialize;

pub const DEFAULT_HISTOGRAM_BINS: usize = 10;

/// Summary statistics of one species' local formation values across all sites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeciesSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Equal-width histogram. `edges` has one more entry than `counts`; every bin is
/// half-open except the last, which also includes its upper edge.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

/// Per-row (per-species) summaries of a formation array.
pub fn summarize_species(formation: &DMatrix<f64>) -> Vec<SpeciesSummary> {
    formation
        .row_iter()
        .map(|row| {
            let mean = row.mean();
            // Population standard deviation.
            let variance = row.map(|v| (v - mean).powi(2)).mean();
            SpeciesSummary {
                mean,
                std_dev: variance.sqrt(),
                min: row.min(),
                max: row.max(),
            }
        })
        .collect()
}

/// Bins `values` into `num_bins` equal-width bins spanning their range.
///
/// When every value is identical the range is widened to `value ± 0.5`.
/// Non-finite values are skipped. Empty input or zero bins yields an empty
/// histogram.
pub fn histogram(values: &[f64], num_bins: usize) -> Histogram {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || num_bins == 0 {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        };
    }

    let mut low = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut high = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if low == high {
        low -= 0.5;
        high += 0.5;
    }

    let width = (high - low) / num_bins as f64;
    let edges: Vec<f64> = (0..=num_bins)
        .map(|i| if i == num_bins { high } else { low + width * i as f64 })
        .collect();

    let mut counts = vec![0; num_bins];
    for value in finite {
        let bin = (((value - low) / width) as usize).min(num_bins - 1);
        counts[bin] += 1;
    }

    Histogram { edges, counts }
}

/// One histogram per species row of a formation array.
pub fn species_histograms(formation: &DMatrix<f64>, num_bins: usize) -> Vec<Histogram> {
    formation
        .row_iter()
        .map(|row| {
            let values: Vec<f64> = row.iter().copied().collect();
            histogram(&values, num_bins)
        })
        .collect()
}
