//! Spike detection with a kurtosis-adjusted median absolute deviation test.
//!
//! For a series `x` the neighbour residual `y[i] = x[i] - (x[i-1] + x[i+1]) / 2`
//! is computed for every interior point. Residuals are classified against
//! `adj * threshold * mad / 0.6745` around their median, where `adj` scales
//! the threshold by how heavy-tailed the residuals are. A point is a spike
//! only when its class and its neighbours' form `(-1, +1, -1)` or
//! `(+1, -1, +1)`: a single-point reversal, not a level shift.

use tracing::debug;

use fluxqc_model::{
    Dataset, FindingLog, FindingPayload, Severity, Status, TIMESTAMP_START, parse_f64,
};

use crate::builder::MessageArgs;
use crate::check::{Check, CheckContext};
use crate::error::CheckError;

pub const CHECK_ID: &str = "spike_detection";
pub const DEFAULT_THRESHOLD: f64 = 4.0;

/// Scales MAD to a standard deviation under a normal assumption.
const MAD_NORMALIZER: f64 = 0.6745;
const KURTOSIS_INTERCEPT: f64 = -0.2775258;
const KURTOSIS_SLOPE: f64 = -0.1720364;
const NORMAL_KURTOSIS: f64 = 3.0;

/// Residual of each interior point against the mean of its neighbours.
pub fn neighbour_residuals(values: &[f64]) -> Vec<f64> {
    values
        .windows(3)
        .map(|w| w[1] - (w[0] + w[2]) / 2.0)
        .collect()
}

/// Population kurtosis (normal = 3). `None` for empty or constant input.
pub fn kurtosis(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m4 = values.iter().map(|v| (v - mean).powi(4)).sum::<f64>() / n;
    let k = m4 / (m2 * m2);
    (m2 > 0.0 && k.is_finite()).then_some(k)
}

/// Threshold multiplier for a residual kurtosis; 1 when the kurtosis is
/// undefined or not positive.
pub fn threshold_multiplier(kurtosis: Option<f64>) -> f64 {
    match kurtosis {
        Some(k) if k > 0.0 => {
            let adj = (KURTOSIS_INTERCEPT + KURTOSIS_SLOPE * k.ln()).exp()
                / (KURTOSIS_INTERCEPT + KURTOSIS_SLOPE * NORMAL_KURTOSIS.ln()).exp();
            if adj.is_finite() { adj } else { 1.0 }
        }
        _ => 1.0,
    }
}

/// Median of the values; 0 for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

pub fn median_absolute_deviation(values: &[f64], center: f64) -> f64 {
    let deviations: Vec<f64> = values.iter().map(|v| (v - center).abs()).collect();
    median(&deviations)
}

/// Classify residuals as `+1`, `-1`, or `0` against the scaled bound.
pub fn classify(residuals: &[f64], threshold: f64) -> Vec<i8> {
    let adj = threshold_multiplier(kurtosis(residuals));
    let md = median(residuals);
    let mad = median_absolute_deviation(residuals, md);
    let bound = adj * threshold * mad / MAD_NORMALIZER;
    residuals
        .iter()
        .map(|y| {
            let deviation = y - md;
            if deviation > bound {
                1
            } else if deviation < -bound {
                -1
            } else {
                0
            }
        })
        .collect()
}

/// Flag isolated spikes. The result is aligned to the interior points of
/// `values`, so it has `len - 2` entries (none for fewer than 3 values).
pub fn detect_spikes(values: &[f64], threshold: f64) -> Vec<bool> {
    let residuals = neighbour_residuals(values);
    let classes = classify(&residuals, threshold);
    (0..classes.len())
        .map(|i| {
            if i == 0 || i + 1 >= classes.len() {
                return false;
            }
            matches!(
                (classes[i - 1], classes[i], classes[i + 1]),
                (-1, 1, -1) | (1, -1, 1)
            )
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SpikeDetectionCheck;

impl SpikeDetectionCheck {
    /// One finding log per numeric variable, scoped to the column name.
    ///
    /// Missing and non-numeric rows are dropped before detection; each
    /// spike records the row it came from.
    pub fn evaluate(&self, dataset: &Dataset, threshold: f64) -> Vec<FindingLog> {
        let timestamps = dataset.values(TIMESTAMP_START);
        let variables = dataset.variables();
        let mut logs = Vec::new();
        for column in dataset.data_columns() {
            if variables.parts(&column).is_some_and(|parts| parts.is_flag()) {
                continue;
            }
            let Some(values) = dataset.values(&column) else {
                continue;
            };
            let points: Vec<(usize, f64)> = values
                .iter()
                .enumerate()
                .filter_map(|(row, value)| {
                    value
                        .as_deref()
                        .and_then(parse_f64)
                        .map(|v| (row, v))
                })
                .collect();
            if points.is_empty() {
                continue;
            }
            let series: Vec<f64> = points.iter().map(|&(_, v)| v).collect();
            let mut log = FindingLog::new(column.as_str());
            for (idx, flagged) in detect_spikes(&series, threshold).into_iter().enumerate() {
                if !flagged {
                    continue;
                }
                let (row, value) = points[idx + 1];
                let timestamp = timestamps
                    .as_ref()
                    .and_then(|stamps| stamps.get(row).cloned().flatten());
                log.record(
                    Severity::Warning,
                    FindingPayload::Outlier {
                        variable: column.clone(),
                        row,
                        timestamp,
                        value,
                    },
                );
            }
            logs.push(log);
        }
        logs
    }
}

impl Check for SpikeDetectionCheck {
    fn id(&self) -> &'static str {
        CHECK_ID
    }

    fn run(&self, ctx: &CheckContext<'_>) -> Result<Vec<Status>, CheckError> {
        let logs = self.evaluate(ctx.dataset, ctx.options.spike_threshold);
        debug!(
            variables = logs.len(),
            spikes = logs.iter().map(FindingLog::len).sum::<usize>(),
            "spike detection evaluated"
        );
        Ok(vec![ctx.builder.composite(CHECK_ID, logs, &MessageArgs::new())?])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn residuals_use_neighbour_mean() {
        assert_eq!(neighbour_residuals(&[0.0, 10.0, 0.0]), vec![10.0]);
        assert_eq!(neighbour_residuals(&[1.0, 2.0, 3.0, 4.0]), vec![0.0, 0.0]);
        assert!(neighbour_residuals(&[1.0, 2.0]).is_empty());
    }

    #[test]
    fn kurtosis_of_constant_series_is_undefined() {
        assert_eq!(kurtosis(&[2.0, 2.0, 2.0]), None);
        assert_eq!(kurtosis(&[]), None);
        assert_eq!(threshold_multiplier(None), 1.0);
    }

    #[test]
    fn normal_kurtosis_leaves_threshold_unchanged() {
        let adj = threshold_multiplier(Some(3.0));
        assert!((adj - 1.0).abs() < 1e-12);
        assert!(threshold_multiplier(Some(9.0)) < 1.0);
        assert!(threshold_multiplier(Some(1.5)) > 1.0);
    }

    #[test]
    fn median_and_mad() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
        assert_eq!(median_absolute_deviation(&[1.0, 2.0, 3.0, 4.0, 100.0], 3.0), 1.0);
    }

    #[test]
    fn short_series_yield_no_flags() {
        assert!(detect_spikes(&[], DEFAULT_THRESHOLD).is_empty());
        assert!(detect_spikes(&[1.0, 2.0], DEFAULT_THRESHOLD).is_empty());
        assert_eq!(detect_spikes(&[1.0, 50.0, 1.0], DEFAULT_THRESHOLD), vec![false]);
    }
}
