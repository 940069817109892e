//! Elementwise helpers over one-dimensional `f64` sequences.
//!
//! Ascending order is assumed by callers of the counting and spacing helpers
//! but never checked here.

use super::{NumericError, NumericResult, require_same_length, stable_sum, stable_sum_iter};

/// Number of elements `<= threshold`. Linear scan; empty input counts 0.
pub fn count_below_or_equal(values: &[f64], threshold: f64) -> usize {
    values.iter().filter(|value| **value <= threshold).count()
}

/// Consecutive differences `values[i + 1] - values[i]`.
///
/// Fails with [`NumericError::DegenerateInput`] for fewer than 2 elements
/// instead of returning an empty sequence.
pub fn difference(values: &[f64]) -> NumericResult<Vec<f64>> {
    if values.len() < 2 {
        return Err(NumericError::DegenerateInput {
            operation: "difference",
            reason: format!("need at least 2 elements, got {}", values.len()),
        });
    }

    Ok(values
        .windows(2)
        .map(|window| window[1] - window[0])
        .collect())
}

/// Shift to zero mean and divide by the population standard deviation.
pub fn normalize(values: &[f64]) -> NumericResult<Vec<f64>> {
    if values.is_empty() {
        return Err(NumericError::DegenerateInput {
            operation: "normalize",
            reason: "sequence is empty".to_string(),
        });
    }

    let count = values.len() as f64;
    let mean = stable_sum(values) / count;
    let variance = stable_sum_iter(values.iter().map(|value| (value - mean).powi(2))) / count;
    let std_dev = variance.sqrt();
    if std_dev == 0.0 || !std_dev.is_finite() {
        return Err(NumericError::DegenerateInput {
            operation: "normalize",
            reason: format!("standard deviation is {std_dev}"),
        });
    }

    Ok(values.iter().map(|value| (value - mean) / std_dev).collect())
}

pub fn scale(values: &[f64], factor: f64, shift: f64) -> Vec<f64> {
    values.iter().map(|value| factor * value + shift).collect()
}

pub fn absolute_error(approx: &[f64], exact: &[f64]) -> NumericResult<Vec<f64>> {
    require_same_length(approx, exact)?;
    Ok(approx
        .iter()
        .zip(exact)
        .map(|(approx, exact)| (approx - exact).abs())
        .collect())
}

/// `|approx - exact| / |exact|`, elementwise.
///
/// A zero in `exact` is rejected with [`NumericError::DivisionSingularity`]
/// carrying the first offending index; nothing is computed in that case.
pub fn relative_error(approx: &[f64], exact: &[f64]) -> NumericResult<Vec<f64>> {
    require_same_length(approx, exact)?;
    if let Some(index) = exact.iter().position(|value| *value == 0.0) {
        return Err(NumericError::DivisionSingularity { index });
    }

    Ok(approx
        .iter()
        .zip(exact)
        .map(|(approx, exact)| (approx - exact).abs() / exact.abs())
        .collect())
}

pub fn mean_absolute_error(approx: &[f64], exact: &[f64]) -> NumericResult<f64> {
    let errors = absolute_error(approx, exact)?;
    mean_of("mean_absolute_error", &errors)
}

pub fn mean_relative_error(approx: &[f64], exact: &[f64]) -> NumericResult<f64> {
    let errors = relative_error(approx, exact)?;
    mean_of("mean_relative_error", &errors)
}

fn mean_of(operation: &'static str, values: &[f64]) -> NumericResult<f64> {
    if values.is_empty() {
        return Err(NumericError::DegenerateInput {
            operation,
            reason: "sequence is empty".to_string(),
        });
    }
    Ok(stable_sum(values) / values.len() as f64)
}

/// Equal-width bin counts over a closed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    pub fn bin_centers(&self) -> Vec<f64> {
        self.edges
            .windows(2)
            .map(|edge| 0.5 * (edge[0] + edge[1]))
            .collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin `values` into `bins` equal-width bins spanning `range`, or the data's
/// own min/max when `range` is `None`. The last bin is closed on the right;
/// values outside the range are dropped. A zero-width range is widened by
/// 0.5 on both sides.
pub fn histogram(
    values: &[f64],
    bins: usize,
    range: Option<(f64, f64)>,
) -> NumericResult<Histogram> {
    if bins == 0 {
        return Err(NumericError::InvalidParameter {
            name: "bins",
            value: 0.0,
            requirement: "a positive integer",
        });
    }
    if values.is_empty() {
        return Err(NumericError::DegenerateInput {
            operation: "histogram",
            reason: "sequence is empty".to_string(),
        });
    }

    let (mut lower, mut upper) = range.unwrap_or_else(|| {
        values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), value| {
                (lo.min(*value), hi.max(*value))
            })
    });
    if !lower.is_finite() || !upper.is_finite() || upper < lower {
        return Err(NumericError::DegenerateInput {
            operation: "histogram",
            reason: format!("invalid range [{lower}, {upper}]"),
        });
    }
    if upper == lower {
        lower -= 0.5;
        upper += 0.5;
    }

    let width = (upper - lower) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|index| {
            if index == bins {
                upper
            } else {
                lower + width * index as f64
            }
        })
        .collect();

    let mut counts = vec![0usize; bins];
    for value in values.iter().copied() {
        if value < lower || value > upper || value.is_nan() {
            continue;
        }
        let index = (((value - lower) / width).floor() as usize).min(bins - 1);
        counts[index] += 1;
    }

    Ok(Histogram { edges, counts })
}
