use crate::numerics::{NumericResult, absolute_error, count_below_or_equal, relative_error};
use serde::Serialize;

/// Counting functions of two sequences evaluated at the same threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CountComparison {
    pub count_a: usize,
    pub count_b: usize,
    /// `count_a - count_b`; negative when `b` is denser below the threshold.
    pub difference: i64,
}

pub fn compare_counts(a: &[f64], b: &[f64], threshold: f64) -> CountComparison {
    let count_a = count_below_or_equal(a, threshold);
    let count_b = count_below_or_equal(b, threshold);
    CountComparison {
        count_a,
        count_b,
        difference: count_a as i64 - count_b as i64,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorComparison {
    pub absolute_errors: Vec<f64>,
    pub relative_errors: Vec<f64>,
}

/// Elementwise absolute and relative error of `approx` against `exact`.
pub fn compare_sequences(approx: &[f64], exact: &[f64]) -> NumericResult<ErrorComparison> {
    // Relative error validates length and zeros, so run it first.
    let relative_errors = relative_error(approx, exact)?;
    let absolute_errors = absolute_error(approx, exact)?;
    Ok(ErrorComparison {
        absolute_errors,
        relative_errors,
    })
}
