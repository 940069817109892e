pub mod integration;
pub mod kernels;
pub mod sequence;

pub use integration::{
    ARCHIMEDEAN_LOWER, ARCHIMEDEAN_UPPER, ArchimedeanTerm, DEFAULT_ARCHIMEDEAN_SAMPLES,
    TrapezoidArchimedean, archimedean_contribution, archimedean_contribution_complex, trapezoid,
};
pub use kernels::{
    exponential_kernel, gaussian_kernel, normalized_sinc, sinc_kernel, trace_function, trace_sum,
};
pub use sequence::{
    Histogram, absolute_error, count_below_or_equal, difference, histogram, mean_absolute_error,
    mean_relative_error, normalize, relative_error, scale,
};

pub type NumericResult<T> = Result<T, NumericError>;

/// Caller-input failures of the numeric kernels. Every variant is raised
/// before any output is computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NumericError {
    #[error("sequence length mismatch: left={left}, right={right}")]
    LengthMismatch { left: usize, right: usize },
    #[error("{operation} received degenerate input: {reason}")]
    DegenerateInput {
        operation: &'static str,
        reason: String,
    },
    #[error("parameter '{name}' must be {requirement}, got {value}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        requirement: &'static str,
    },
    #[error("relative error is singular: exact value is zero at index {index}")]
    DivisionSingularity { index: usize },
}

pub(crate) fn require_positive(name: &'static str, value: f64) -> NumericResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(NumericError::InvalidParameter {
            name,
            value,
            requirement: "finite and > 0",
        })
    }
}

pub(crate) fn require_same_length(left: &[f64], right: &[f64]) -> NumericResult<()> {
    if left.len() == right.len() {
        Ok(())
    } else {
        Err(NumericError::LengthMismatch {
            left: left.len(),
            right: right.len(),
        })
    }
}

fn kahan_add(sum: &mut f64, correction: &mut f64, value: f64) {
    let corrected = value - *correction;
    let next = *sum + corrected;
    // Once the sum leaves the finite range the compensation term is NaN;
    // drop it so overflow propagates as +-inf.
    *correction = if next.is_finite() {
        (next - *sum) - corrected
    } else {
        0.0
    };
    *sum = next;
}

pub fn stable_sum(values: &[f64]) -> f64 {
    stable_sum_iter(values.iter().copied())
}

pub fn stable_sum_iter(values: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0;
    let mut correction = 0.0;

    for value in values {
        kahan_add(&mut sum, &mut correction, value);
    }

    sum
}

/// Inclusive uniform grid with `count` points; the last point is pinned to `end`.
pub fn linear_grid(start: f64, end: f64, count: usize) -> Option<Vec<f64>> {
    if count < 2 {
        return None;
    }

    let step = (end - start) / ((count - 1) as f64);
    let mut grid = Vec::with_capacity(count);
    for index in 0..count {
        grid.push(start + step * (index as f64));
    }

    if let Some(last) = grid.last_mut() {
        *last = end;
    }

    Some(grid)
}

pub fn within_tolerance(lhs: f64, rhs: f64, abs_tol: f64, rel_tol: f64) -> bool {
    let abs_diff = (lhs - rhs).abs();
    let scale = lhs.abs().max(rhs.abs()).max(f64::MIN_POSITIVE);
    abs_diff <= abs_tol || abs_diff / scale <= rel_tol
}
