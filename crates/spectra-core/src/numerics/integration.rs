use super::{NumericError, NumericResult, linear_grid, require_same_length, stable_sum_iter};
use num_complex::Complex64;

pub const ARCHIMEDEAN_LOWER: f64 = 0.1;
pub const ARCHIMEDEAN_UPPER: f64 = 10.0;
pub const DEFAULT_ARCHIMEDEAN_SAMPLES: usize = 1000;

/// Correction term of the trace formula: maps a test function to one scalar.
///
/// Any `Fn(&dyn Fn(f64) -> f64) -> f64` closure qualifies, so callers can
/// plug in their own correction without a wrapper type.
pub trait ArchimedeanTerm {
    fn contribution(&self, test_fn: &dyn Fn(f64) -> f64) -> f64;
}

impl<F> ArchimedeanTerm for F
where
    F: Fn(&dyn Fn(f64) -> f64) -> f64,
{
    fn contribution(&self, test_fn: &dyn Fn(f64) -> f64) -> f64 {
        self(test_fn)
    }
}

/// Trapezoid rule over arbitrary (not necessarily uniform) abscissae.
pub fn trapezoid(x: &[f64], y: &[f64]) -> NumericResult<f64> {
    require_same_length(x, y)?;
    if x.len() < 2 {
        return Err(NumericError::DegenerateInput {
            operation: "trapezoid",
            reason: format!("need at least 2 samples, got {}", x.len()),
        });
    }

    Ok(stable_sum_iter(
        x.windows(2)
            .zip(y.windows(2))
            .map(|(x, y)| 0.5 * (x[1] - x[0]) * (y[0] + y[1])),
    ))
}

/// Fixed-grid approximation of `A(f) = int_{0.1}^{10} f(x) e^{-x} dx`.
///
/// `sample_count` uniform points including both endpoints, trapezoid rule,
/// no error estimate. Accuracy is bounded by the grid and the truncated domain.
pub fn archimedean_contribution<F>(test_fn: F, sample_count: usize) -> NumericResult<f64>
where
    F: Fn(f64) -> f64,
{
    let grid = archimedean_grid(sample_count)?;
    let weighted: Vec<f64> = grid.iter().map(|x| test_fn(*x) * (-x).exp()).collect();
    trapezoid(&grid, &weighted)
}

/// Same grid and rule as [`archimedean_contribution`], applied to the real and
/// imaginary parts of a complex-valued test function.
pub fn archimedean_contribution_complex<F>(
    test_fn: F,
    sample_count: usize,
) -> NumericResult<Complex64>
where
    F: Fn(Complex64) -> Complex64,
{
    let grid = archimedean_grid(sample_count)?;
    let (re, im): (Vec<f64>, Vec<f64>) = grid
        .iter()
        .map(|x| {
            let value = test_fn(Complex64::new(*x, 0.0)) * (-x).exp();
            (value.re, value.im)
        })
        .unzip();
    Ok(Complex64::new(
        trapezoid(&grid, &re)?,
        trapezoid(&grid, &im)?,
    ))
}

fn archimedean_grid(sample_count: usize) -> NumericResult<Vec<f64>> {
    linear_grid(ARCHIMEDEAN_LOWER, ARCHIMEDEAN_UPPER, sample_count).ok_or(
        NumericError::InvalidParameter {
            name: "sample_count",
            value: sample_count as f64,
            requirement: ">= 2",
        },
    )
}

/// [`ArchimedeanTerm`] backed by the fixed trapezoid grid. The sample count is
/// validated on construction, so evaluation cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrapezoidArchimedean {
    sample_count: usize,
}

impl TrapezoidArchimedean {
    pub fn new(sample_count: usize) -> NumericResult<Self> {
        archimedean_grid(sample_count)?;
        Ok(Self { sample_count })
    }

    pub const fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn complex_contribution(&self, test_fn: &dyn Fn(Complex64) -> Complex64) -> Complex64 {
        archimedean_contribution_complex(test_fn, self.sample_count)
            .unwrap_or_else(|_| unreachable!("sample count validated on construction"))
    }
}

impl Default for TrapezoidArchimedean {
    fn default() -> Self {
        Self {
            sample_count: DEFAULT_ARCHIMEDEAN_SAMPLES,
        }
    }
}

impl ArchimedeanTerm for TrapezoidArchimedean {
    fn contribution(&self, test_fn: &dyn Fn(f64) -> f64) -> f64 {
        archimedean_contribution(test_fn, self.sample_count)
            .unwrap_or_else(|_| unreachable!("sample count validated on construction"))
    }
}
