use crate::numerics::{NumericResult, require_positive};

pub const DEFAULT_ALPHA: f64 = 2.5;
const NORMALIZED_SLOPE: f64 = 0.5;
const NORMALIZED_OFFSET: f64 = 10.0;

/// Stand-in for the dilation generator `-x d/dx`: its synthetic spectrum is
/// the arithmetic progression `lambda_n = alpha * n`, `n = 1..=N`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingOperator {
    alpha: f64,
}

impl ScalingOperator {
    pub fn new(alpha: f64) -> NumericResult<Self> {
        require_positive("alpha", alpha)?;
        Ok(Self { alpha })
    }

    pub const fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn eigenvalues(&self, count: usize) -> Vec<f64> {
        (1..=count).map(|n| self.alpha * n as f64).collect()
    }

    /// `mu_n = 0.5 * lambda_n + 10`, the values compared against zeta ordinates.
    pub fn normalized_values(&self, count: usize) -> Vec<f64> {
        self.eigenvalues(count)
            .into_iter()
            .map(|lambda| NORMALIZED_SLOPE * lambda + NORMALIZED_OFFSET)
            .collect()
    }
}

impl Default for ScalingOperator {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}
