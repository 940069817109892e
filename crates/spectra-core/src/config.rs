//! JSON run configuration shared by every CLI subcommand.
//!
//! Every field has a default, so `{}` is a valid configuration and reproduces
//! the stock comparison: `lambda_n = 2.5 n` for 20 terms against the first
//! 20 zeta ordinates, threshold 50, Gaussian test function, five trivial
//! zeros and a 1000-sample archimedean grid.

use crate::numerics::{
    DEFAULT_ARCHIMEDEAN_SAMPLES, NumericError, NumericResult, TrapezoidArchimedean, linear_grid,
    require_positive,
};
use crate::spectral::{DEFAULT_ALPHA, REFERENCE_ZETA_ORDINATES, ScalingOperator, TestFunction};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RunConfig {
    pub alpha: f64,
    pub eigenvalue_count: usize,
    pub threshold: f64,
    pub zeta_ordinates: Vec<f64>,
    pub test_function: TestFunction,
    pub trivial_zero_count: usize,
    pub archimedean_samples: usize,
    pub trace_grid: TraceGrid,
    pub histogram_bins: usize,
    pub output_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            eigenvalue_count: 20,
            threshold: 50.0,
            zeta_ordinates: REFERENCE_ZETA_ORDINATES.to_vec(),
            test_function: TestFunction::default(),
            trivial_zero_count: 5,
            archimedean_samples: DEFAULT_ARCHIMEDEAN_SAMPLES,
            trace_grid: TraceGrid::default(),
            histogram_bins: 20,
            output_dir: PathBuf::from("output"),
        }
    }
}

impl RunConfig {
    /// Checks every numeric domain up front so subcommands fail before doing
    /// any work.
    pub fn validate(&self) -> NumericResult<()> {
        ScalingOperator::new(self.alpha)?;
        require_positive("threshold", self.threshold)?;
        self.test_function.validate()?;
        TrapezoidArchimedean::new(self.archimedean_samples)?;
        self.trace_grid.points()?;
        if self.histogram_bins == 0 {
            return Err(NumericError::InvalidParameter {
                name: "histogramBins",
                value: 0.0,
                requirement: "a positive integer",
            });
        }
        if self.eigenvalue_count == 0 {
            return Err(NumericError::InvalidParameter {
                name: "eigenvalueCount",
                value: 0.0,
                requirement: "a positive integer",
            });
        }
        if self.zeta_ordinates.is_empty() {
            return Err(NumericError::DegenerateInput {
                operation: "run config",
                reason: "zetaOrdinates is empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn operator(&self) -> NumericResult<ScalingOperator> {
        ScalingOperator::new(self.alpha)
    }

    pub fn archimedean(&self) -> NumericResult<TrapezoidArchimedean> {
        TrapezoidArchimedean::new(self.archimedean_samples)
    }

    /// Length used when pairing `mu_n` with `gamma_n` elementwise.
    pub fn paired_len(&self) -> usize {
        self.eigenvalue_count.min(self.zeta_ordinates.len())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.output_dir.join("data")
    }

    pub fn plot_dir(&self) -> PathBuf {
        self.output_dir.join("plots")
    }
}

/// Uniform grid of trace parameters `t`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceGrid {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl Default for TraceGrid {
    fn default() -> Self {
        Self {
            start: 0.01,
            end: 0.1,
            count: 20,
        }
    }
}

impl TraceGrid {
    pub fn points(&self) -> NumericResult<Vec<f64>> {
        if !self.start.is_finite() || !self.end.is_finite() || self.end <= self.start {
            return Err(NumericError::DegenerateInput {
                operation: "trace grid",
                reason: format!("expected start < end, got [{}, {}]", self.start, self.end),
            });
        }
        linear_grid(self.start, self.end, self.count).ok_or(NumericError::InvalidParameter {
            name: "traceGrid.count",
            value: self.count as f64,
            requirement: ">= 2",
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RunConfigError {
    #[error("failed to read run config '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse run config '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

pub fn load_run_config(path: impl AsRef<Path>) -> Result<RunConfig, RunConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| RunConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&source).map_err(|source| RunConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
