use crate::numerics::{NumericResult, require_positive};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Named test functions selectable from a run configuration. Callers of the
/// trace formula may pass any closure instead; this catalogue only covers
/// what the CLI can name.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TestFunction {
    /// `exp(-(s / width)^2)`; width 1 gives `exp(-s^2)`.
    Gaussian {
        #[serde(default = "unit_parameter")]
        width: f64,
    },
    /// `1 / (1 + (s / width)^2)`.
    Lorentzian {
        #[serde(default = "unit_parameter")]
        width: f64,
    },
    /// `exp(-rate * |s|)`.
    ExponentialDecay {
        #[serde(default = "unit_parameter")]
        rate: f64,
    },
}

fn unit_parameter() -> f64 {
    1.0
}

impl TestFunction {
    pub fn validate(&self) -> NumericResult<()> {
        match self {
            Self::Gaussian { width } | Self::Lorentzian { width } => {
                require_positive("width", *width)
            }
            Self::ExponentialDecay { rate } => require_positive("rate", *rate),
        }
    }

    pub fn evaluate(&self, s: f64) -> f64 {
        match *self {
            Self::Gaussian { width } => {
                let scaled = s / width;
                (-scaled * scaled).exp()
            }
            Self::Lorentzian { width } => {
                let scaled = s / width;
                1.0 / (1.0 + scaled * scaled)
            }
            Self::ExponentialDecay { rate } => (-rate * s.abs()).exp(),
        }
    }

    /// Continuation off the real axis. `|s|` is continued as the principal
    /// `sqrt(s^2)`, which agrees with it on the real line.
    pub fn evaluate_complex(&self, s: Complex64) -> Complex64 {
        match *self {
            Self::Gaussian { width } => {
                let scaled = s / width;
                (-scaled * scaled).exp()
            }
            Self::Lorentzian { width } => {
                let scaled = s / width;
                (Complex64::new(1.0, 0.0) + scaled * scaled).inv()
            }
            Self::ExponentialDecay { rate } => (-(s * s).sqrt() * rate).exp(),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Gaussian { width } => format!("gaussian(width={width})"),
            Self::Lorentzian { width } => format!("lorentzian(width={width})"),
            Self::ExponentialDecay { rate } => format!("exponential_decay(rate={rate})"),
        }
    }
}

impl Default for TestFunction {
    fn default() -> Self {
        Self::Gaussian { width: 1.0 }
    }
}
