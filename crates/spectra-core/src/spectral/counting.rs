use crate::numerics::{NumericError, NumericResult};
use std::f64::consts::TAU;

/// Main term of the counting law `N(T) ~ (T/2pi) ln(T/2pi) - T/2pi`.
///
/// Rejects `T <= 0` (and non-finite `T`) instead of returning a NaN or
/// negative-infinity sentinel.
pub fn estimate_count(t: f64) -> NumericResult<f64> {
    if !t.is_finite() || t <= 0.0 {
        return Err(NumericError::InvalidParameter {
            name: "T",
            value: t,
            requirement: "finite and > 0",
        });
    }

    let scaled = t / TAU;
    Ok(scaled * scaled.ln() - scaled)
}

/// Riemann–von Mangoldt main term; identical closed form to [`estimate_count`].
pub fn riemann_von_mangoldt(t: f64) -> NumericResult<f64> {
    estimate_count(t)
}
