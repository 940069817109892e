use super::{NumericResult, require_positive, stable_sum, stable_sum_iter};
use std::f64::consts::PI;

/// `exp(t * lambda)` for every entry.
pub fn exponential_kernel(values: &[f64], t: f64) -> Vec<f64> {
    values.iter().map(|value| (t * value).exp()).collect()
}

/// `exp(-(t - lambda)^2 / (2 sigma^2))`; `sigma` must be finite and positive.
pub fn gaussian_kernel(values: &[f64], t: f64, sigma: f64) -> NumericResult<Vec<f64>> {
    require_positive("sigma", sigma)?;
    let denominator = 2.0 * sigma * sigma;
    Ok(values
        .iter()
        .map(|value| (-(t - value).powi(2) / denominator).exp())
        .collect())
}

/// `sinc(scale * (t - lambda))` with the normalized convention.
pub fn sinc_kernel(values: &[f64], t: f64, scale: f64) -> NumericResult<Vec<f64>> {
    require_positive("scale", scale)?;
    Ok(values
        .iter()
        .map(|value| normalized_sinc(scale * (t - value)))
        .collect())
}

/// `sin(pi x) / (pi x)`, continuous at the origin.
pub fn normalized_sinc(x: f64) -> f64 {
    if x == 0.0 {
        return 1.0;
    }
    let argument = PI * x;
    argument.sin() / argument
}

pub fn trace_sum(kernel_values: &[f64]) -> f64 {
    stable_sum(kernel_values)
}

/// `Tr f(T) = sum_n exp(t * lambda_n)` without materializing the kernel.
pub fn trace_function(eigenvalues: &[f64], t: f64) -> f64 {
    stable_sum_iter(eigenvalues.iter().map(|value| (t * value).exp()))
}
