//! Simplified trace formula
//!
//! ```text
//! Tr f = sum_rho f(rho) - f(1) + sum_m f(-2m) + A(f)
//! ```
//!
//! The four contributions are computed independently and summed. Nothing here
//! checks that the test function decays or is holomorphic; a badly behaved
//! test function yields a divergent or meaningless total rather than an error.

use crate::numerics::{
    ArchimedeanTerm, NumericError, NumericResult, TrapezoidArchimedean, stable_sum_iter,
};
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

/// Location of the simple pole of zeta.
pub const POLE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TraceFormulaTerms {
    /// `sum f(rho)` over the nontrivial zeros.
    pub nontrivial: f64,
    /// `-f(1)`, always present.
    pub pole: f64,
    /// `sum f(-2m)` over the trivial zeros, 0 when none were supplied.
    pub trivial: f64,
    /// `A(f)`, 0 when no correction term was supplied.
    pub archimedean: f64,
}

impl TraceFormulaTerms {
    pub fn total(&self) -> f64 {
        self.nontrivial + self.pole + self.trivial + self.archimedean
    }
}

pub fn trace_formula_terms<F>(
    test_fn: F,
    nontrivial_zeros: &[f64],
    trivial_zeros: Option<&[f64]>,
    archimedean: Option<&dyn ArchimedeanTerm>,
) -> TraceFormulaTerms
where
    F: Fn(f64) -> f64,
{
    debug!(
        nontrivial_zeros = nontrivial_zeros.len(),
        trivial_zeros = trivial_zeros.map(<[f64]>::len),
        archimedean = archimedean.is_some(),
        "evaluating trace formula"
    );

    let nontrivial = stable_sum_iter(nontrivial_zeros.iter().map(|zero| test_fn(*zero)));
    let pole = -test_fn(POLE);
    let trivial = trivial_zeros
        .map(|zeros| stable_sum_iter(zeros.iter().map(|zero| test_fn(*zero))))
        .unwrap_or(0.0);
    let archimedean = archimedean
        .map(|term| term.contribution(&test_fn))
        .unwrap_or(0.0);

    TraceFormulaTerms {
        nontrivial,
        pole,
        trivial,
        archimedean,
    }
}

pub fn evaluate_trace_formula<F>(
    test_fn: F,
    nontrivial_zeros: &[f64],
    trivial_zeros: Option<&[f64]>,
    archimedean: Option<&dyn ArchimedeanTerm>,
) -> f64
where
    F: Fn(f64) -> f64,
{
    trace_formula_terms(test_fn, nontrivial_zeros, trivial_zeros, archimedean).total()
}

/// Trivial zeros `-2, -4, ..., -2 * count`, in that order.
pub fn generate_trivial_zeros(count: usize) -> NumericResult<Vec<f64>> {
    if count == 0 {
        return Err(NumericError::InvalidParameter {
            name: "count",
            value: 0.0,
            requirement: "a positive integer",
        });
    }

    Ok((1..=count).map(|m| -2.0 * m as f64).collect())
}

/// Places ordinates on the critical line: `gamma -> 1/2 + i gamma`.
pub fn critical_line_zeros(ordinates: &[f64]) -> Vec<Complex64> {
    ordinates
        .iter()
        .map(|gamma| Complex64::new(0.5, *gamma))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComplexTraceFormulaTerms {
    pub nontrivial: Complex64,
    pub pole: Complex64,
    pub trivial: Complex64,
    pub archimedean: Complex64,
}

impl ComplexTraceFormulaTerms {
    pub fn total(&self) -> Complex64 {
        self.nontrivial + self.pole + self.trivial + self.archimedean
    }
}

/// Complex-valued counterpart of [`trace_formula_terms`]. Nontrivial zeros are
/// complex points (see [`critical_line_zeros`]); trivial zeros and the
/// archimedean grid stay on the real axis.
pub fn trace_formula_terms_complex<F>(
    test_fn: F,
    nontrivial_zeros: &[Complex64],
    trivial_zeros: Option<&[f64]>,
    archimedean: Option<&TrapezoidArchimedean>,
) -> ComplexTraceFormulaTerms
where
    F: Fn(Complex64) -> Complex64,
{
    debug!(
        nontrivial_zeros = nontrivial_zeros.len(),
        trivial_zeros = trivial_zeros.map(<[f64]>::len),
        archimedean = archimedean.is_some(),
        "evaluating complex trace formula"
    );

    let nontrivial: Complex64 = nontrivial_zeros.iter().map(|zero| test_fn(*zero)).sum();
    let pole = -test_fn(Complex64::new(POLE, 0.0));
    let trivial: Complex64 = trivial_zeros
        .map(|zeros| {
            zeros
                .iter()
                .map(|zero| test_fn(Complex64::new(*zero, 0.0)))
                .sum()
        })
        .unwrap_or_default();
    let archimedean = archimedean
        .map(|term| term.complex_contribution(&test_fn))
        .unwrap_or_default();

    ComplexTraceFormulaTerms {
        nontrivial,
        pole,
        trivial,
        archimedean,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        critical_line_zeros, evaluate_trace_formula, generate_trivial_zeros, trace_formula_terms,
        trace_formula_terms_complex,
    };
    use crate::numerics::{ArchimedeanTerm, NumericError, TrapezoidArchimedean};
    use num_complex::Complex64;

    const ZEROS: [f64; 5] = [14.134_725, 21.022_040, 25.010_857, 30.424_876, 32.935_062];

    #[test]
    fn pole_term_is_always_subtracted() {
        let total = evaluate_trace_formula(|_| 2.0, &[], None, None);
        assert_eq!(total, -2.0);

        let total = evaluate_trace_formula(|s| s, &[3.0, 4.0], None, None);
        assert_eq!(total, 6.0);
    }

    #[test]
    fn divergent_test_function_yields_infinite_total() {
        let terms = trace_formula_terms(|s| s.exp(), &[800.0, 1.0], None, None);
        assert_eq!(terms.nontrivial, f64::INFINITY);
        assert_eq!(terms.total(), f64::INFINITY);
        assert_eq!(
            evaluate_trace_formula(|s| s.exp(), &[800.0, 1.0], None, None),
            f64::INFINITY
        );
    }

    #[test]
    fn optional_terms_contribute_only_when_supplied() {
        let trivial = generate_trivial_zeros(3).expect("zeros");
        let fixed = |_: &dyn Fn(f64) -> f64| 0.5;

        let terms = trace_formula_terms(|s| s, &[10.0], Some(&trivial), Some(&fixed));
        assert_eq!(terms.nontrivial, 10.0);
        assert_eq!(terms.pole, -1.0);
        assert_eq!(terms.trivial, -12.0);
        assert_eq!(terms.archimedean, 0.5);
        assert_eq!(terms.total(), -2.5);

        let bare = trace_formula_terms(|s| s, &[10.0], None, None);
        assert_eq!(bare.trivial, 0.0);
        assert_eq!(bare.archimedean, 0.0);
        assert_eq!(bare.total(), 9.0);
    }

    #[test]
    fn gaussian_reference_value_matches_independent_sum() {
        let test_fn = |s: f64| (-s * s).exp();
        let trivial = generate_trivial_zeros(5).expect("zeros");
        let term = TrapezoidArchimedean::default();

        let total = evaluate_trace_formula(test_fn, &ZEROS, Some(&trivial), Some(&term));

        let grid: Vec<f64> = (0..1000)
            .map(|index| 0.1 + 9.9 * index as f64 / 999.0)
            .collect();
        let mut integral = 0.0;
        for pair in grid.windows(2) {
            let left = test_fn(pair[0]) * (-pair[0]).exp();
            let right = test_fn(pair[1]) * (-pair[1]).exp();
            integral += 0.5 * (pair[1] - pair[0]) * (left + right);
        }
        let expected = ZEROS.iter().map(|z| test_fn(*z)).sum::<f64>() - (-1.0f64).exp()
            + trivial.iter().map(|z| test_fn(*z)).sum::<f64>()
            + integral;

        assert!(
            (total - expected).abs() < 1.0e-6,
            "total={total:.15e} expected={expected:.15e}"
        );
        assert!((term.contribution(&test_fn) - integral).abs() < 1.0e-12);
    }

    #[test]
    fn trivial_zero_generator_is_descending_even_integers() {
        assert_eq!(
            generate_trivial_zeros(5).expect("zeros"),
            vec![-2.0, -4.0, -6.0, -8.0, -10.0]
        );
        assert_eq!(generate_trivial_zeros(1).expect("zeros"), vec![-2.0]);
        assert!(matches!(
            generate_trivial_zeros(0),
            Err(NumericError::InvalidParameter { name: "count", .. })
        ));
    }

    #[test]
    fn complex_formula_reduces_to_real_formula_on_real_points() {
        let real = trace_formula_terms(|s| 1.0 / (1.0 + s * s), &ZEROS, None, None);
        let points: Vec<Complex64> = ZEROS.iter().map(|z| Complex64::new(*z, 0.0)).collect();
        let complex = trace_formula_terms_complex(
            |s| (Complex64::new(1.0, 0.0) + s * s).inv(),
            &points,
            None,
            None,
        );
        assert!((complex.total().re - real.total()).abs() < 1.0e-12);
        assert!(complex.total().im.abs() < 1.0e-12);
        assert_eq!(complex.trivial, Complex64::default());
    }

    #[test]
    fn critical_line_placement_uses_half_real_part() {
        let zeros = critical_line_zeros(&ZEROS[..2]);
        assert_eq!(zeros[0], Complex64::new(0.5, 14.134_725));
        assert_eq!(zeros[1].im, 21.022_040);

        let term = TrapezoidArchimedean::new(100).expect("term");
        let trivial = generate_trivial_zeros(2).expect("zeros");
        let terms = trace_formula_terms_complex(
            |s| (-s * s).exp(),
            &zeros,
            Some(&trivial),
            Some(&term),
        );
        // exp(-(1/2 + i g)^2) has modulus exp(g^2 - 1/4): the Gaussian grows
        // off the real axis, so the nontrivial sum dominates.
        assert!(terms.nontrivial.norm() > 1.0e80);
        assert!((terms.pole.re + (-1.0f64).exp()).abs() < 1.0e-15);
    }
}
