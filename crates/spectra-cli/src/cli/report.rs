//! Analysis sections shared by the individual subcommands and the combined
//! JSON report.

use serde::Serialize;
use spectra_core::config::RunConfig;
use spectra_core::domain::Analysis;
use spectra_core::numerics::{
    ArchimedeanTerm, NumericResult, TrapezoidArchimedean, exponential_kernel, gaussian_kernel,
    mean_absolute_error, mean_relative_error, sinc_kernel, trace_function, trace_sum,
};
use spectra_core::spectral::{
    ComplexTraceFormulaTerms, CountComparison, ErrorComparison, TraceFormulaTerms,
    compare_counts, compare_sequences, critical_line_zeros, estimate_count,
    generate_trivial_zeros, trace_formula_terms, trace_formula_terms_complex,
};
use std::fmt::Write as _;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CountsSection {
    pub(super) threshold: f64,
    pub(super) eigenvalue_count: usize,
    pub(super) comparison: CountComparison,
    pub(super) asymptotic_estimate: f64,
}

pub(super) fn counts_section(config: &RunConfig, threshold: f64) -> NumericResult<CountsSection> {
    let eigenvalues = config.operator()?.eigenvalues(config.eigenvalue_count);
    let comparison = compare_counts(&eigenvalues, &config.zeta_ordinates, threshold);
    let asymptotic_estimate = estimate_count(threshold)?;
    Ok(CountsSection {
        threshold,
        eigenvalue_count: eigenvalues.len(),
        comparison,
        asymptotic_estimate,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ComparisonSection {
    pub(super) spectral: Vec<f64>,
    pub(super) zeta: Vec<f64>,
    pub(super) errors: ErrorComparison,
    pub(super) mean_absolute_error: f64,
    pub(super) mean_relative_error: f64,
}

impl ComparisonSection {
    /// Rows `n, mu_n, gamma_n, abs_error, rel_error` with `n` starting at 1.
    pub(super) fn rows(&self) -> Vec<[f64; 5]> {
        self.spectral
            .iter()
            .zip(&self.zeta)
            .zip(self.errors.absolute_errors.iter().zip(&self.errors.relative_errors))
            .enumerate()
            .map(|(index, ((mu, gamma), (abs, rel)))| {
                [(index + 1) as f64, *mu, *gamma, *abs, *rel]
            })
            .collect()
    }
}

pub(super) const COMPARISON_HEADERS: [&str; 5] =
    ["n", "mu_n", "gamma_n", "abs_error", "rel_error"];

/// Pairs the first `min(eigenvalueCount, zetaOrdinates.len())` normalized
/// eigenvalues `0.5 lambda_n + 10` with the zeta ordinates.
pub(super) fn comparison_section(config: &RunConfig) -> NumericResult<ComparisonSection> {
    let pairs = config.paired_len();
    let spectral = config.operator()?.normalized_values(pairs);
    let zeta = config.zeta_ordinates[..pairs].to_vec();
    let errors = compare_sequences(&spectral, &zeta)?;
    let mean_absolute_error = mean_absolute_error(&spectral, &zeta)?;
    let mean_relative_error = mean_relative_error(&spectral, &zeta)?;
    Ok(ComparisonSection {
        spectral,
        zeta,
        errors,
        mean_absolute_error,
        mean_relative_error,
    })
}

#[derive(Debug, Clone, Copy)]
pub(super) struct TraceOptions {
    pub(super) samples: Option<usize>,
    pub(super) trivial: bool,
    pub(super) archimedean: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            samples: None,
            trivial: true,
            archimedean: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TraceFormulaSection {
    pub(super) test_function: String,
    pub(super) nontrivial_zero_count: usize,
    pub(super) trivial_zero_count: usize,
    pub(super) archimedean_samples: Option<usize>,
    pub(super) terms: TraceFormulaTerms,
    pub(super) total: f64,
}

impl TraceOptions {
    fn trivial_zeros(&self, config: &RunConfig) -> NumericResult<Option<Vec<f64>>> {
        self.trivial
            .then(|| generate_trivial_zeros(config.trivial_zero_count))
            .transpose()
    }

    fn archimedean_term(&self, config: &RunConfig) -> NumericResult<Option<TrapezoidArchimedean>> {
        self.archimedean
            .then(|| TrapezoidArchimedean::new(self.samples.unwrap_or(config.archimedean_samples)))
            .transpose()
    }
}

pub(super) fn trace_formula_section(
    config: &RunConfig,
    options: TraceOptions,
) -> NumericResult<TraceFormulaSection> {
    let trivial = options.trivial_zeros(config)?;
    let archimedean = options.archimedean_term(config)?;

    let test_fn = config.test_function;
    let terms = trace_formula_terms(
        |s| test_fn.evaluate(s),
        &config.zeta_ordinates,
        trivial.as_deref(),
        archimedean.as_ref().map(|term| term as &dyn ArchimedeanTerm),
    );
    Ok(TraceFormulaSection {
        test_function: test_fn.label(),
        nontrivial_zero_count: config.zeta_ordinates.len(),
        trivial_zero_count: trivial.as_ref().map_or(0, Vec::len),
        archimedean_samples: archimedean.map(|term| term.sample_count()),
        terms,
        total: terms.total(),
    })
}

/// Same terms with the ordinates placed at `1/2 + i gamma` and the test
/// function continued to the complex plane.
pub(super) fn critical_line_terms(
    config: &RunConfig,
    options: TraceOptions,
) -> NumericResult<ComplexTraceFormulaTerms> {
    let trivial = options.trivial_zeros(config)?;
    let archimedean = options.archimedean_term(config)?;
    let test_fn = config.test_function;
    Ok(trace_formula_terms_complex(
        |s| test_fn.evaluate_complex(s),
        &critical_line_zeros(&config.zeta_ordinates),
        trivial.as_deref(),
        archimedean.as_ref(),
    ))
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct KernelSection {
    pub(super) t: f64,
    pub(super) sigma: f64,
    pub(super) scale: f64,
    pub(super) exponential: f64,
    pub(super) gaussian: f64,
    pub(super) sinc: f64,
}

pub(super) fn kernel_section(
    config: &RunConfig,
    t: f64,
    sigma: f64,
    scale: f64,
) -> NumericResult<KernelSection> {
    let eigenvalues = config.operator()?.eigenvalues(config.eigenvalue_count);
    Ok(KernelSection {
        t,
        sigma,
        scale,
        exponential: trace_sum(&exponential_kernel(&eigenvalues, t)),
        gaussian: trace_sum(&gaussian_kernel(&eigenvalues, t, sigma)?),
        sinc: trace_sum(&sinc_kernel(&eigenvalues, t, scale)?),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub(super) struct TracePoint {
    pub(super) t: f64,
    pub(super) value: f64,
}

/// `Tr f(t) = sum exp(t lambda_n)` over the configured grid.
pub(super) fn trace_curve(config: &RunConfig) -> NumericResult<Vec<TracePoint>> {
    let eigenvalues = config.operator()?.eigenvalues(config.eigenvalue_count);
    Ok(config
        .trace_grid
        .points()?
        .into_iter()
        .map(|t| TracePoint {
            t,
            value: trace_function(&eigenvalues, t),
        })
        .collect())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct RunReport {
    pub(super) analyses: Vec<String>,
    pub(super) config: RunConfig,
    pub(super) counts: CountsSection,
    pub(super) comparison: ComparisonSection,
    pub(super) trace_formula: TraceFormulaSection,
    pub(super) trace_function: Vec<TracePoint>,
}

pub(super) fn build_report(config: &RunConfig) -> NumericResult<RunReport> {
    Ok(RunReport {
        analyses: [
            Analysis::Counts,
            Analysis::Compare,
            Analysis::TraceFormula,
        ]
        .iter()
        .map(ToString::to_string)
        .collect(),
        config: config.clone(),
        counts: counts_section(config, config.threshold)?,
        comparison: comparison_section(config)?,
        trace_formula: trace_formula_section(config, TraceOptions::default())?,
        trace_function: trace_curve(config)?,
    })
}

pub(super) fn render_counts(section: &CountsSection) -> String {
    let mut out = String::new();
    let threshold = section.threshold;
    let _ = writeln!(
        out,
        "Spectral count N_spec({threshold}) = {}",
        section.comparison.count_a
    );
    let _ = writeln!(
        out,
        "Zeta count N_zeta({threshold}) = {}",
        section.comparison.count_b
    );
    let _ = writeln!(out, "Difference = {}", section.comparison.difference);
    let _ = write!(
        out,
        "Asymptotic estimate N({threshold}) = {:.6}",
        section.asymptotic_estimate
    );
    out
}

pub(super) fn render_comparison(section: &ComparisonSection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:>4} {:>12} {:>12} {:>12} {:>12}",
        "n", "mu_n", "gamma_n", "abs_error", "rel_error"
    );
    for row in section.rows() {
        let _ = writeln!(
            out,
            "{:>4} {:>12.6} {:>12.6} {:>12.6} {:>12.6}",
            row[0], row[1], row[2], row[3], row[4]
        );
    }
    let _ = writeln!(out, "Mean absolute error = {:.6}", section.mean_absolute_error);
    let _ = write!(out, "Mean relative error = {:.6}", section.mean_relative_error);
    out
}

pub(super) fn render_trace_formula(section: &TraceFormulaSection) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Test function: {}", section.test_function);
    let _ = writeln!(
        out,
        "Nontrivial zeros ({}): {:.12e}",
        section.nontrivial_zero_count, section.terms.nontrivial
    );
    let _ = writeln!(out, "Pole term: {:.12e}", section.terms.pole);
    let _ = writeln!(
        out,
        "Trivial zeros ({}): {:.12e}",
        section.trivial_zero_count, section.terms.trivial
    );
    match section.archimedean_samples {
        Some(samples) => {
            let _ = writeln!(
                out,
                "Archimedean ({samples} samples): {:.12e}",
                section.terms.archimedean
            );
        }
        None => {
            let _ = writeln!(out, "Archimedean: omitted");
        }
    }
    let _ = write!(out, "Trace formula total: {:.12e}", section.total);
    out
}

pub(super) fn render_human_summary(report: &RunReport) -> String {
    [
        render_counts(&report.counts),
        format!(
            "Mean absolute error = {:.6}\nMean relative error = {:.6}",
            report.comparison.mean_absolute_error, report.comparison.mean_relative_error
        ),
        render_trace_formula(&report.trace_formula),
    ]
    .join("\n")
}
