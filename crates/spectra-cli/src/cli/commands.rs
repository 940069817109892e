use super::CliError;
use super::helpers::compute_error;
use super::plots::render_all;
use super::report::{
    COMPARISON_HEADERS, TraceOptions, build_report, comparison_section, counts_section,
    critical_line_terms, kernel_section, render_comparison, render_counts, render_human_summary,
    render_trace_formula, trace_formula_section,
};
use anyhow::Context;
use spectra_core::config::RunConfig;
use spectra_core::domain::{Analysis, SpectraError};
use spectra_core::export::export_csv;
use std::fs;
use std::path::PathBuf;
use tracing::info;

#[derive(clap::Args)]
pub(super) struct CountsArgs {
    /// Counting threshold T (defaults to the configured threshold)
    #[arg(long)]
    threshold: Option<f64>,
}

#[derive(clap::Args)]
pub(super) struct CompareArgs {
    /// Export n, mu_n, gamma_n and both errors to <outputDir>/data/<NAME>
    #[arg(long, value_name = "NAME")]
    csv: Option<String>,
}

#[derive(clap::Args)]
pub(super) struct TraceFormulaArgs {
    /// Archimedean grid size (defaults to the configured sample count)
    #[arg(long)]
    samples: Option<usize>,

    /// Leave out the trivial-zero sum
    #[arg(long)]
    no_trivial: bool,

    /// Leave out the archimedean correction
    #[arg(long)]
    no_archimedean: bool,

    /// Also evaluate with the zeros placed at 1/2 + i gamma
    #[arg(long)]
    critical_line: bool,
}

impl TraceFormulaArgs {
    fn options(&self) -> TraceOptions {
        TraceOptions {
            samples: self.samples,
            trivial: !self.no_trivial,
            archimedean: !self.no_archimedean,
        }
    }
}

#[derive(clap::Args)]
pub(super) struct KernelsArgs {
    /// Kernel parameter t
    #[arg(long, allow_negative_numbers = true)]
    t: f64,

    /// Gaussian kernel width
    #[arg(long, default_value_t = 1.0)]
    sigma: f64,

    /// Sinc kernel frequency scale
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(clap::Args)]
pub(super) struct ReportArgs {
    /// JSON report path (defaults to <outputDir>/report.json)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(super) fn run_counts_command(config: &RunConfig, args: CountsArgs) -> Result<i32, CliError> {
    let threshold = args.threshold.unwrap_or(config.threshold);
    info!(analysis = %Analysis::Counts, threshold, "counting eigenvalues and zeta ordinates");
    let section = counts_section(config, threshold).map_err(compute_error)?;
    println!("{}", render_counts(&section));
    Ok(0)
}

pub(super) fn run_compare_command(config: &RunConfig, args: CompareArgs) -> Result<i32, CliError> {
    info!(
        analysis = %Analysis::Compare,
        pairs = config.paired_len(),
        "comparing normalized eigenvalues with zeta ordinates"
    );
    let section = comparison_section(config).map_err(compute_error)?;
    println!("{}", render_comparison(&section));

    if let Some(filename) = args.csv {
        let path = export_csv(
            config.data_dir(),
            &filename,
            &COMPARISON_HEADERS,
            section.rows(),
        )
        .map_err(CliError::Compute)?;
        info!(path = %path.display(), "comparison exported");
        println!("CSV written: {}", path.display());
    }
    Ok(0)
}

pub(super) fn run_trace_formula_command(
    config: &RunConfig,
    args: TraceFormulaArgs,
) -> Result<i32, CliError> {
    let options = args.options();
    info!(
        analysis = %Analysis::TraceFormula,
        test_function = %config.test_function.label(),
        trivial = options.trivial,
        archimedean = options.archimedean,
        "evaluating trace formula"
    );
    let section = trace_formula_section(config, options).map_err(compute_error)?;
    println!("{}", render_trace_formula(&section));

    if args.critical_line {
        let total = critical_line_terms(config, options)
            .map_err(compute_error)?
            .total();
        println!(
            "Critical-line total: {:.12e} {:+.12e}i",
            total.re, total.im
        );
    }
    Ok(0)
}

pub(super) fn run_kernels_command(config: &RunConfig, args: KernelsArgs) -> Result<i32, CliError> {
    info!(analysis = %Analysis::Kernels, t = args.t, "summing kernel traces");
    let section = kernel_section(config, args.t, args.sigma, args.scale).map_err(compute_error)?;
    println!("Exponential trace at t={}: {:.12e}", section.t, section.exponential);
    println!(
        "Gaussian trace at t={} (sigma={}): {:.12e}",
        section.t, section.sigma, section.gaussian
    );
    println!(
        "Sinc trace at t={} (scale={}): {:.12e}",
        section.t, section.scale, section.sinc
    );
    Ok(0)
}

pub(super) fn run_plot_command(config: &RunConfig) -> Result<i32, CliError> {
    info!(analysis = %Analysis::Plot, dir = %config.plot_dir().display(), "rendering plots");
    for path in render_all(config)? {
        println!("Plot written: {}", path.display());
    }
    Ok(0)
}

pub(super) fn run_report_command(config: &RunConfig, args: ReportArgs) -> Result<i32, CliError> {
    let report_path = args
        .out
        .unwrap_or_else(|| config.output_dir.join("report.json"));
    info!(analysis = %Analysis::Report, path = %report_path.display(), "building report");

    let report = build_report(config).map_err(compute_error)?;
    let json = serde_json::to_string_pretty(&report).context("failed to serialize run report")?;

    let write_error = |source: std::io::Error| {
        CliError::Compute(SpectraError::io_system(
            "IO.REPORT_WRITE",
            format!("failed to write '{}': {}", report_path.display(), source),
        ))
    };
    if let Some(parent) = report_path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
    {
        fs::create_dir_all(parent).map_err(write_error)?;
    }
    fs::write(&report_path, json).map_err(write_error)?;

    println!("{}", render_human_summary(&report));
    println!("JSON report: {}", report_path.display());
    Ok(0)
}
