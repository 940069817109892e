use super::report::{ComparisonSection, TracePoint, comparison_section, trace_curve};
use super::{CliError, helpers::compute_error};
use plotters::prelude::*;
use spectra_core::config::RunConfig;
use spectra_core::domain::SpectraError;
use spectra_core::numerics::{Histogram, NumericResult, difference, histogram};
use std::error::Error;
use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};
use tracing::info;

const CANVAS: (u32, u32) = (1200, 720);

/// Everything the four PNGs draw, derived from one run configuration.
#[derive(Debug, Clone)]
pub(super) struct PlotData {
    pub(super) spectral: Vec<(f64, f64)>,
    pub(super) zeta: Vec<(f64, f64)>,
    pub(super) spectral_spacing: Vec<(f64, f64)>,
    pub(super) zeta_spacing: Vec<(f64, f64)>,
    pub(super) spectral_density: Histogram,
    pub(super) zeta_density: Histogram,
    pub(super) trace: Vec<(f64, f64)>,
}

impl PlotData {
    pub(super) fn from_config(config: &RunConfig) -> NumericResult<Self> {
        let ComparisonSection { spectral, zeta, .. } = comparison_section(config)?;
        let spectral_spacing = difference(&spectral)?;
        let zeta_spacing = difference(&zeta)?;

        let shared = bounds(spectral.iter().chain(&zeta).copied());
        let spectral_density = histogram(&spectral, config.histogram_bins, shared)?;
        let zeta_density = histogram(&zeta, config.histogram_bins, shared)?;

        let trace = trace_curve(config)?
            .into_iter()
            .map(|TracePoint { t, value }| (t, value))
            .collect();

        Ok(Self {
            spectral: indexed(&spectral),
            zeta: indexed(&zeta),
            spectral_spacing: indexed(&spectral_spacing),
            zeta_spacing: indexed(&zeta_spacing),
            spectral_density,
            zeta_density,
            trace,
        })
    }
}

pub(super) fn render_all(config: &RunConfig) -> Result<Vec<PathBuf>, CliError> {
    let data = PlotData::from_config(config).map_err(compute_error)?;
    if let Some((t, _)) = data.trace.iter().find(|(_, value)| !value.is_finite()) {
        return Err(CliError::Compute(SpectraError::computation(
            "COMPUTE.TRACE_OVERFLOW",
            format!("trace Tr exp(t A) is not finite at t={t}; shrink the trace grid"),
        )));
    }
    let plot_dir = config.plot_dir();
    fs::create_dir_all(&plot_dir).map_err(|source| {
        CliError::Compute(SpectraError::io_system(
            "IO.PLOT_DIRECTORY",
            format!("failed to create '{}': {}", plot_dir.display(), source),
        ))
    })?;

    let jobs: [(&str, PlotFn); 4] = [
        ("comparison_plot.png", plot_comparison),
        ("spacing_plot.png", plot_spacing),
        ("density_plot.png", plot_density),
        ("trace_plot.png", plot_trace),
    ];
    let mut written = Vec::with_capacity(jobs.len());
    for (filename, render) in jobs {
        let path = plot_dir.join(filename);
        render(&path, &data).map_err(|error| {
            CliError::Compute(SpectraError::io_system(
                "IO.PLOT",
                format!("failed to render '{}': {}", path.display(), error),
            ))
        })?;
        info!(path = %path.display(), "plot written");
        written.push(path);
    }
    Ok(written)
}

type PlotFn = fn(&Path, &PlotData) -> Result<(), Box<dyn Error>>;

fn plot_comparison(path: &Path, data: &PlotData) -> Result<(), Box<dyn Error>> {
    draw_paired_series(
        path,
        "Spectral values vs zeta ordinates",
        ("n", "value"),
        (data.spectral.as_slice(), "spectral mu_n"),
        (data.zeta.as_slice(), "zeta gamma_n"),
    )
}

fn plot_spacing(path: &Path, data: &PlotData) -> Result<(), Box<dyn Error>> {
    draw_paired_series(
        path,
        "Consecutive spacing",
        ("n", "spacing"),
        (data.spectral_spacing.as_slice(), "spectral"),
        (data.zeta_spacing.as_slice(), "zeta"),
    )
}

fn draw_paired_series(
    path: &Path,
    caption: &str,
    (x_desc, y_desc): (&str, &str),
    (first, first_label): (&[(f64, f64)], &str),
    (second, second_label): (&[(f64, f64)], &str),
) -> Result<(), Box<dyn Error>> {
    let x_range = padded(bounds(first.iter().chain(second).map(|(x, _)| *x)));
    let y_range = padded(bounds(first.iter().chain(second).map(|(_, y)| *y)));

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(caption, ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)?;
    chart.configure_mesh().x_desc(x_desc).y_desc(y_desc).draw()?;

    chart
        .draw_series(LineSeries::new(first.iter().copied(), &BLUE))?
        .label(first_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));
    chart.draw_series(
        first
            .iter()
            .map(|point| Circle::new(*point, 4, BLUE.filled())),
    )?;

    chart
        .draw_series(LineSeries::new(second.iter().copied(), &RED))?
        .label(second_label)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart.draw_series(second.iter().map(|point| Cross::new(*point, 4, RED)))?;

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn plot_density(path: &Path, data: &PlotData) -> Result<(), Box<dyn Error>> {
    let edges = &data.spectral_density.edges;
    let x_range = padded(bounds(edges.iter().copied()));
    let peak = data
        .spectral_density
        .counts
        .iter()
        .chain(&data.zeta_density.counts)
        .copied()
        .max()
        .unwrap_or(0)
        .max(1) as f64;

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Value density", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, 0.0..peak * 1.1)?;
    chart.configure_mesh().x_desc("value").y_desc("count").draw()?;

    for (bins, color, label) in [
        (&data.spectral_density, BLUE, "spectral"),
        (&data.zeta_density, RED, "zeta"),
    ] {
        let half = 0.5 * bins.bin_width();
        chart
            .draw_series(bins.bin_centers().into_iter().zip(&bins.counts).map(
                |(center, count)| {
                    Rectangle::new(
                        [(center - half, 0.0), (center + half, *count as f64)],
                        color.mix(0.4).filled(),
                    )
                },
            ))?
            .label(label)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 20, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;
    root.present()?;
    Ok(())
}

fn plot_trace(path: &Path, data: &PlotData) -> Result<(), Box<dyn Error>> {
    let x_range = padded(bounds(data.trace.iter().map(|(t, _)| *t)));
    let y_range = padded(bounds(data.trace.iter().map(|(_, value)| *value)));

    let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .caption("Trace Tr exp(t A)", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, y_range)?;
    chart.configure_mesh().x_desc("t").y_desc("trace").draw()?;
    chart.draw_series(LineSeries::new(data.trace.iter().copied(), &BLUE))?;
    chart.draw_series(
        data.trace
            .iter()
            .map(|point| Circle::new(*point, 3, BLUE.filled())),
    )?;
    root.present()?;
    Ok(())
}

/// `(1, v_0), (2, v_1), ...`
fn indexed(values: &[f64]) -> Vec<(f64, f64)> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| ((index + 1) as f64, *value))
        .collect()
}

/// Finite min and max, `None` when nothing finite was seen.
fn bounds(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((lo, hi)) => Some((f64::min(lo, value), f64::max(hi, value))),
        })
}

fn padded(bounds: Option<(f64, f64)>) -> Range<f64> {
    match bounds {
        Some((lo, hi)) if hi > lo => {
            let pad = 0.05 * (hi - lo);
            (lo - pad)..(hi + pad)
        }
        Some((value, _)) => (value - 0.5)..(value + 0.5),
        None => 0.0..1.0,
    }
}
