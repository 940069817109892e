mod commands;
mod helpers;
mod plots;
mod report;

use clap::Parser;
use spectra_core::domain::SpectraError;
use std::path::PathBuf;

pub fn run_from_env() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match run(args) {
        Ok(code) => code,
        Err(error) => {
            let spectra_error = error.as_spectra_error();
            eprintln!("{}", spectra_error.diagnostic_line());
            if let Some(summary_line) = spectra_error.fatal_exit_line() {
                eprintln!("{}", summary_line);
            }
            spectra_error.exit_code()
        }
    }
}

pub fn run<I, S>(args: I) -> Result<i32, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let full_args = std::iter::once("spectra".to_string())
        .chain(args.into_iter().map(Into::into))
        .collect::<Vec<_>>();
    parse_and_dispatch(full_args)
}

fn parse_and_dispatch(args: Vec<String>) -> Result<i32, CliError> {
    match Cli::try_parse_from(&args) {
        Ok(cli) => {
            helpers::init_logging(cli.global.verbose, cli.global.log_file.as_deref())?;
            dispatch_parsed(&cli.global, cli.command)
        }
        Err(err) => match err.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                print!("{}", err);
                Ok(0)
            }
            _ => Err(CliError::Usage(err.to_string())),
        },
    }
}

#[derive(Parser)]
#[command(
    name = "spectra",
    version,
    about = "Toy spectral analogies for the Riemann zeta zeros"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(clap::Args)]
pub(crate) struct GlobalArgs {
    /// JSON run configuration; defaults apply to every missing field
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,

    /// Append log events to this file as well as stderr
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) log_file: Option<PathBuf>,

    /// Raise the default log filter to debug
    #[arg(short, long, global = true)]
    pub(crate) verbose: bool,
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Compare eigenvalue and zeta-zero counts below a threshold
    Counts(commands::CountsArgs),
    /// Elementwise error metrics between normalized eigenvalues and zeta ordinates
    Compare(commands::CompareArgs),
    /// Evaluate the simplified trace formula term by term
    TraceFormula(commands::TraceFormulaArgs),
    /// Kernel trace sums over the operator spectrum
    Kernels(commands::KernelsArgs),
    /// Render comparison, spacing, density and trace plots
    Plot,
    /// Run every analysis and write a JSON report
    Report(commands::ReportArgs),
}

fn dispatch_parsed(global: &GlobalArgs, command: CliCommand) -> Result<i32, CliError> {
    let config = helpers::load_config(global.config.as_deref())?;
    match command {
        CliCommand::Counts(args) => commands::run_counts_command(&config, args),
        CliCommand::Compare(args) => commands::run_compare_command(&config, args),
        CliCommand::TraceFormula(args) => commands::run_trace_formula_command(&config, args),
        CliCommand::Kernels(args) => commands::run_kernels_command(&config, args),
        CliCommand::Plot => commands::run_plot_command(&config),
        CliCommand::Report(args) => commands::run_report_command(&config, args),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("{0}")]
    Compute(SpectraError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl CliError {
    fn as_spectra_error(&self) -> SpectraError {
        match self {
            Self::Usage(message) => {
                SpectraError::input_validation("INPUT.CLI_USAGE", message.clone())
            }
            Self::Compute(error) => error.clone(),
            Self::Internal(error) => SpectraError::internal("RUN.CLI", format!("{error:#}")),
        }
    }
}
