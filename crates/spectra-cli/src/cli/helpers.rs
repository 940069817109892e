use super::CliError;
use spectra_core::config::{RunConfig, RunConfigError, load_run_config};
use spectra_core::domain::SpectraError;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

pub(super) fn compute_error(error: impl Into<SpectraError>) -> CliError {
    CliError::Compute(error.into())
}

/// Installs the global subscriber: stderr always, plus `log_file` opened in
/// append mode when given. `RUST_LOG` overrides the default filter.
pub(super) fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<(), CliError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init();
    if installed.is_err() {
        // Repeated in-process runs keep the first subscriber.
        debug!("log subscriber already installed");
    }
    Ok(())
}

fn open_log_file(path: &Path) -> Result<fs::File, CliError> {
    let log_error = |source: std::io::Error| {
        CliError::Compute(SpectraError::io_system(
            "IO.LOG_FILE",
            format!("failed to open log file '{}': {}", path.display(), source),
        ))
    };
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(log_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_error)
}

/// Loads and validates the run configuration. Without a path the stock
/// defaults are used.
pub(super) fn load_config(path: Option<&Path>) -> Result<RunConfig, CliError> {
    let config = match path {
        Some(path) => load_run_config(path).map_err(config_error)?,
        None => RunConfig::default(),
    };
    config.validate().map_err(compute_error)?;
    Ok(config)
}

fn config_error(error: RunConfigError) -> CliError {
    let spectra_error = match &error {
        RunConfigError::Read { .. } => {
            SpectraError::io_system("IO.CONFIG_READ", error.to_string())
        }
        RunConfigError::Parse { .. } => {
            SpectraError::input_validation("INPUT.CONFIG_PARSE", error.to_string())
        }
    };
    CliError::Compute(spectra_error)
}

#[cfg(test)]
mod tests {
    use super::{load_config, open_log_file};
    use crate::cli::CliError;
    use std::fs;
    use std::io::Write;
    use tempfile::TempDir;

    fn placeholder(error: CliError) -> &'static str {
        match error {
            CliError::Compute(error) => error.placeholder(),
            other => panic!("expected compute error, got {other:?}"),
        }
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config.eigenvalue_count, 20);
    }

    #[test]
    fn config_failures_map_to_placeholders() {
        let temp = TempDir::new().expect("tempdir should be created");

        let missing = temp.path().join("missing.json");
        let error = load_config(Some(&missing)).expect_err("missing file");
        assert_eq!(placeholder(error), "IO.CONFIG_READ");

        let broken = temp.path().join("broken.json");
        fs::write(&broken, "[1, 2").expect("write");
        let error = load_config(Some(&broken)).expect_err("broken json");
        assert_eq!(placeholder(error), "INPUT.CONFIG_PARSE");

        let invalid = temp.path().join("invalid.json");
        fs::write(&invalid, r#"{ "alpha": -1.0 }"#).expect("write");
        let error = load_config(Some(&invalid)).expect_err("negative alpha");
        assert_eq!(placeholder(error), "INPUT.INVALID_PARAMETER");
    }

    #[test]
    fn log_file_is_appended_not_truncated() {
        let temp = TempDir::new().expect("tempdir should be created");
        let path = temp.path().join("logs/nested/run.log");

        let mut first = open_log_file(&path).expect("open");
        writeln!(first, "first").expect("write");
        drop(first);
        let mut second = open_log_file(&path).expect("reopen");
        writeln!(second, "second").expect("write");
        drop(second);

        assert_eq!(
            fs::read_to_string(&path).expect("read"),
            "first\nsecond\n"
        );
    }
}
