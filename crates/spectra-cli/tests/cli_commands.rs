use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_spectra(working_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_spectra"))
        .current_dir(working_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("spectra binary should run")
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("parent directory should be created");
    }
    fs::write(path, content).expect("file should be written");
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn counts_command_reports_stock_comparison() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(temp.path(), &["counts"]);

    assert!(
        output.status.success(),
        "command should succeed, stderr: {}",
        stderr(&output)
    );
    let text = stdout(&output);
    assert!(text.contains("Spectral count N_spec(50) = 20"), "stdout: {text}");
    assert!(text.contains("Zeta count N_zeta(50) = 10"), "stdout: {text}");
    assert!(text.contains("Difference = 10"), "stdout: {text}");
    assert!(text.contains("Asymptotic estimate N(50) = 8.547782"), "stdout: {text}");
}

#[test]
fn counts_threshold_flag_overrides_config() {
    let temp = TempDir::new().expect("tempdir should be created");
    let config_path = temp.path().join("run.json");
    write_file(&config_path, r#"{ "threshold": 10.0 }"#);

    let output = run_spectra(
        temp.path(),
        &["--config", "run.json", "counts", "--threshold", "30"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("N_spec(30) = 12"), "stdout: {text}");
    assert!(text.contains("N_zeta(30) = 3"), "stdout: {text}");
    assert!(text.contains("Difference = 9"), "stdout: {text}");
}

#[test]
fn compare_command_exports_csv_under_output_dir() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("run.json"),
        r#"{ "eigenvalueCount": 5, "outputDir": "artifacts" }"#,
    );

    let output = run_spectra(
        temp.path(),
        &["--config", "run.json", "compare", "--csv", "comparison.csv"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Mean absolute error"));

    let csv_path = temp.path().join("artifacts/data/comparison.csv");
    let content = fs::read_to_string(&csv_path).expect("csv should be written");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "n,mu_n,gamma_n,abs_error,rel_error");
    assert!(lines[1].starts_with("1,11.25,14.134725,"), "row: {}", lines[1]);
    assert!(lines[5].starts_with("5,16.25,32.935062,"), "row: {}", lines[5]);
}

#[test]
fn trace_formula_flags_drop_optional_terms() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(
        temp.path(),
        &["trace-formula", "--no-trivial", "--no-archimedean"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Test function: gaussian(width=1)"), "stdout: {text}");
    assert!(text.contains("Trivial zeros (0)"), "stdout: {text}");
    assert!(text.contains("Archimedean: omitted"), "stdout: {text}");
    assert!(text.contains("Trace formula total: -3.678794411714e-1"), "stdout: {text}");
}

#[test]
fn trace_formula_rejects_tiny_archimedean_grid() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(temp.path(), &["trace-formula", "--samples", "1"]);

    assert_eq!(output.status.code(), Some(2));
    let text = stderr(&output);
    assert!(text.contains("[INPUT.INVALID_PARAMETER]"), "stderr: {text}");
    assert!(text.contains("FATAL EXIT CODE: 2"), "stderr: {text}");
}

#[test]
fn kernels_command_prints_three_trace_sums() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(
        temp.path(),
        &["kernels", "--t", "25", "--sigma", "2.5", "--scale", "0.4"],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.contains("Exponential trace at t=25"), "stdout: {text}");
    assert!(text.contains("Gaussian trace at t=25 (sigma=2.5)"), "stdout: {text}");
    assert!(text.contains("Sinc trace at t=25 (scale=0.4)"), "stdout: {text}");
}

#[test]
fn report_command_writes_camel_case_json() {
    let temp = TempDir::new().expect("tempdir should be created");
    let report_path = temp.path().join("reports/run.json");

    let output = run_spectra(
        temp.path(),
        &["report", "--out", report_path.to_str().expect("utf-8 path")],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("JSON report:"));

    let parsed: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("report should exist"))
            .expect("report JSON should parse");
    assert_eq!(parsed["analyses"][2], Value::from("TRACE_FORMULA"));
    assert_eq!(parsed["config"]["eigenvalueCount"], Value::from(20));
    assert_eq!(parsed["counts"]["comparison"]["countA"], Value::from(20));
    assert_eq!(parsed["counts"]["comparison"]["difference"], Value::from(10));
    assert_eq!(
        parsed["comparison"]["errors"]["absoluteErrors"]
            .as_array()
            .map(Vec::len),
        Some(20)
    );
    assert_eq!(parsed["traceFormula"]["trivialZeroCount"], Value::from(5));
    assert_eq!(
        parsed["traceFunction"].as_array().map(Vec::len),
        Some(20)
    );
}

#[test]
fn plot_command_writes_four_pngs() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("run.json"),
        r#"{ "outputDir": "artifacts" }"#,
    );

    let output = run_spectra(temp.path(), &["--config", "run.json", "plot"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let plot_dir = temp.path().join("artifacts/plots");
    for name in [
        "comparison_plot.png",
        "spacing_plot.png",
        "density_plot.png",
        "trace_plot.png",
    ] {
        let path = plot_dir.join(name);
        let size = fs::metadata(&path)
            .unwrap_or_else(|error| panic!("{} should exist: {error}", path.display()))
            .len();
        assert!(size > 0, "{} should not be empty", path.display());
        assert!(stdout(&output).contains(name));
    }
}

#[test]
fn plot_command_refuses_overflowing_trace_curve() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(
        &temp.path().join("run.json"),
        r#"{ "outputDir": "artifacts", "traceGrid": { "start": 1.0, "end": 40.0, "count": 5 } }"#,
    );

    let output = run_spectra(temp.path(), &["--config", "run.json", "plot"]);

    assert_eq!(output.status.code(), Some(4));
    assert!(stderr(&output).contains("[COMPUTE.TRACE_OVERFLOW]"));
    assert!(!temp.path().join("artifacts/plots").exists());
}

#[test]
fn invalid_config_exits_with_input_validation_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    write_file(&temp.path().join("bad.json"), r#"{ "alpha": -2.5 }"#);

    let output = run_spectra(temp.path(), &["--config", "bad.json", "counts"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.INVALID_PARAMETER]"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn missing_config_exits_with_io_code() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(temp.path(), &["--config", "absent.json", "counts"]);

    assert_eq!(output.status.code(), Some(3));
    assert!(stderr(&output).contains("[IO.CONFIG_READ]"));
}

#[test]
fn usage_errors_exit_with_code_two() {
    let temp = TempDir::new().expect("tempdir should be created");
    let output = run_spectra(temp.path(), &["counts", "--no-such-flag"]);

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("[INPUT.CLI_USAGE]"));
}

#[test]
fn log_file_accumulates_across_runs() {
    let temp = TempDir::new().expect("tempdir should be created");
    let log_path = temp.path().join("logs/spectra.log");

    for _ in 0..2 {
        let output = run_spectra(
            temp.path(),
            &["--log-file", "logs/spectra.log", "counts"],
        );
        assert!(output.status.success(), "stderr: {}", stderr(&output));
    }

    let log = fs::read_to_string(&log_path).expect("log file should exist");
    assert_eq!(
        log.matches("counting eigenvalues and zeta ordinates").count(),
        2
    );
    assert!(log.contains("COUNTS"));
}
