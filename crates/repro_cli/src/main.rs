//! REPRO CLI
//!
//! Replays saved fuzz inputs against a libFuzzer-style target, outside
//! the fuzzing engine.

#![warn(missing_docs)]
#![warn(clippy::all)]

use clap::{ArgAction, Parser, ValueEnum};
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use repro_core::{ExitStatus, ReplayConfig, ReproError};
use repro_driver::{ReplayDriver, collect_inputs};
use repro_target::FuzzTarget;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[cfg(not(any(feature = "dynamic", feature = "linked")))]
compile_error!("enable the `dynamic` or `linked` feature to select a target backend");

#[derive(Parser)]
#[command(name = "repro", version)]
#[command(about = "REPRO - replay saved fuzz inputs against a libFuzzer-style target", long_about = None)]
struct Cli {
    /// Input files or corpus directories to replay
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Shared object exporting LLVMFuzzerTestOneInput
    #[cfg(feature = "dynamic")]
    #[arg(long, env = "REPRO_TARGET_LIB", value_name = "PATH")]
    target_lib: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Refuse inputs larger than this many bytes (0 = unlimited)
    #[arg(long, value_name = "BYTES")]
    max_len: Option<u64>,

    /// Invocations per input
    #[arg(long, value_name = "N")]
    runs: Option<u32>,

    /// Fail when a file's size changes while it is read
    #[arg(long)]
    strict_length: bool,

    /// Exit with the target's last non-zero return value
    #[arg(long)]
    propagate_status: bool,

    /// Summary written to stdout after the run
    #[arg(long, value_enum, default_value_t = ReportFormat::None)]
    report: ReportFormat,

    /// Log output format (stderr)
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Arguments passed to LLVMFuzzerInitialize
    #[arg(last = true, value_name = "INIT_ARGS")]
    init_args: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    None,
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitStatus::Usage.into()
            } else {
                ExitStatus::Success.into()
            };
        }
    };

    if let Err(err) = color_eyre::install() {
        eprintln!("repro: {err}");
    }
    init_tracing(cli.log_format, cli.verbose);

    match run(&cli) {
        Ok(status) => status.into(),
        Err(report) => {
            eprintln!("repro: {report:#}");
            report
                .downcast_ref::<ReproError>()
                .map_or(ExitStatus::Usage, ExitStatus::from)
                .into()
        }
    }
}

fn run(cli: &Cli) -> Result<ExitStatus> {
    let config = load_config(cli)?;
    let target = open_target(cli)?;
    tracing::info!(target_name = %target.name(), "target ready");

    let mut init_args = Vec::new();
    if !cli.init_args.is_empty() {
        init_args.push(program_name(std::env::args_os().next()));
        init_args.extend(cli.init_args.iter().cloned());
    }

    let inputs = collect_inputs(&cli.inputs)?;
    if inputs.is_empty() {
        return Err(ReproError::usage("no input files found").into());
    }

    let propagate = config.propagate_status;
    let mut driver = ReplayDriver::with_config(target, config).with_init_args(init_args);
    let summary = driver.run_all(&inputs)?;

    match cli.report {
        ReportFormat::None => {}
        ReportFormat::Text => print!("{}", summary.render_text()),
        ReportFormat::Json => println!("{}", summary.to_json()?),
    }

    Ok(summary.exit_status(propagate))
}

/// `argv[0]` for the init hook; non-UTF-8 names are converted lossily
fn program_name(arg0: Option<OsString>) -> String {
    arg0.map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "repro".to_string())
}

/// Defaults, then the config file, then command-line flags
fn load_config(cli: &Cli) -> Result<ReplayConfig> {
    let mut config = match &cli.config {
        Some(path) => read_config(path)
            .wrap_err_with(|| format!("loading config {}", path.display()))?,
        None => ReplayConfig::default(),
    };

    if let Some(max_len) = cli.max_len {
        config.max_input_len = max_len;
    }
    if let Some(runs) = cli.runs {
        config.runs = runs;
    }
    config.strict_length |= cli.strict_length;
    config.propagate_status |= cli.propagate_status;
    config.forward_init_args |= !cli.init_args.is_empty();

    config.validate()?;
    tracing::debug!(?config, "configuration resolved");
    Ok(config)
}

fn read_config(path: &Path) -> Result<ReplayConfig, ReproError> {
    let json = std::fs::read_to_string(path).map_err(|e| ReproError::Config {
        field: "config".to_string(),
        reason: e.to_string(),
    })?;
    ReplayConfig::from_json(&json)
}

#[allow(unreachable_code)]
fn open_target(cli: &Cli) -> Result<Box<dyn FuzzTarget>> {
    #[cfg(feature = "dynamic")]
    if let Some(path) = &cli.target_lib {
        return Ok(Box::new(repro_target::DynamicTarget::open(path)?));
    }

    #[cfg(feature = "linked")]
    {
        let _ = cli;
        return Ok(Box::new(repro_target::LinkedTarget::new()));
    }

    Err(ReproError::usage("no target given, pass --target-lib or set REPRO_TARGET_LIB").into())
}

fn init_tracing(format: LogFormat, verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_env("REPRO_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["repro", "--max-len", "64", "--runs", "2", "crash1"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.max_input_len, 64);
        assert_eq!(config.runs, 2);
        assert!(!config.forward_init_args);
    }

    #[test]
    fn test_trailing_args_enable_forwarding() {
        let cli = Cli::parse_from(["repro", "crash1", "--", "-dict=x.dict"]);
        assert_eq!(cli.inputs, vec![PathBuf::from("crash1")]);
        assert_eq!(cli.init_args, vec!["-dict=x.dict".to_string()]);
        assert!(load_config(&cli).unwrap().forward_init_args);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("repro.json");
        std::fs::write(&path, r#"{"runs": 5, "max_input_len": 10}"#).unwrap();
        let cli = Cli::parse_from([
            "repro",
            "--config",
            path.to_str().unwrap(),
            "--runs",
            "1",
            "crash1",
        ]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.runs, 1);
        assert_eq!(config.max_input_len, 10);
    }

    #[test]
    fn test_zero_runs_rejected() {
        let cli = Cli::parse_from(["repro", "--runs", "0", "crash1"]);
        let err = load_config(&cli).unwrap_err();
        assert_eq!(
            err.downcast_ref::<ReproError>().map(ExitStatus::from),
            Some(ExitStatus::Usage)
        );
    }

    #[test]
    fn test_program_name_fallback() {
        assert_eq!(program_name(None), "repro");
        assert_eq!(program_name(Some(OsString::from("/bin/repro"))), "/bin/repro");
    }

    #[cfg(unix)]
    #[test]
    fn test_program_name_non_utf8() {
        use std::os::unix::ffi::OsStringExt;

        let name = program_name(Some(OsString::from_vec(b"re\xffpro".to_vec())));
        assert_eq!(name, "re\u{FFFD}pro");
    }

    #[test]
    fn test_missing_inputs_rejected() {
        let err = Cli::try_parse_from(["repro"]).err().unwrap();
        assert!(err.use_stderr());
    }
}
