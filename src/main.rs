//! Command line front end for feed arbitration analysis.
//!
//! # Usage
//!
//! ```bash
//! # Text report for the two captures in a directory
//! feedarb /captures/2019-08-29
//!
//! # YAML report with custom channel tags, printing per-frame diagnostics
//! feedarb /captures/2019-08-29 --config feedarb.yaml --format yaml --diagnostics
//! ```
//!
//! Exit codes: `0` success, `13` bad arguments, `14` input discovery failed,
//! `15` channel assignment failed, `16` a capture could not be opened, `2`
//! any other failure.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use feedarb::config::AnalysisConfig;
use feedarb::{ArbError, DiagnosticSink, FeedArb, Statistics, TracingSink};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Compare latency and loss of the two channels of a redundant feed.
#[derive(Parser, Debug)]
#[command(name = "feedarb")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory holding exactly two capture files, one per channel.
    dir: PathBuf,

    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Report format.
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Print per-frame diagnostics to stderr.
    #[arg(long, default_value_t = false)]
    diagnostics: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Yaml,
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if e.use_stderr() => {
            let _ = e.print();
            return ExitCode::from(ArbError::arguments(e.to_string()).exit_code());
        }
        Err(e) => {
            // --help and --version
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
    };

    init_tracing();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            for suggestion in e.recovery_suggestions() {
                debug!("Suggestion: {}", suggestion);
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn run(args: &Args) -> Result<(), ArbError> {
    let config = match &args.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::default(),
    };

    let mut stderr_sink = |line: &str| eprintln!("{line}");
    let mut tracing_sink = TracingSink;
    let sink: &mut dyn DiagnosticSink =
        if args.diagnostics { &mut stderr_sink } else { &mut tracing_sink };

    let stats = FeedArb::analyze(&args.dir, &config, Some(sink))?;
    print_report(&stats, args.format)
}

fn print_report(stats: &Statistics, format: Format) -> Result<(), ArbError> {
    let report = match format {
        Format::Text => stats.to_string(),
        Format::Yaml => stats.to_yaml()?,
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", report.trim_end())
        .and_then(|()| stdout.flush())
        .map_err(|e| ArbError::file_error(PathBuf::from("<stdout>"), e))
}
