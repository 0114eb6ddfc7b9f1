/// XVS command-line tool — normalize XVIZ stream records stored as JSON.
///
/// # Command overview
///
/// ```text
/// xvs <COMMAND> [OPTIONS]
///
/// Commands:
///   timeseries   Fold time-series entries into latest-sample-per-stream JSON
///   variable     Normalize one variable block of a named stream
///   validate     Check that a record file decodes under the chosen version
///   help         Print help information
///
/// Global options:
///   -v, --verbose          Enable debug logging (RUST_LOG overrides)
///   --major-version <N>    Protocol major version [env: XVS_MAJOR_VERSION] [default: 2]
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                     |
/// |------|---------------------------------------------|
/// | 0    | Success                                     |
/// | 1    | Error (I/O failure, invalid record, etc.)   |
///
/// Canonical output goes to stdout; errors and logs go to stderr.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;

mod cmd_timeseries;
mod cmd_validate;
mod cmd_variable;
mod input;

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The XVS stream record command-line tool.
#[derive(Parser)]
#[command(name = "xvs", version, about = "XVIZ stream record normalizer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging on stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Protocol major version used to interpret variable blocks.
    #[arg(long, global = true, env = "XVS_MAJOR_VERSION", default_value_t = xvs_decoder::settings::DEFAULT_MAJOR_VERSION)]
    major_version: u32,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Fold time-series entries into the latest sample per stream.
    Timeseries(TimeseriesArgs),
    /// Normalize one variable block of a named stream.
    Variable(VariableArgs),
    /// Check that a record file decodes without printing it.
    Validate(ValidateArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `xvs timeseries`.
///
/// The file holds either one array of time-series entries or an array of
/// such arrays. Nested arrays are treated as successive chunks of one
/// session and threaded through a single accumulator, so the output is
/// the latest sample per stream across all chunks.
#[derive(clap::Args)]
pub struct TimeseriesArgs {
    /// Path to the JSON file of time-series entries.
    pub file: PathBuf,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `xvs variable`.
///
/// ```text
/// ┌──────────┬──────────────────────────────────────────────────────┐
/// │ Flag     │ Effect                                               │
/// ├──────────┼──────────────────────────────────────────────────────┤
/// │ --stream │ Stream the block belongs to (labels errors and logs) │
/// │ --time   │ Grouping time written as the record's `time`         │
/// │ --pretty │ Pretty-print the JSON output                         │
/// └──────────┴──────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct VariableArgs {
    /// Path to the JSON file holding one variable block.
    pub file: PathBuf,

    /// Name of the stream the block belongs to.
    #[arg(long, default_value = "/variable")]
    pub stream: String,

    /// Grouping time of the block.
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub time: i64,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pub pretty: bool,
}

/// Arguments for `xvs validate`.
///
/// A top-level JSON array is checked as time-series entries (or chunks of
/// them); a top-level object is checked as one variable block.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the JSON record file to check.
    pub file: PathBuf,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::init_from_env(Env::default().default_filter_or(default_filter));

    xvs_decoder::set_current_major_version(cli.major_version);

    let result = match cli.command {
        Commands::Timeseries(args) => cmd_timeseries::run(&args),
        Commands::Variable(args) => cmd_variable::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
