//! CLI argument definitions for tagflow.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `process` | Turn a captured feed into a statistics log and a CSV table |
//! | `listen` | Print every payload published on the tag topic for a while |
//!
//! # Examples
//!
//! ```bash
//! # Capture five minutes of positioning updates
//! tagflow listen --annotate > capture.txt
//!
//! # Process the capture into hall-a_logdata.txt and hall-a_df.csv
//! tagflow process --inputfile capture.txt --experiment hall-a
//! ```

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tagflow_core::OffsetSetting;

/// Tagflow - RTLS positioning feed capture and analysis
#[derive(Debug, Parser)]
#[command(
    name = "tagflow",
    author,
    version,
    about = "RTLS positioning feed capture and analysis"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Process a captured feed file.
    ///
    /// Writes `<experiment>_logdata.txt` with success/failure statistics and
    /// `<experiment>_df.csv` with one row per successful measurement, then
    /// prints a JSON run report.
    ///
    /// # Examples
    ///
    ///   tagflow process --inputfile capture.txt
    ///   tagflow process --inputfile capture.txt --experiment hall-a --utc-offset +02:00
    Process(ProcessArgs),

    /// Subscribe to the tag topic and print payloads to stdout.
    ///
    /// # Examples
    ///
    ///   tagflow listen
    ///   tagflow listen --host broker.local --duration-secs 60 --annotate
    Listen(ListenArgs),
}

/// Arguments for the `process` command.
#[derive(Debug, Args)]
pub struct ProcessArgs {
    /// Captured feed file, one record array per line.
    #[arg(long)]
    pub inputfile: PathBuf,

    /// Experiment name used to name the output files.
    #[arg(long, default_value = tagflow_core::config::DEFAULT_EXPERIMENT)]
    pub experiment: String,

    /// Directory the output files are written to.
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Offset for the dateTime column: 'local', 'UTC' or ±HH:MM.
    #[arg(long, default_value = "local", value_parser = OffsetSetting::from_str)]
    pub utc_offset: OffsetSetting,

    /// How the table header is derived.
    #[arg(long, value_enum, default_value_t = ColumnsArg::FirstRecord)]
    pub columns: ColumnsArg,

    /// Pretty-print the JSON run report.
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

/// Header derivation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColumnsArg {
    /// Columns of the first successful record (compatible with earlier exports).
    FirstRecord,
    /// Every column seen in any record, with empty cells where absent.
    Union,
}

/// Arguments for the `listen` command.
///
/// Flags override values from `--config`, which override the built-in defaults.
#[derive(Debug, Args)]
pub struct ListenArgs {
    /// TOML file with listener settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Broker host.
    #[arg(long)]
    pub host: Option<String>,

    /// Broker port.
    #[arg(long)]
    pub port: Option<u16>,

    /// Topic to subscribe to.
    #[arg(long)]
    pub topic: Option<String>,

    /// Seconds to collect messages before disconnecting.
    #[arg(long)]
    pub duration_secs: Option<u64>,

    /// MQTT client identifier.
    #[arg(long)]
    pub client_id: Option<String>,

    /// Also print connection status lines and prefix payloads, matching the
    /// capture format `process` expects.
    #[arg(long, default_value_t = false)]
    pub annotate: bool,
}
