//! CLI argument definitions for statx.

use std::net::IpAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;

use crate::config::{DEFAULT_DATA_DIR, DEFAULT_TEMP_DIR, Settings};

#[derive(Parser)]
#[command(
    name = "statx",
    version,
    about = "statx - Export statistics datasets to Excel workbooks",
    long_about = "Export rows of parquet statistics datasets, selected by year and\n\
                  variable code, into multi-sheet Excel workbooks.\n\n\
                  Run as an HTTP service (serve) or as a one-shot command (export)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for humans, json for log shippers).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Serve the export API over HTTP.
    Serve(ServeArgs),

    /// Run one export job from a JSON request file.
    Export(ExportArgs),

    /// Write a default .env file.
    InitEnv(InitEnvArgs),
}

/// Data and temp directories, shared by `serve` and `export`.
#[derive(Args, Clone)]
pub struct DirArgs {
    /// Directory datasets are read from.
    #[arg(long = "data-dir", env = "DATA_DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory workbooks are written to and served from.
    #[arg(long = "temp-dir", env = "TEMP_DIR", default_value = DEFAULT_TEMP_DIR)]
    pub temp_dir: PathBuf,
}

impl DirArgs {
    pub fn settings(&self) -> Settings {
        Settings::new(&self.data_dir, &self.temp_dir)
    }
}

#[derive(Args)]
pub struct ServeArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Address to bind.
    #[arg(long, env = "STATX_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on.
    #[arg(long, env = "STATX_PORT", default_value_t = 8000)]
    pub port: u16,
}

#[derive(Args)]
pub struct ExportArgs {
    /// JSON file holding the export request.
    #[arg(value_name = "REQUEST_JSON")]
    pub request: PathBuf,

    #[command(flatten)]
    pub dirs: DirArgs,
}

#[derive(Args)]
pub struct InitEnvArgs {
    /// Overwrite an existing .env without asking.
    #[arg(long)]
    pub force: bool,

    /// Target file.
    #[arg(long, value_name = "PATH", default_value = crate::config::ENV_FILE)]
    pub path: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
