//! CLI argument parsing

use crate::types::{OutputFormat, DEFAULT_BASE_URL};
use clap::Parser;
use std::path::PathBuf;

/// Download CarrierX call detail records
#[derive(Parser, Debug, Clone)]
#[command(name = "cdr-fetch")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Security access token available in the portal
    #[arg(short, long, env = "CARRIERX_TOKEN", hide_env_values = true)]
    pub token: String,

    /// The beginning date (and optionally time), inclusive, in ISO 8601 format
    #[arg(short, long)]
    pub begin: String,

    /// The ending date (and optionally time), exclusive, in ISO 8601 format. Default is now
    #[arg(short, long)]
    pub end: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// Overwrite the output file
    #[arg(short, long)]
    pub overwrite: bool,

    /// Get conference call records. Default is SIP call records
    #[arg(short, long)]
    pub conference: bool,

    /// Indent JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// API base URL
    #[arg(long, env = "CARRIERX_BASE_URL", default_value = DEFAULT_BASE_URL, hide = true)]
    pub base_url: String,

    /// File where the CDRs should be written
    pub filename: PathBuf,
}
