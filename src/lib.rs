//! # cdr-fetch
//!
//! Downloads call detail records (CDRs) from the CarrierX API and writes them
//! to a CSV or JSON file.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cdr_fetch::cli::{Cli, Runner};
//! use cdr_fetch::config::RunConfig;
//! use clap::Parser;
//!
//! #[tokio::main]
//! async fn main() -> cdr_fetch::Result<()> {
//!     let cli = Cli::parse();
//!     let summary = Runner::new(RunConfig::from_cli(&cli)?).run().await?;
//!     println!("{} records", summary.rows_written);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐    ┌────────────┐    ┌─────────────┐    ┌──────────────┐
//! │   CLI    │ →  │ RunConfig  │ →  │ PageFetcher │ →  │  RecordSink  │
//! │  (clap)  │    │ validation │    │ cursor loop │    │  CSV / JSON  │
//! └──────────┘    └────────────┘    └──────┬──────┘    └──────────────┘
//!                                          │
//!                                   ┌──────┴──────┐
//!                                   │ HttpClient  │
//!                                   │ bearer auth │
//!                                   └─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and constants
pub mod types;

/// HTTP client
pub mod http;

/// Cursor-following page fetcher
pub mod pagination;

/// CSV and JSON output
pub mod output;

/// Run configuration and input validation
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
