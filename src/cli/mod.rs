//! CLI module
//!
//! Command-line surface and the runner that drives one download.

mod commands;
mod runner;

pub use commands::Cli;
pub use runner::{RunSummary, Runner};
