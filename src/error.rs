//! Error types for cdr-fetch
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! No variant is retried: any error ends the run.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for cdr-fetch
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Input Validation Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid {field} date: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("Directory does not exist: {}", path.display())]
    OutputDirMissing { path: PathBuf },

    #[error("Output file exists. Use --overwrite to overwrite {}", path.display())]
    OutputExists { path: PathBuf },

    // ============================================================================
    // Transport / API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid timestamp error for the named field
    pub fn invalid_timestamp(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field,
            value: value.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// True for errors raised before any request is sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::InvalidTimestamp { .. }
                | Error::OutputDirMissing { .. }
                | Error::OutputExists { .. }
        )
    }
}

/// Result type alias for cdr-fetch
pub type Result<T> = std::result::Result<T, Error>;
