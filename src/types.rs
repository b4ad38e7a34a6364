//! Common types used throughout cdr-fetch
//!
//! Records, API pages, endpoint selection and run statistics.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use url::Url;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// One call detail record.
///
/// Field order is the order the server sent them in, which the CSV header
/// relies on.
pub type Record = serde_json::Map<String, JsonValue>;

// ============================================================================
// Constants
// ============================================================================

/// Default CarrierX API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.carrierx.com/core/v2";

/// Records requested per page. The API will not return more than 1000.
pub const PAGE_SIZE: u32 = 1000;

// ============================================================================
// API Response Types
// ============================================================================

/// One page of the CDR listing response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Number of records in `items`
    pub count: u64,
    /// Records on this page, in server order
    #[serde(default)]
    pub items: Vec<Record>,
    /// Continuation block, absent on the last page
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block of a page response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// URL of the next page
    #[serde(default)]
    pub next: Option<String>,
}

impl Page {
    /// Continuation URL supplied by the server, if any
    pub fn next_url(&self) -> Option<&str> {
        self.pagination
            .as_ref()
            .and_then(|p| p.next.as_deref())
            .filter(|next| !next.is_empty())
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// Which CDR listing to download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// SIP call detail records
    #[default]
    Calls,
    /// Conference call records
    Conference,
}

impl Endpoint {
    /// Select the endpoint from the `--conference` flag
    pub fn from_conference_flag(conference: bool) -> Self {
        if conference {
            Self::Conference
        } else {
            Self::Calls
        }
    }

    /// Path of the listing relative to the API base
    pub fn path(&self) -> &'static str {
        match self {
            Self::Calls => "calls/call_drs",
            Self::Conference => "app/conference/calls",
        }
    }

    /// Full listing URL under `base_url`
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let base = base_url.trim_end_matches('/');
        Ok(Url::parse(&format!("{base}/{}", self.path()))?)
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// Output file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Comma separated values, every field quoted
    #[default]
    Csv,
    /// A single JSON array of records
    Json,
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters kept while fetching
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchStats {
    /// HTTP requests issued
    pub requests: u64,
    /// Pages handed to the caller
    pub pages: u64,
    /// Records handed to the caller
    pub records: u64,
}

impl FetchStats {
    /// Create new stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Count an issued request
    pub fn add_request(&mut self) {
        self.requests += 1;
    }

    /// Count an emitted page
    pub fn add_page(&mut self, records: u64) {
        self.pages += 1;
        self.records += records;
    }
}
