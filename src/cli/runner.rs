//! CLI runner - downloads one time window to the output file

use crate::config::RunConfig;
use crate::error::Result;
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::open_sink;
use crate::pagination::PageFetcher;
use crate::types::FetchStats;
use std::time::Instant;
use tracing::info;

/// Outcome of a completed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Fetch counters
    pub stats: FetchStats,
    /// Records written to the output file
    pub rows_written: usize,
    /// Wall time in milliseconds
    pub duration_ms: u64,
}

/// CLI runner
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    /// Create a new runner
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    /// Fetch every page and write the records.
    ///
    /// Prints `Page: N` before each request so long downloads show progress.
    pub async fn run(&self) -> Result<RunSummary> {
        let start = Instant::now();
        let config = &self.config;

        let client = HttpClient::with_config(
            HttpClientConfig::builder()
                .bearer_token(&config.request.token)
                .build(),
        )?;
        let mut sink = open_sink(&config.output, config.format, config.pretty)?;

        info!(
            endpoint = %config.request.endpoint,
            begin = %config.request.begin,
            end = %config.request.end,
            output = %config.output.display(),
            "Fetching call detail records"
        );

        let mut fetcher = PageFetcher::new(&client, config.request.clone());
        while !fetcher.is_done() {
            println!("Page: {}", fetcher.stats().requests);
            if let Some(page) = fetcher.next_page().await? {
                sink.write_page(page.items)?;
            }
        }

        let rows_written = sink.close()?;
        let stats = fetcher.stats();
        let duration_ms = start.elapsed().as_millis() as u64;

        info!(
            pages = stats.pages,
            records = rows_written,
            duration_ms,
            "Completed download"
        );

        Ok(RunSummary {
            stats,
            rows_written,
            duration_ms,
        })
    }
}
