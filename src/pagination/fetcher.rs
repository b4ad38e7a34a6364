//! Page fetcher
//!
//! Issues one request at a time, following the server's continuation cursor
//! until an empty or short page arrives. There is no cap on the number of
//! pages: a server that keeps returning full pages with a `next` link is
//! followed indefinitely.

use super::types::{Cursor, FetchRequest};
use crate::error::Result;
use crate::http::HttpClient;
use crate::types::{FetchStats, Page};
use tracing::debug;

/// Sequential page fetcher for one [`FetchRequest`]
///
/// Not restartable: once it reports the end (or an error) every later call
/// returns `None`.
#[derive(Debug)]
pub struct PageFetcher<'a> {
    client: &'a HttpClient,
    request: FetchRequest,
    cursor: Cursor,
    stats: FetchStats,
}

impl<'a> PageFetcher<'a> {
    /// Create a fetcher positioned before the first page
    pub fn new(client: &'a HttpClient, request: FetchRequest) -> Self {
        Self {
            client,
            request,
            cursor: Cursor::Initial,
            stats: FetchStats::new(),
        }
    }

    /// Counters so far
    pub fn stats(&self) -> FetchStats {
        self.stats
    }

    /// True once no further request will be issued
    pub fn is_done(&self) -> bool {
        self.cursor.is_done()
    }

    /// Fetch the next page.
    ///
    /// Returns `Ok(None)` when pagination is over, including when the server
    /// answers with `count == 0` (that page is not emitted).
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        // Any failure below leaves the fetcher finished.
        let cursor = std::mem::replace(&mut self.cursor, Cursor::Done);
        let Some((url, config)) = cursor.request(&self.request) else {
            return Ok(None);
        };

        self.stats.add_request();
        debug!(request = self.stats.requests, url = %url, "Fetching page");

        let page: Page = self.client.get_json(&url, config).await?;
        self.cursor = Cursor::after(&page, &self.request)?;

        debug!(
            count = page.count,
            done = self.cursor.is_done(),
            "Received page"
        );

        if page.count == 0 {
            return Ok(None);
        }

        self.stats.add_page(page.items.len() as u64);
        Ok(Some(page))
    }
}
