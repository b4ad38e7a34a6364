//! Pagination types
//!
//! The fetch request, the cursor carried between pages, and the pure step
//! that derives the next cursor from a page.

use crate::error::Result;
use crate::http::RequestConfig;
use crate::types::{Page, PAGE_SIZE};
use tracing::warn;
use url::Url;

/// Everything needed to download one time window. Built once per run.
#[derive(Clone)]
pub struct FetchRequest {
    /// Listing endpoint for the initial query
    pub endpoint: Url,
    /// Inclusive start, ISO-8601, sent verbatim
    pub begin: String,
    /// Exclusive end, ISO-8601, sent verbatim
    pub end: String,
    /// Records requested per page
    pub page_size: u32,
    /// Bearer token
    pub token: String,
}

impl FetchRequest {
    /// Create a request with the default page size
    pub fn new(
        endpoint: Url,
        begin: impl Into<String>,
        end: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            endpoint,
            begin: begin.into(),
            end: end.into(),
            page_size: PAGE_SIZE,
            token: token.into(),
        }
    }

    /// Override the page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Filter expression selecting records whose `date_stop` is in the window
    pub fn filter(&self) -> String {
        format!(
            "date_stop ge {} and date_stop lt {}",
            self.begin, self.end
        )
    }

    /// Query parameters of the first request
    pub fn initial_query(&self) -> RequestConfig {
        RequestConfig::new()
            .query("filter", self.filter())
            .query("limit", self.page_size.to_string())
            .query("order", "date_stop asc")
    }
}

impl std::fmt::Debug for FetchRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchRequest")
            .field("endpoint", &self.endpoint.as_str())
            .field("begin", &self.begin)
            .field("end", &self.end)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

/// Where the next request goes
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Cursor {
    /// Nothing fetched yet: send the filtered query to the endpoint
    #[default]
    Initial,
    /// Server-supplied continuation URL, requested as-is
    Next(Url),
    /// No more pages
    Done,
}

impl Cursor {
    /// Check if pagination is complete
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// URL and query parameters for the request this cursor points at.
    ///
    /// Continuation URLs already carry filter, limit and order, so nothing is
    /// added to them.
    pub fn request(&self, fetch: &FetchRequest) -> Option<(Url, RequestConfig)> {
        match self {
            Self::Initial => Some((fetch.endpoint.clone(), fetch.initial_query())),
            Self::Next(url) => Some((url.clone(), RequestConfig::new())),
            Self::Done => None,
        }
    }

    /// Cursor following `page`.
    ///
    /// An empty or short page is the last one. A full page with no `next`
    /// also ends pagination rather than starting over from the initial query.
    pub fn after(page: &Page, fetch: &FetchRequest) -> Result<Self> {
        if page.count == 0 || page.count < u64::from(fetch.page_size) {
            return Ok(Self::Done);
        }

        match page.next_url() {
            Some(next) => Ok(Self::Next(fetch.endpoint.join(next)?)),
            None => {
                warn!(
                    count = page.count,
                    "Full page without a pagination.next link; stopping"
                );
                Ok(Self::Done)
            }
        }
    }
}
