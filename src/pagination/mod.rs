//! Pagination module
//!
//! Cursor-following fetch of the CDR listing.
//!
//! # Overview
//!
//! The first request carries the date window filter, page size and sort
//! order. Every later request goes to the `pagination.next` URL returned by
//! the server, unchanged. Fetching stops after a page shorter than the page
//! size, or at a page with no records.

mod fetcher;
mod types;

pub use fetcher::PageFetcher;
pub use types::{Cursor, FetchRequest};
