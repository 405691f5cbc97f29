//! Pagination helper shared by all sources
//!
//! Page 0 is always fetched first; it carries the total-found count and the
//! first exhaustion signal. Later pages are fetched in strictly increasing
//! order until the source's [`ExhaustionStrategy`] reports no more pages.
//! Postings are concatenated in fetch order without deduplication.
//!
//! Includes safety mechanisms:
//! - Maximum page limit to prevent endless continuation flags
//! - Explicit failure policy for pages after the first

use crate::fetcher::{FetcherError, FetcherResult, PageResult};
use crate::Posting;
use std::future::Future;
use tracing::{debug, info, warn};

/// Maximum number of pages fetched for one query
pub const MAX_PAGES: u32 = 10_000;

/// How a source signals that no pages remain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustionStrategy {
    /// First page carries the total page count; stop once the counter reaches it
    CountedPages,
    /// Every page carries a "more data available" flag; stop at the first `false`
    ContinuationFlag,
    /// Total pages is `ceil(found / page_size)` from the first page
    DerivedFromTotal,
}

/// What to do when a page after the first fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort pagination with the page error
    #[default]
    Strict,
    /// Log a warning, treat the page as empty and keep paginating
    Resilient,
}

/// Result of paginating one query
#[derive(Debug, Clone, PartialEq)]
pub struct FetchOutcome {
    /// Postings from every fetched page, in fetch order
    pub postings: Vec<Posting>,
    /// Total matches reported by the first page
    pub found: u64,
    /// Pages requested, including page 0 and failed pages
    pub pages_fetched: u32,
    /// Pages that failed and were skipped under [`FailurePolicy::Resilient`]
    pub pages_failed: u32,
}

/// Number of pages needed for `found` items at `page_size` per page
pub fn page_count(found: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    let pages = found.div_ceil(u64::from(page_size));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Pagination helper for job-board APIs
pub struct PaginationHelper;

impl PaginationHelper {
    /// Fetch all pages for a query
    ///
    /// # Arguments
    /// * `source` - Source name for log messages
    /// * `query` - Query text for log messages and errors
    /// * `page_size` - Items requested per page
    /// * `strategy` - Exhaustion signal the source provides
    /// * `policy` - Handling of failed pages after page 0
    /// * `fetch_fn` - Fetches a single page by 0-based index
    ///
    /// # Errors
    /// A failure of page 0 always propagates, since no exhaustion signal
    /// exists without it. Later failures propagate under
    /// [`FailurePolicy::Strict`]. Exceeding [`MAX_PAGES`] returns
    /// [`FetcherError::MaxPagesExceeded`].
    pub async fn paginate<F, Fut>(
        source: &str,
        query: &str,
        page_size: u32,
        strategy: ExhaustionStrategy,
        policy: FailurePolicy,
        mut fetch_fn: F,
    ) -> FetcherResult<FetchOutcome>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = FetcherResult<PageResult>>,
    {
        let first = fetch_fn(0).await?;
        let found = first.found;
        let derived_pages = page_count(found, page_size);

        let total_pages = match strategy {
            ExhaustionStrategy::CountedPages => Some(first.total_pages.unwrap_or(0)),
            ExhaustionStrategy::DerivedFromTotal => Some(derived_pages),
            ExhaustionStrategy::ContinuationFlag => None,
        };
        let mut more = first.more.unwrap_or(false);

        match total_pages {
            Some(pages) => info!("{}: '{}' has {} matches over {} pages", source, query, found, pages),
            None => info!("{}: '{}' has {} matches", source, query, found),
        }

        let mut postings = first.items;
        let mut page: u32 = 1;
        let mut pages_failed: u32 = 0;

        loop {
            let has_next = match total_pages {
                Some(pages) => page < pages,
                None => more,
            };
            if !has_next {
                break;
            }

            // Safety check: prevent endless pagination
            if page >= MAX_PAGES {
                return Err(FetcherError::MaxPagesExceeded {
                    query: query.to_string(),
                    max_pages: MAX_PAGES,
                });
            }

            debug!("{}: fetching page {} for '{}'", source, page, query);

            match fetch_fn(page).await {
                Ok(result) => {
                    debug!("Received {} postings in page {}", result.items.len(), page);
                    more = result.more.unwrap_or(false);
                    postings.extend(result.items);
                }
                Err(e) => match policy {
                    FailurePolicy::Strict => return Err(e),
                    FailurePolicy::Resilient => {
                        warn!(
                            "{}: page {} for '{}' failed, continuing without it: {}",
                            source, page, query, e
                        );
                        pages_failed += 1;
                        // A failed page carries no flag; fall back to the total
                        more = page + 1 < derived_pages;
                    }
                },
            }

            page += 1;
        }

        debug!(
            "Pagination completed after {} pages. Total postings: {}",
            page,
            postings.len()
        );

        Ok(FetchOutcome {
            postings,
            found,
            pages_fetched: page,
            pages_failed,
        })
    }
}
