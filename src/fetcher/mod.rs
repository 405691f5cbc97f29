//! Job-board sources
//!
//! Each source implements [`VacancySource`]: a single-page fetch plus a
//! salary estimator. The shared [`pagination::PaginationHelper`] loop turns
//! the page fetch into a complete result set, so a new source only supplies
//! those two operations and its exhaustion strategy.

use crate::config::{AppConfig, ConfigError};
use crate::{Posting, Query};
use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;

pub mod headhunter;
pub mod http;
pub mod pagination;
pub mod parser;
pub mod superjob;

pub use headhunter::HeadHunterSource;
pub use pagination::{ExhaustionStrategy, FailurePolicy, FetchOutcome, PaginationHelper};
pub use superjob::SuperJobSource;

/// Fetcher errors
///
/// Every variant is a transport-level failure of a single page fetch (or of
/// the pagination loop around it). Missing optional data never becomes an error.
#[derive(Debug, thiserror::Error)]
pub enum FetcherError {
    /// HTTP status error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Network error
    #[error("network error: {0}")]
    NetworkError(String),

    /// Response parse error
    #[error("parse error: {0}")]
    ParseError(String),

    /// Request could not be built
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Source kept reporting more pages beyond the safety cap
    #[error("more than {max_pages} pages reported for '{query}'")]
    MaxPagesExceeded {
        /// Query being paginated
        query: String,
        /// Cap that was hit
        max_pages: u32,
    },
}

/// Result type for fetcher operations
pub type FetcherResult<T> = Result<T, FetcherError>;

/// One page fetched from a source
///
/// Pagination metadata a source does not provide stays `None`; the
/// exhaustion strategy decides which field it reads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    /// Postings on this page, in source order
    pub items: Vec<Posting>,
    /// Total matches reported by the source
    pub found: u64,
    /// Total number of pages, for counted-pages sources
    pub total_pages: Option<u32>,
    /// Whether more data is available, for continuation-flag sources
    pub more: Option<bool>,
}

/// A job-board data source
#[async_trait]
pub trait VacancySource: Send + Sync {
    /// Short source name used in logs
    fn name(&self) -> &str;

    /// Title for this source's report table
    fn report_title(&self) -> String;

    /// Number of postings requested per page
    fn page_size(&self) -> u32;

    /// How this source signals that no pages remain
    fn exhaustion(&self) -> ExhaustionStrategy;

    /// Fetch a single page (0-based)
    async fn fetch_page(&self, query: &Query, page: u32) -> FetcherResult<PageResult>;

    /// Estimate a posting's salary in this source's reporting currency
    fn estimate_salary(&self, posting: &Posting) -> Option<f64>;

    /// Fetch every page for `query`
    async fn fetch_all(&self, query: &Query, policy: FailurePolicy) -> FetcherResult<FetchOutcome> {
        PaginationHelper::paginate(
            self.name(),
            query.text(),
            self.page_size(),
            self.exhaustion(),
            policy,
            |page| self.fetch_page(query, page),
        )
        .await
    }
}

/// Supported sources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// api.hh.ru
    HeadHunter,
    /// api.superjob.ru
    SuperJob,
}

impl SourceKind {
    /// All sources in report order
    pub const ALL: [SourceKind; 2] = [SourceKind::HeadHunter, SourceKind::SuperJob];
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceKind::HeadHunter => f.write_str("hh"),
            SourceKind::SuperJob => f.write_str("superjob"),
        }
    }
}

impl FromStr for SourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hh" | "headhunter" => Ok(SourceKind::HeadHunter),
            "sj" | "superjob" => Ok(SourceKind::SuperJob),
            _ => Err(format!("Invalid source: {s}. Valid options: hh, superjob")),
        }
    }
}

/// Errors building a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Configuration missing or invalid for the requested source
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client could not be built
    #[error(transparent)]
    Fetcher(#[from] FetcherError),
}

/// Create a source from the application configuration
///
/// Each source gets its own pooled HTTP client.
///
/// # Errors
/// Returns [`ConfigError::MissingCredential`] when SuperJob is requested
/// without an API key.
pub fn create_source(
    kind: SourceKind,
    config: &AppConfig,
) -> Result<Box<dyn VacancySource>, SourceError> {
    let client = http::pooled_client()?;
    match kind {
        SourceKind::HeadHunter => Ok(Box::new(HeadHunterSource::new(
            config.headhunter.clone(),
            client,
        )?)),
        SourceKind::SuperJob => {
            let superjob = config.superjob()?;
            Ok(Box::new(SuperJobSource::new(superjob.clone(), client)?))
        }
    }
}
