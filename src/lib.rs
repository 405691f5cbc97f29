//! # Vacancy Stats Library
//!
//! Aggregates vacancy counts and salary estimates for programming languages
//! from two job-search APIs with differently shaped pagination.
//!
//! ## Features
//!
//! - **Two Sources**: HeadHunter (`api.hh.ru`) and SuperJob (`api.superjob.ru`)
//! - **Exhaustive Pagination**: one loop driven by a per-source exhaustion strategy
//!   (explicit page count, continuation flag, or a ceiling derived from the total)
//! - **Salary Estimation**: bound-based policy gated by the source's reporting currency
//! - **Statistics**: vacancies found, vacancies priced, floor-truncated average salary
//! - **Reports**: ASCII tables or JSON documents, one per source
//!
//! ## Quick Start
//!
//! ```no_run
//! use vacancy_stats::config::AppConfig;
//! use vacancy_stats::fetcher::{create_source, FailurePolicy, SourceKind};
//! use vacancy_stats::orchestrator::run_source;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env(false)?;
//! let source = create_source(SourceKind::HeadHunter, &config)?;
//!
//! let languages = vec!["Python".to_string(), "Go".to_string()];
//! let report = run_source(source.as_ref(), &languages, FailurePolicy::Strict, 1).await;
//! println!("{}", report.render_table());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`config`] - Immutable per-source configuration loaded from the environment
//! - [`fetcher`] - Source trait, HTTP client, wire parsing and the pagination loop
//! - [`salary`] - Salary estimation policy
//! - [`statistics`] - Per-query statistics reducer
//! - [`output`] - Report rendering (tables and JSON)
//! - [`orchestrator`] - Drives one pipeline per language per source
//! - [`cli`] - Command line interface

#![warn(missing_docs)]
#![warn(clippy::all)]

use serde::{Deserialize, Serialize};
use std::fmt;

/// CLI command implementation
pub mod cli;

/// Configuration loading and validation
pub mod config;

/// Job-board sources and pagination
pub mod fetcher;

/// Per-language pipeline orchestration
pub mod orchestrator;

/// Report rendering
pub mod output;

/// Salary estimation policy
pub mod salary;

/// Statistics reducer
pub mod statistics;

// Re-export commonly used types
pub use config::AppConfig;
pub use statistics::Statistics;

/// Salary sub-structure of a posting
///
/// Every field is optional: sources omit bounds freely and may not tag a currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SalaryBounds {
    /// Posted lower bound
    pub from: Option<f64>,
    /// Posted upper bound
    pub to: Option<f64>,
    /// Source-specific currency code (e.g. "RUR", "rub", "USD")
    pub currency: Option<String>,
}

impl SalaryBounds {
    /// Create salary bounds
    pub fn new(from: Option<f64>, to: Option<f64>, currency: impl Into<String>) -> Self {
        Self {
            from,
            to,
            currency: Some(currency.into()),
        }
    }
}

/// One job listing returned by a source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Display name of the vacancy
    pub name: String,
    /// Salary information, absent when the source publishes none
    pub salary: Option<SalaryBounds>,
}

impl Posting {
    /// Create a posting
    pub fn new(name: impl Into<String>, salary: Option<SalaryBounds>) -> Self {
        Self {
            name: name.into(),
            salary,
        }
    }
}

/// Search query for one programming language
///
/// Construction is total: every language string yields a query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    language: String,
    text: String,
}

impl Query {
    /// Fixed phrase the language name is appended to
    pub const TEMPLATE_PREFIX: &'static str = "Программист";

    /// Build the search phrase for a language
    pub fn for_language(language: &str) -> Self {
        Self {
            language: language.to_string(),
            text: format!("{} {}", Self::TEMPLATE_PREFIX, language),
        }
    }

    /// Language the query was built from (used as the report label)
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Full search phrase sent to the source
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
