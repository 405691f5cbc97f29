//! Statistics reducer
//!
//! Reduces a completed list of postings to per-query figures. `found` is the
//! source's authoritative count and is deliberately not `postings.len()`:
//! the two diverge when pages fail in resilient mode or when a source caps
//! the number of retrievable items.

use crate::Posting;
use serde::{Deserialize, Serialize};

/// Aggregated figures for one (source, query) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Statistics {
    /// Vacancies the source reports as matching the query
    #[serde(rename = "vacancies_found")]
    pub found: u64,
    /// Postings that yielded a known salary estimate
    #[serde(rename = "vacancies_processed")]
    pub processed: u64,
    /// Floor-truncated mean of the known estimates, 0 when none are known
    #[serde(rename = "average_salary")]
    pub average: u64,
}

/// Reduce postings to statistics using a per-source estimator
///
/// Postings are visited once, in order. Non-finite estimates are treated as
/// unknown.
pub fn calculate_statistics<F>(postings: &[Posting], estimator: F, total_found: u64) -> Statistics
where
    F: Fn(&Posting) -> Option<f64>,
{
    let mut total_salary = 0.0_f64;
    let mut processed = 0_u64;

    for posting in postings {
        if let Some(salary) = estimator(posting).filter(|s| s.is_finite()) {
            total_salary += salary;
            processed += 1;
        }
    }

    let average = if processed > 0 {
        // `as` saturates, so a negative mean from malformed data clamps to 0
        (total_salary / processed as f64).floor() as u64
    } else {
        0
    };

    Statistics {
        found: total_found,
        processed,
        average,
    }
}
