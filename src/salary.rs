//! Salary estimation policy
//!
//! Turns a posting's salary bounds into a single number:
//! - both bounds: arithmetic mean
//! - only the lower bound: `from * 1.2` (posted minimums understate typical pay)
//! - only the upper bound: `to * 0.8` (posted maximums overstate typical pay)
//! - neither: unknown
//!
//! Unknown is `None`, never zero. Sources gate the policy on their reporting
//! currency with [`predict_salary_in`]; there is no currency conversion.

use crate::SalaryBounds;

/// Multiplier applied when only the lower bound is published
pub const LOWER_ONLY_FACTOR: f64 = 1.2;

/// Multiplier applied when only the upper bound is published
pub const UPPER_ONLY_FACTOR: f64 = 0.8;

/// Estimate a salary from optional bounds
pub fn predict_salary(from: Option<f64>, to: Option<f64>) -> Option<f64> {
    match (from, to) {
        (Some(from), Some(to)) => Some((from + to) / 2.0),
        (Some(from), None) => Some(from * LOWER_ONLY_FACTOR),
        (None, Some(to)) => Some(to * UPPER_ONLY_FACTOR),
        (None, None) => None,
    }
}

/// Estimate a salary only when it is quoted in `accepted_currency`
///
/// Returns `None` without looking at the bounds when the salary block is
/// absent or its currency differs from `accepted_currency` (case-sensitive).
pub fn predict_salary_in(salary: Option<&SalaryBounds>, accepted_currency: &str) -> Option<f64> {
    let salary = salary?;
    if salary.currency.as_deref() != Some(accepted_currency) {
        return None;
    }
    predict_salary(salary.from, salary.to)
}
