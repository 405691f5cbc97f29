//! Per-language pipeline orchestration
//!
//! For each language: build the query, paginate the source, reduce the
//! postings with the source's estimator. Pipelines share no state; a failed
//! language is logged and left out of the report while the others continue.

use crate::fetcher::{FailurePolicy, FetcherResult, VacancySource};
use crate::output::StatisticsReport;
use crate::statistics::calculate_statistics;
use crate::{Query, Statistics};
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use tracing::{error, info};

/// Languages reported by default, in report order
pub const DEFAULT_LANGUAGES: [&str; 9] = [
    "Python", "C", "C#", "C++", "Java", "JS", "Ruby", "Go", "1С",
];

/// Maximum number of language pipelines run at once
pub const MAX_CONCURRENCY: usize = 16;

/// Run one (source, query) pipeline
///
/// # Errors
/// Propagates the pagination error; nothing is reduced in that case.
pub async fn language_statistics(
    source: &dyn VacancySource,
    query: &Query,
    policy: FailurePolicy,
) -> FetcherResult<Statistics> {
    let outcome = source.fetch_all(query, policy).await?;

    if outcome.pages_failed > 0 {
        info!(
            "{}: '{}' reduced with {} of {} pages missing",
            source.name(),
            query,
            outcome.pages_failed,
            outcome.pages_fetched
        );
    }

    Ok(calculate_statistics(
        &outcome.postings,
        |posting| source.estimate_salary(posting),
        outcome.found,
    ))
}

/// Collect statistics for every language
///
/// Up to `concurrency` pipelines run at once (clamped to
/// 1..=[`MAX_CONCURRENCY`]); results keep the order of `languages`.
pub async fn collect_statistics(
    source: &dyn VacancySource,
    languages: &[String],
    policy: FailurePolicy,
    concurrency: usize,
) -> IndexMap<String, Statistics> {
    let concurrency = concurrency.clamp(1, MAX_CONCURRENCY);

    let results: Vec<(String, FetcherResult<Statistics>)> = stream::iter(languages)
        .map(|language| async move {
            let query = Query::for_language(language);
            let result = language_statistics(source, &query, policy).await;
            (language.clone(), result)
        })
        .buffered(concurrency)
        .collect()
        .await;

    let mut stats = IndexMap::with_capacity(results.len());
    for (language, result) in results {
        match result {
            Ok(language_stats) => {
                stats.insert(language, language_stats);
            }
            Err(e) => {
                error!("{}: statistics for {} failed: {}", source.name(), language, e);
            }
        }
    }
    stats
}

/// Build the report for one source
pub async fn run_source(
    source: &dyn VacancySource,
    languages: &[String],
    policy: FailurePolicy,
    concurrency: usize,
) -> StatisticsReport {
    info!(
        "{}: collecting statistics for {} languages",
        source.name(),
        languages.len()
    );
    let stats = collect_statistics(source, languages, policy, concurrency).await;
    StatisticsReport::new(source.report_title(), stats)
}

/// Default languages as owned labels
pub fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}
