//! End-to-end pipeline tests against an in-memory source

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use vacancy_stats::fetcher::{
    ExhaustionStrategy, FailurePolicy, FetcherError, FetcherResult, PageResult, VacancySource,
};
use vacancy_stats::orchestrator::{collect_statistics, language_statistics, run_source};
use vacancy_stats::salary::predict_salary_in;
use vacancy_stats::{Posting, Query, SalaryBounds, Statistics};

/// In-memory source serving fixed postings per query text
struct FakeSource {
    postings: HashMap<String, Vec<Posting>>,
    found: HashMap<String, u64>,
    failing: HashSet<String>,
    page_size: u32,
    strategy: ExhaustionStrategy,
    delays: HashMap<String, u64>,
    calls: Arc<Mutex<Vec<(String, u32)>>>,
}

impl FakeSource {
    fn new(strategy: ExhaustionStrategy) -> Self {
        Self {
            postings: HashMap::new(),
            found: HashMap::new(),
            failing: HashSet::new(),
            page_size: 100,
            strategy,
            delays: HashMap::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn with_language(mut self, language: &str, postings: Vec<Posting>, found: u64) -> Self {
        let text = Query::for_language(language).text().to_string();
        self.postings.insert(text.clone(), postings);
        self.found.insert(text, found);
        self
    }

    fn failing(mut self, language: &str) -> Self {
        self.failing
            .insert(Query::for_language(language).text().to_string());
        self
    }

    fn delayed(mut self, language: &str, millis: u64) -> Self {
        self.delays
            .insert(Query::for_language(language).text().to_string(), millis);
        self
    }

    fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl VacancySource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    fn report_title(&self) -> String {
        "Fake Moscow".to_string()
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn exhaustion(&self) -> ExhaustionStrategy {
        self.strategy
    }

    async fn fetch_page(&self, query: &Query, page: u32) -> FetcherResult<PageResult> {
        let text = query.text().to_string();
        self.calls.lock().unwrap().push((text.clone(), page));

        if let Some(millis) = self.delays.get(&text) {
            tokio::time::sleep(Duration::from_millis(*millis)).await;
        }
        if self.failing.contains(&text) {
            return Err(FetcherError::HttpError("Server error 500".to_string()));
        }

        let all = self.postings.get(&text).cloned().unwrap_or_default();
        let found = self.found.get(&text).copied().unwrap_or(0);
        let size = self.page_size as usize;
        let start = page as usize * size;
        let items: Vec<Posting> = all.into_iter().skip(start).take(size).collect();
        let end = (start + size) as u64;

        Ok(PageResult {
            items,
            found,
            total_pages: Some(found.div_ceil(u64::from(self.page_size)) as u32),
            more: Some(end < found),
        })
    }

    fn estimate_salary(&self, posting: &Posting) -> Option<f64> {
        predict_salary_in(posting.salary.as_ref(), "RUR")
    }
}

fn rur(from: Option<f64>, to: Option<f64>) -> Option<SalaryBounds> {
    Some(SalaryBounds::new(from, to, "RUR"))
}

fn languages(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|l| l.to_string()).collect()
}

#[tokio::test]
async fn test_mixed_postings() {
    let postings = vec![
        Posting::new("a", rur(Some(100.0), Some(200.0))),
        Posting::new("b", rur(Some(300.0), None)),
        Posting::new("c", Some(SalaryBounds::new(Some(100.0), None, "USD"))),
    ];
    let source = FakeSource::new(ExhaustionStrategy::CountedPages).with_language("Python", postings, 5);

    let stats = language_statistics(
        &source,
        &Query::for_language("Python"),
        FailurePolicy::Strict,
    )
    .await
    .unwrap();

    assert_eq!(
        stats,
        Statistics {
            found: 5,
            processed: 2,
            average: 255,
        }
    );
}

#[tokio::test]
async fn test_no_postings() {
    let source = FakeSource::new(ExhaustionStrategy::ContinuationFlag).with_language("Go", Vec::new(), 0);

    let stats = language_statistics(&source, &Query::for_language("Go"), FailurePolicy::Strict)
        .await
        .unwrap();

    assert_eq!(stats, Statistics::default());
    assert_eq!(source.calls().len(), 1, "Only page 0 is requested");
}

#[tokio::test]
async fn test_postings_without_salary() {
    let postings = vec![Posting::new("a", None), Posting::new("b", None)];
    let source = FakeSource::new(ExhaustionStrategy::CountedPages).with_language("Ruby", postings, 2);

    let stats = language_statistics(&source, &Query::for_language("Ruby"), FailurePolicy::Strict)
        .await
        .unwrap();

    assert_eq!(stats.found, 2);
    assert_eq!(stats.processed, 0);
    assert_eq!(stats.average, 0);
}

#[tokio::test]
async fn test_three_pages_each_strategy() {
    for strategy in [
        ExhaustionStrategy::CountedPages,
        ExhaustionStrategy::ContinuationFlag,
        ExhaustionStrategy::DerivedFromTotal,
    ] {
        let postings: Vec<Posting> = (0..250)
            .map(|i| Posting::new(format!("p{i}"), rur(Some(1000.0), Some(1000.0))))
            .collect();
        let source = FakeSource::new(strategy).with_language("Java", postings, 250);

        let stats = language_statistics(&source, &Query::for_language("Java"), FailurePolicy::Strict)
            .await
            .unwrap();

        let pages: Vec<u32> = source.calls().into_iter().map(|(_, page)| page).collect();
        assert_eq!(pages, vec![0, 1, 2], "{strategy:?}");
        assert_eq!(stats.found, 250);
        assert_eq!(stats.processed, 250);
        assert_eq!(stats.average, 1000);
    }
}

#[tokio::test]
async fn test_failed_language_left_out() {
    let source = FakeSource::new(ExhaustionStrategy::CountedPages)
        .with_language("Python", vec![Posting::new("a", rur(Some(100.0), None))], 1)
        .failing("C")
        .with_language("Go", Vec::new(), 0);

    let stats = collect_statistics(
        &source,
        &languages(&["Python", "C", "Go"]),
        FailurePolicy::Strict,
        1,
    )
    .await;

    let labels: Vec<&str> = stats.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["Python", "Go"]);
    assert_eq!(stats["Python"].average, 120);
}

#[tokio::test]
async fn test_concurrent_pipelines_keep_language_order() {
    let source = FakeSource::new(ExhaustionStrategy::CountedPages)
        .with_language("Python", Vec::new(), 0)
        .with_language("C", vec![Posting::new("a", rur(None, Some(100.0)))], 1)
        .with_language("Go", Vec::new(), 0)
        .delayed("Python", 50);

    let stats = collect_statistics(
        &source,
        &languages(&["Python", "C", "Go"]),
        FailurePolicy::Strict,
        4,
    )
    .await;

    let labels: Vec<&str> = stats.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["Python", "C", "Go"]);
    assert_eq!(stats["C"].average, 80);
}

#[tokio::test]
async fn test_run_source_report() {
    let source = FakeSource::new(ExhaustionStrategy::CountedPages).with_language(
        "C#",
        vec![Posting::new("a", rur(Some(100.0), Some(200.0)))],
        1,
    );

    let report = run_source(&source, &languages(&["C#"]), FailurePolicy::Strict, 1).await;

    assert_eq!(report.title, "Fake Moscow");
    assert_eq!(report.stats.len(), 1);
    let table = report.render_table();
    assert!(table.contains("Fake Moscow"));
    assert!(table.contains("c#"));
    assert!(table.contains("150"));
}

#[tokio::test]
async fn test_every_language_fails() {
    let source = FakeSource::new(ExhaustionStrategy::CountedPages)
        .failing("Python")
        .failing("Go");

    let report = run_source(
        &source,
        &languages(&["Python", "Go"]),
        FailurePolicy::Resilient,
        2,
    )
    .await;

    assert!(report.stats.is_empty());
}
