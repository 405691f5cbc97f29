//! Report rendering
//!
//! A [`StatisticsReport`] holds one source's label → statistics mapping in
//! caller order. Rendering is pure formatting: labels are lower-cased and
//! figures printed as-is.

use crate::fetcher::SourceKind;
use crate::Statistics;
use indexmap::IndexMap;
use serde::Serialize;

pub mod table;

pub use table::render_table;

/// Default column headers
pub const DEFAULT_HEADERS: [&str; 4] = [
    "Язык программирования",
    "Вакансий найдено",
    "Вакансий обработано",
    "Средняя зарплата",
];

/// Column headers of the HeadHunter report
pub const HEADHUNTER_HEADERS: [&str; 4] = [
    "Язык программирования",
    "Найдено вакансий",
    "Обработано вакансий",
    "Средняя зарплата",
];

/// Column headers used for a source's report
pub fn headers_for(kind: SourceKind) -> &'static [&'static str] {
    match kind {
        SourceKind::HeadHunter => &HEADHUNTER_HEADERS,
        SourceKind::SuperJob => &DEFAULT_HEADERS,
    }
}

/// Render a label → statistics mapping as a titled table
///
/// Falls back to [`DEFAULT_HEADERS`] when `headers` is empty.
pub fn render_statistics(
    stats_by_label: &IndexMap<String, Statistics>,
    title: &str,
    headers: &[&str],
) -> String {
    let headers = if headers.is_empty() {
        &DEFAULT_HEADERS[..]
    } else {
        headers
    };

    let rows: Vec<Vec<String>> = stats_by_label
        .iter()
        .map(|(label, stats)| {
            vec![
                label.to_lowercase(),
                stats.found.to_string(),
                stats.processed.to_string(),
                stats.average.to_string(),
            ]
        })
        .collect();

    render_table(Some(title), headers, &rows)
}

/// Statistics for every language of one source
#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsReport {
    /// Table title, e.g. "HeadHunter Moscow"
    pub title: String,
    /// Statistics keyed by language label, in language order
    pub stats: IndexMap<String, Statistics>,
}

#[derive(Serialize)]
struct JsonRow<'a> {
    language: String,
    #[serde(flatten)]
    stats: &'a Statistics,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    title: &'a str,
    rows: Vec<JsonRow<'a>>,
}

impl StatisticsReport {
    /// Create a report
    pub fn new(title: impl Into<String>, stats: IndexMap<String, Statistics>) -> Self {
        Self {
            title: title.into(),
            stats,
        }
    }

    /// Render with [`DEFAULT_HEADERS`]
    pub fn render_table(&self) -> String {
        render_statistics(&self.stats, &self.title, &DEFAULT_HEADERS)
    }

    /// Render with custom headers
    pub fn render_table_with_headers(&self, headers: &[&str]) -> String {
        render_statistics(&self.stats, &self.title, headers)
    }

    /// JSON document: `{"title", "rows": [{"language", "vacancies_found", ...}]}`
    pub fn to_json(&self) -> serde_json::Value {
        let report = JsonReport {
            title: &self.title,
            rows: self
                .stats
                .iter()
                .map(|(label, stats)| JsonRow {
                    language: label.to_lowercase(),
                    stats,
                })
                .collect(),
        };
        serde_json::to_value(report).unwrap_or(serde_json::Value::Null)
    }
}
