//! Report command implementation

use crate::config::{AppConfig, MAX_PAGE_SIZE};
use crate::fetcher::{create_source, ExhaustionStrategy, FailurePolicy, SourceKind};
use crate::orchestrator::{default_languages, run_source, MAX_CONCURRENCY};
use crate::output::{headers_for, StatisticsReport};
use chrono::NaiveDate;
use clap::Parser;
use std::str::FromStr;
use tracing::{info, warn};

use super::CliError;

/// Parse and validate concurrency value
fn parse_concurrency(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if value == 0 {
        return Err("concurrency must be at least 1".to_string());
    }
    if value > MAX_CONCURRENCY {
        return Err(format!(
            "concurrency {value} exceeds maximum of {MAX_CONCURRENCY}"
        ));
    }
    Ok(value)
}

/// Parse a YYYY-MM-DD date, keeping the canonical string form
fn parse_date(s: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|e| format!("Invalid date '{s}': {e}. Expected YYYY-MM-DD"))
}

/// Parse the SuperJob exhaustion signal
fn parse_exhaustion(s: &str) -> Result<ExhaustionStrategy, String> {
    match s.to_lowercase().as_str() {
        "flag" | "more" => Ok(ExhaustionStrategy::ContinuationFlag),
        "total" => Ok(ExhaustionStrategy::DerivedFromTotal),
        _ => Err(format!("Invalid exhaustion signal: {s}. Valid options: flag, total")),
    }
}

/// Which sources to report on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSelection {
    /// HeadHunter only
    HeadHunter,
    /// SuperJob only
    SuperJob,
    /// Both sources, HeadHunter first
    All,
}

impl SourceSelection {
    /// Selected sources in report order
    pub fn kinds(&self) -> Vec<SourceKind> {
        match self {
            SourceSelection::HeadHunter => vec![SourceKind::HeadHunter],
            SourceSelection::SuperJob => vec![SourceKind::SuperJob],
            SourceSelection::All => SourceKind::ALL.to_vec(),
        }
    }

    /// Whether `kind` is selected
    pub fn includes(&self, kind: SourceKind) -> bool {
        self.kinds().contains(&kind)
    }
}

impl FromStr for SourceSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(SourceSelection::All);
        }
        match s.parse::<SourceKind>()? {
            SourceKind::HeadHunter => Ok(SourceSelection::HeadHunter),
            SourceKind::SuperJob => Ok(SourceSelection::SuperJob),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output, one document per source
    Json,
    /// ASCII tables
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!("Invalid output format: {s}")),
        }
    }
}

/// Vacancy statistics CLI
#[derive(Parser, Debug)]
#[command(name = "vacancy-stats")]
#[command(about = "Vacancy counts and average salaries per programming language", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Sources to query: hh, superjob or all
    #[arg(long, default_value = "all")]
    pub source: SourceSelection,

    /// Comma-separated languages (default: Python,C,C#,C++,Java,JS,Ruby,Go,1С)
    #[arg(long, value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Skip pages that fail to load instead of dropping the whole language
    ///
    /// Counts of processed vacancies may then be incomplete; every skipped
    /// page is logged as a warning.
    #[arg(long, default_value_t = false)]
    pub resilient: bool,

    /// Number of languages fetched at once (default: 1, max: 16)
    #[arg(long, default_value = "1", value_parser = parse_concurrency)]
    pub concurrency: usize,

    /// Output format (json or human)
    #[arg(long, default_value = "human")]
    pub output_format: OutputFormat,

    /// Postings per page for both sources (1-100)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_PAGE_SIZE)))]
    pub page_size: Option<u32>,

    /// HeadHunter area code (default: 1, Moscow)
    #[arg(long)]
    pub hh_area: Option<u32>,

    /// Only HeadHunter vacancies published since this date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    pub hh_date_from: Option<String>,

    /// SuperJob town code (default: 4, Moscow)
    #[arg(long)]
    pub sj_town: Option<u32>,

    /// SuperJob catalogue code (default: 48, programming)
    #[arg(long)]
    pub sj_catalogues: Option<u32>,

    /// SuperJob exhaustion signal: flag (`more`) or total (page count from `total`)
    #[arg(long, value_parser = parse_exhaustion)]
    pub sj_exhaustion: Option<ExhaustionStrategy>,
}

impl Cli {
    /// Languages to report, falling back to the defaults
    pub fn languages(&self) -> Vec<String> {
        let languages: Vec<String> = self
            .languages
            .iter()
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();
        if languages.is_empty() {
            default_languages()
        } else {
            languages
        }
    }

    /// Pagination failure policy
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.resilient {
            FailurePolicy::Resilient
        } else {
            FailurePolicy::Strict
        }
    }

    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        let hh = &mut config.headhunter;
        if let Some(area) = self.hh_area {
            hh.area = area;
        }
        if let Some(date_from) = &self.hh_date_from {
            hh.date_from = Some(date_from.clone());
        }
        if let Some(page_size) = self.page_size {
            hh.per_page = page_size;
        }

        if let Some(sj) = config.superjob.as_mut() {
            if let Some(town) = self.sj_town {
                sj.town = town;
            }
            if let Some(catalogues) = self.sj_catalogues {
                sj.catalogues = catalogues;
            }
            if let Some(exhaustion) = self.sj_exhaustion {
                sj.exhaustion = exhaustion;
            }
            if let Some(page_size) = self.page_size {
                sj.count = page_size;
            }
        }
    }

    /// Load configuration from the environment and apply overrides
    ///
    /// # Errors
    /// Fails before any network access when a selected source lacks its credential
    pub fn build_config(&self) -> Result<AppConfig, CliError> {
        let mut config = AppConfig::from_env(self.source.includes(SourceKind::SuperJob))?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Execute the report command
    pub async fn execute(&self) -> Result<(), CliError> {
        let config = self.build_config()?;
        let languages = self.languages();
        let policy = self.failure_policy();

        if policy == FailurePolicy::Resilient {
            warn!("Resilient mode: failed pages are skipped and counts may be incomplete");
        }

        // Build every source up front so configuration problems abort before any fetch
        let sources = self
            .source
            .kinds()
            .into_iter()
            .map(|kind| create_source(kind, &config).map(|source| (kind, source)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut reports = Vec::with_capacity(sources.len());
        for (kind, source) in &sources {
            let report = run_source(source.as_ref(), &languages, policy, self.concurrency).await;
            info!(
                "{}: {} of {} languages reported",
                source.name(),
                report.stats.len(),
                languages.len()
            );
            reports.push((*kind, report));
        }

        self.print_reports(&reports)
    }

    fn print_reports(&self, reports: &[(SourceKind, StatisticsReport)]) -> Result<(), CliError> {
        match self.output_format {
            OutputFormat::Json => {
                for (_, report) in reports {
                    let line = serde_json::to_string(&report.to_json())
                        .map_err(|e| CliError::OutputError(e.to_string()))?;
                    println!("{line}");
                }
            }
            OutputFormat::Human => {
                for (kind, report) in reports {
                    println!("{}\n", report.render_table_with_headers(headers_for(*kind)));
                }
            }
        }
        Ok(())
    }
}
