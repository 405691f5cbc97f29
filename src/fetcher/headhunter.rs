//! HeadHunter source (api.hh.ru)
//!
//! Pages are 0-based; the first response carries `pages`, the total page
//! count, so pagination uses [`ExhaustionStrategy::CountedPages`]. Salaries
//! are estimated only for postings quoted in `RUR`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use crate::config::HeadHunterConfig;
use crate::fetcher::http::JobBoardHttpClient;
use crate::fetcher::parser::VacancyParser;
use crate::fetcher::{ExhaustionStrategy, FetcherResult, PageResult, VacancySource};
use crate::salary::predict_salary_in;
use crate::{Posting, Query};

/// Currency code HeadHunter uses for roubles
pub const HH_ACCEPTED_CURRENCY: &str = "RUR";

/// HeadHunter vacancies source
pub struct HeadHunterSource {
    http_client: JobBoardHttpClient,
    config: HeadHunterConfig,
}

impl HeadHunterSource {
    /// Create a source with its own view of the shared client
    ///
    /// # Errors
    /// Fails when the configured User-Agent is not a valid header value
    pub fn new(config: HeadHunterConfig, client: Arc<Client>) -> FetcherResult<Self> {
        let http_client = JobBoardHttpClient::new(client, config.base_url.clone())
            .with_header("user-agent", &config.user_agent)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Query parameters for one page
    pub fn page_params(&self, query: &Query, page: u32) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("text", query.text().to_string()),
            ("area", self.config.area.to_string()),
            ("per_page", self.config.per_page.to_string()),
            ("page", page.to_string()),
        ];
        if let Some(date_from) = &self.config.date_from {
            params.push(("date_from", date_from.clone()));
        }
        params
    }
}

#[async_trait]
impl VacancySource for HeadHunterSource {
    fn name(&self) -> &str {
        "HH API"
    }

    fn report_title(&self) -> String {
        self.config.report_title()
    }

    fn page_size(&self) -> u32 {
        self.config.per_page
    }

    fn exhaustion(&self) -> ExhaustionStrategy {
        ExhaustionStrategy::CountedPages
    }

    async fn fetch_page(&self, query: &Query, page: u32) -> FetcherResult<PageResult> {
        let params = self.page_params(query, page);
        let body: Value = self.http_client.get(&params).await?;
        VacancyParser::parse_headhunter_page(body)
    }

    fn estimate_salary(&self, posting: &Posting) -> Option<f64> {
        predict_salary_in(posting.salary.as_ref(), HH_ACCEPTED_CURRENCY)
    }
}
