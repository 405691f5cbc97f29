//! SuperJob source (api.superjob.ru)
//!
//! Requests carry the API key in `X-Api-App-Id`. Every response has a `more`
//! flag and the `total` match count; the source trusts the flag by default
//! and can be configured to derive the page count from `total` instead.
//! Salaries are estimated only for postings quoted in `rub`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::sync::Arc;

use crate::config::SuperJobConfig;
use crate::fetcher::http::JobBoardHttpClient;
use crate::fetcher::parser::VacancyParser;
use crate::fetcher::{ExhaustionStrategy, FetcherResult, PageResult, VacancySource};
use crate::salary::predict_salary_in;
use crate::{Posting, Query};

/// Currency code SuperJob uses for roubles
pub const SJ_ACCEPTED_CURRENCY: &str = "rub";

/// SuperJob vacancies source
pub struct SuperJobSource {
    http_client: JobBoardHttpClient,
    config: SuperJobConfig,
}

impl SuperJobSource {
    /// Create a source with its own view of the shared client
    ///
    /// # Errors
    /// Fails when the API key is not a valid header value
    pub fn new(config: SuperJobConfig, client: Arc<Client>) -> FetcherResult<Self> {
        let http_client = JobBoardHttpClient::new(client, config.base_url.clone())
            .with_header("x-api-app-id", &config.api_key)?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Query parameters for one page
    pub fn page_params(&self, query: &Query, page: u32) -> Vec<(&'static str, String)> {
        vec![
            ("town", self.config.town.to_string()),
            ("keyword", query.text().to_string()),
            ("catalogues", self.config.catalogues.to_string()),
            ("count", self.config.count.to_string()),
            ("page", page.to_string()),
        ]
    }
}

#[async_trait]
impl VacancySource for SuperJobSource {
    fn name(&self) -> &str {
        "SuperJob API"
    }

    fn report_title(&self) -> String {
        self.config.report_title()
    }

    fn page_size(&self) -> u32 {
        self.config.count
    }

    fn exhaustion(&self) -> ExhaustionStrategy {
        self.config.exhaustion
    }

    async fn fetch_page(&self, query: &Query, page: u32) -> FetcherResult<PageResult> {
        let params = self.page_params(query, page);
        let body: Value = self.http_client.get(&params).await?;
        VacancyParser::parse_superjob_page(body)
    }

    fn estimate_salary(&self, posting: &Posting) -> Option<f64> {
        predict_salary_in(posting.salary.as_ref(), SJ_ACCEPTED_CURRENCY)
    }
}
