//! Job-board response parser
//!
//! Stateless conversion of raw JSON pages into [`PageResult`]s. Wire shapes
//! are typed here, at the boundary, so the rest of the crate never looks up
//! optional keys. Absent optional fields become `None`/empty/zero; only a
//! structurally wrong body is an error.

use crate::fetcher::{FetcherError, FetcherResult, PageResult};
use crate::{Posting, SalaryBounds};
use serde::Deserialize;
use serde_json::Value;

/// HeadHunter `/vacancies` response
#[derive(Debug, Deserialize)]
struct HhPage {
    #[serde(default)]
    items: Vec<HhVacancy>,
    #[serde(default)]
    found: u64,
    #[serde(default)]
    pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct HhVacancy {
    #[serde(default)]
    name: String,
    #[serde(default)]
    salary: Option<HhSalary>,
}

#[derive(Debug, Deserialize)]
struct HhSalary {
    #[serde(default)]
    from: Option<f64>,
    #[serde(default)]
    to: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
}

/// SuperJob `/2.0/vacancies/` response
#[derive(Debug, Deserialize)]
struct SjPage {
    #[serde(default)]
    objects: Vec<SjVacancy>,
    #[serde(default)]
    total: u64,
    #[serde(default)]
    more: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct SjVacancy {
    #[serde(default)]
    profession: String,
    #[serde(default)]
    payment_from: Option<f64>,
    #[serde(default)]
    payment_to: Option<f64>,
    #[serde(default)]
    currency: Option<String>,
}

/// Stateless parser for job-board API responses
pub struct VacancyParser;

impl VacancyParser {
    /// Parse a HeadHunter vacancies page
    ///
    /// # Format
    /// `{"items": [{"name", "salary": {"from", "to", "currency"} | null}], "found", "pages", ...}`
    ///
    /// # Errors
    /// Returns FetcherError::ParseError if the body does not match the format
    pub fn parse_headhunter_page(body: Value) -> FetcherResult<PageResult> {
        let page: HhPage = serde_json::from_value(body)
            .map_err(|e| FetcherError::ParseError(format!("Invalid HeadHunter page: {e}")))?;

        let items = page
            .items
            .into_iter()
            .map(|vacancy| {
                let salary = vacancy.salary.map(|salary| SalaryBounds {
                    from: salary.from,
                    to: salary.to,
                    currency: salary.currency,
                });
                Posting::new(vacancy.name, salary)
            })
            .collect();

        Ok(PageResult {
            items,
            found: page.found,
            total_pages: page.pages,
            more: None,
        })
    }

    /// Parse a SuperJob vacancies page
    ///
    /// Bounds are passed through as posted, `0` included. The salary block
    /// is kept whenever a currency or a bound is present.
    ///
    /// # Format
    /// `{"objects": [{"profession", "payment_from", "payment_to", "currency"}], "total", "more"}`
    ///
    /// # Errors
    /// Returns FetcherError::ParseError if the body does not match the format
    pub fn parse_superjob_page(body: Value) -> FetcherResult<PageResult> {
        let page: SjPage = serde_json::from_value(body)
            .map_err(|e| FetcherError::ParseError(format!("Invalid SuperJob page: {e}")))?;

        let items = page
            .objects
            .into_iter()
            .map(|vacancy| {
                let from = vacancy.payment_from;
                let to = vacancy.payment_to;
                let salary = if vacancy.currency.is_some() || from.is_some() || to.is_some() {
                    Some(SalaryBounds {
                        from,
                        to,
                        currency: vacancy.currency,
                    })
                } else {
                    None
                };
                Posting::new(vacancy.profession, salary)
            })
            .collect();

        Ok(PageResult {
            items,
            found: page.total,
            total_pages: None,
            more: page.more,
        })
    }
}
