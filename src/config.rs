//! Source configuration
//!
//! Configuration is an immutable value built once at startup and handed to
//! each source when it is constructed. The SuperJob credential is the only
//! required setting; everything else has a default matching Moscow
//! programming vacancies.

use crate::fetcher::ExhaustionStrategy;
use std::env;

/// HeadHunter vacancies endpoint
pub const HH_API_BASE_URL: &str = "https://api.hh.ru/vacancies";

/// SuperJob vacancies endpoint
pub const SUPERJOB_API_BASE_URL: &str = "https://api.superjob.ru/2.0/vacancies/";

/// HeadHunter area code for Moscow
pub const HH_MOSCOW_AREA_ID: u32 = 1;

/// SuperJob town code for Moscow
pub const SJ_TOWN_MOSCOW_ID: u32 = 4;

/// SuperJob catalogue "Development, programming"
pub const SJ_CATALOGUE_PROGRAMMING: u32 = 48;

/// Default postings per page for both sources
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size either API accepts
pub const MAX_PAGE_SIZE: u32 = 100;

/// User-Agent sent to HeadHunter, which rejects anonymous clients
pub const DEFAULT_USER_AGENT: &str = concat!("vacancy-stats/", env!("CARGO_PKG_VERSION"));

/// Environment variable holding the SuperJob API key
pub const SUPERJOB_API_KEY_VAR: &str = "SUPERJOB_API_KEY";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required credential is absent or blank
    #[error("missing credential: {0} is not set")]
    MissingCredential(&'static str),

    /// Setting has an unusable value
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Setting name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Load .env file (silently ignores if missing)
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// HeadHunter settings
#[derive(Debug, Clone, PartialEq)]
pub struct HeadHunterConfig {
    /// Vacancies endpoint
    pub base_url: String,
    /// Postings per page (`per_page`)
    pub per_page: u32,
    /// Region code (`area`)
    pub area: u32,
    /// Only vacancies published since this date (`date_from`, YYYY-MM-DD)
    pub date_from: Option<String>,
    /// User-Agent header value
    pub user_agent: String,
}

impl Default for HeadHunterConfig {
    fn default() -> Self {
        Self {
            base_url: HH_API_BASE_URL.to_string(),
            per_page: DEFAULT_PAGE_SIZE,
            area: HH_MOSCOW_AREA_ID,
            date_from: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl HeadHunterConfig {
    /// Report title for this region
    pub fn report_title(&self) -> String {
        if self.area == HH_MOSCOW_AREA_ID {
            "HeadHunter Moscow".to_string()
        } else {
            format!("HeadHunter area {}", self.area)
        }
    }
}

/// SuperJob settings
#[derive(Debug, Clone, PartialEq)]
pub struct SuperJobConfig {
    /// Vacancies endpoint
    pub base_url: String,
    /// API key sent as `X-Api-App-Id`
    pub api_key: String,
    /// Postings per page (`count`)
    pub count: u32,
    /// Town code (`town`)
    pub town: u32,
    /// Catalogue code (`catalogues`)
    pub catalogues: u32,
    /// Exhaustion signal to trust
    pub exhaustion: ExhaustionStrategy,
}

impl SuperJobConfig {
    /// SuperJob settings with defaults and the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: SUPERJOB_API_BASE_URL.to_string(),
            api_key: api_key.into(),
            count: DEFAULT_PAGE_SIZE,
            town: SJ_TOWN_MOSCOW_ID,
            catalogues: SJ_CATALOGUE_PROGRAMMING,
            exhaustion: ExhaustionStrategy::ContinuationFlag,
        }
    }

    /// Report title for this town
    pub fn report_title(&self) -> String {
        if self.town == SJ_TOWN_MOSCOW_ID {
            "SuperJob Moscow".to_string()
        } else {
            format!("SuperJob town {}", self.town)
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// HeadHunter settings
    pub headhunter: HeadHunterConfig,
    /// SuperJob settings, absent when no API key is configured
    pub superjob: Option<SuperJobConfig>,
}

impl AppConfig {
    /// Build config from `.env` and the process environment
    ///
    /// # Errors
    /// Fails with [`ConfigError::MissingCredential`] when `require_superjob`
    /// is set and `SUPERJOB_API_KEY` is absent or blank.
    pub fn from_env(require_superjob: bool) -> Result<Self, ConfigError> {
        load_dotenv();
        Self::from_lookup(|key| env::var(key).ok(), require_superjob)
    }

    /// Build config from an arbitrary key lookup
    ///
    /// Recognized keys: `SUPERJOB_API_KEY`, `HH_API_BASE_URL`,
    /// `SUPERJOB_API_BASE_URL`, `HH_USER_AGENT`. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F, require_superjob: bool) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut headhunter = HeadHunterConfig::default();
        if let Some(url) = get("HH_API_BASE_URL") {
            headhunter.base_url = url;
        }
        if let Some(user_agent) = get("HH_USER_AGENT") {
            headhunter.user_agent = user_agent;
        }

        let superjob = match get(SUPERJOB_API_KEY_VAR) {
            Some(key) => {
                let mut superjob = SuperJobConfig::new(key);
                if let Some(url) = get("SUPERJOB_API_BASE_URL") {
                    superjob.base_url = url;
                }
                Some(superjob)
            }
            None if require_superjob => {
                return Err(ConfigError::MissingCredential(SUPERJOB_API_KEY_VAR))
            }
            None => None,
        };

        let config = Self {
            headhunter,
            superjob,
        };
        config.validate()?;
        Ok(config)
    }

    /// SuperJob settings
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingCredential`] when no API key was configured
    pub fn superjob(&self) -> Result<&SuperJobConfig, ConfigError> {
        self.superjob
            .as_ref()
            .ok_or(ConfigError::MissingCredential(SUPERJOB_API_KEY_VAR))
    }

    /// Check page sizes against the API limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_page_size("per_page", self.headhunter.per_page)?;
        if let Some(superjob) = &self.superjob {
            validate_page_size("count", superjob.count)?;
        }
        Ok(())
    }
}

fn validate_page_size(field: &'static str, value: u32) -> Result<(), ConfigError> {
    if value == 0 || value > MAX_PAGE_SIZE {
        return Err(ConfigError::InvalidValue {
            field,
            reason: format!("{value} is outside 1..={MAX_PAGE_SIZE}"),
        });
    }
    Ok(())
}
