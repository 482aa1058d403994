use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::config::{DEFAULT_PORTFOLIO_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::domain::ports::{ConfigProvider, SenderProfile};
use crate::utils::error::{ColdMailError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
    #[serde(default)]
    pub portfolio: PortfolioConfig,
    #[serde(default)]
    pub sender: Option<SenderProfile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScraperConfig {
    pub user_agent: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioConfig {
    pub path: Option<String>,
}

impl TomlConfig {
    /// Reads and parses a TOML config file, substituting `${VAR}` placeholders first.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ColdMailError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ColdMailError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> String {
        ENV_PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("llm.endpoint", self.llm_endpoint())?;
        validation::validate_path("portfolio.path", self.portfolio_path())?;
        validation::validate_range("llm.temperature", self.temperature(), 0.0, 2.0)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds(), 1)?;
        validation::validate_non_empty_string("llm.model", self.model())?;
        validation::validate_non_empty_string("scraper.user_agent", self.user_agent())?;
        if let Some(sender) = &self.sender {
            validation::validate_non_empty_string("sender.name", &sender.name)?;
            validation::validate_non_empty_string("sender.company", &sender.company)?;
        }
        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    /// Unresolved `${VAR}` placeholders count as missing.
    fn api_key(&self) -> Option<&str> {
        self.llm
            .api_key
            .as_deref()
            .filter(|key| !ENV_PLACEHOLDER.is_match(key))
    }

    fn llm_endpoint(&self) -> &str {
        self.llm.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT)
    }

    fn model(&self) -> &str {
        self.llm.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    fn temperature(&self) -> f32 {
        self.llm.temperature.unwrap_or(0.0)
    }

    fn max_tokens(&self) -> Option<u32> {
        self.llm.max_tokens
    }

    fn user_agent(&self) -> &str {
        self.scraper.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn timeout_seconds(&self) -> u64 {
        self.llm
            .timeout_seconds
            .or(self.scraper.timeout_seconds)
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn portfolio_path(&self) -> &str {
        self.portfolio.path.as_deref().unwrap_or(DEFAULT_PORTFOLIO_PATH)
    }

    fn sender(&self) -> SenderProfile {
        self.sender.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
