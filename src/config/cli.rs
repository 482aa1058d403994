use super::{DEFAULT_PORTFOLIO_PATH, DEFAULT_TIMEOUT_SECONDS};
use crate::adapters::http::DEFAULT_USER_AGENT;
use crate::adapters::llm::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::domain::ports::{ConfigProvider, SenderProfile};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cold-mail")]
#[command(about = "Draft a cold outreach email for a job posting, citing matching portfolio projects")]
pub struct CliConfig {
    /// Job posting URL
    #[arg(short, long)]
    pub url: String,

    /// Portfolio CSV (project, url, skills columns)
    #[arg(long, default_value = DEFAULT_PORTFOLIO_PATH)]
    pub portfolio: String,

    /// TOML configuration file; replaces the LLM, scraper, portfolio and sender flags
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, env = "GROQ_API_KEY", hide_env_values = true)]
    pub groq_api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_MODEL)]
    pub model: String,

    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    pub llm_endpoint: String,

    #[arg(long, default_value_t = 0.0)]
    pub temperature: f32,

    #[arg(long)]
    pub max_tokens: Option<u32>,

    #[arg(long, env = "USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, default_value = "Mohan")]
    pub sender_name: String,

    #[arg(long, default_value = "AtliQ")]
    pub company: String,

    /// Print the extracted job details before each email
    #[arg(long)]
    pub show_job: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn api_key(&self) -> Option<&str> {
        self.groq_api_key.as_deref()
    }

    fn llm_endpoint(&self) -> &str {
        &self.llm_endpoint
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn max_tokens(&self) -> Option<u32> {
        self.max_tokens
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn portfolio_path(&self) -> &str {
        &self.portfolio
    }

    fn sender(&self) -> SenderProfile {
        SenderProfile::new(&self.sender_name, &self.company)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("url", &self.url)?;
        validation::validate_url("llm_endpoint", &self.llm_endpoint)?;
        validation::validate_path("portfolio", &self.portfolio)?;
        validation::validate_range("temperature", self.temperature, 0.0, 2.0)?;
        validation::validate_positive_number("timeout_seconds", self.timeout_seconds, 1)?;
        validation::validate_non_empty_string("model", &self.model)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        validation::validate_non_empty_string("sender_name", &self.sender_name)?;
        Ok(())
    }
}
