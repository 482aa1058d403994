use crate::domain::model::{CatalogRow, JobRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Tabular backing store for the portfolio catalog.
pub trait CatalogSource: Send + Sync {
    fn load_rows(&self) -> Result<Vec<CatalogRow>>;
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
pub trait JobExtractor: Send + Sync {
    async fn extract(&self, page_text: &str) -> Result<Vec<JobRecord>>;
}

#[async_trait]
pub trait EmailDrafter: Send + Sync {
    async fn draft(&self, job: &JobRecord, portfolio_links: &[String]) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> Option<&str>;
    fn llm_endpoint(&self) -> &str;
    fn model(&self) -> &str;
    fn temperature(&self) -> f32;
    fn max_tokens(&self) -> Option<u32>;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn portfolio_path(&self) -> &str;
    fn sender(&self) -> SenderProfile;
}

/// The persona the drafted email is written as.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SenderProfile {
    pub name: String,
    pub role: String,
    pub company: String,
    pub pitch: String,
}

impl SenderProfile {
    pub fn new(name: &str, company: &str) -> Self {
        Self {
            name: name.to_string(),
            role: "business development executive".to_string(),
            company: company.to_string(),
            pitch: format!(
                "{company} is an AI & Software Consulting company dedicated to facilitating \
                 the seamless integration of business processes through automated tools. \
                 Over our experience, we have empowered numerous enterprises with tailored \
                 solutions, fostering scalability, process optimization, cost reduction, \
                 and heightened overall efficiency."
            ),
        }
    }
}

impl Default for SenderProfile {
    fn default() -> Self {
        Self::new("Mohan", "AtliQ")
    }
}
