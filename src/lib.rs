pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use adapters::{csv_source::CsvCatalogSource, http::WebPageFetcher, llm::GroqClient};
pub use crate::core::{
    catalog::{build_catalog, Catalog},
    index::{build_index, SkillIndex},
    matcher::{match_links, FALLBACK_SIZE, MATCH_CAP},
    pipeline::ColdMailPipeline,
    portfolio::{Portfolio, PortfolioSnapshot},
};
pub use domain::model::{CatalogRow, GeneratedEmail, JobRecord, PortfolioEntry};
pub use domain::ports::{ConfigProvider, SenderProfile};
pub use utils::error::{ColdMailError, Result};
