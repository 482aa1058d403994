pub mod catalog;
pub mod index;
pub mod matcher;
pub mod pipeline;
pub mod portfolio;

pub use crate::domain::model::{CatalogRow, GeneratedEmail, JobRecord, PortfolioEntry};
pub use crate::domain::ports::{CatalogSource, EmailDrafter, JobExtractor, PageFetcher};
pub use crate::utils::error::Result;
