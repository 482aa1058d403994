use crate::core::portfolio::Portfolio;
use crate::domain::model::GeneratedEmail;
use crate::domain::ports::{EmailDrafter, JobExtractor, PageFetcher};
use crate::utils::error::{ColdMailError, Result};
use crate::utils::text::clean_text;
use std::sync::Arc;

/// Job posting URL in, one drafted email per extracted job out.
pub struct ColdMailPipeline<F: PageFetcher, L: JobExtractor + EmailDrafter> {
    fetcher: F,
    llm: L,
    portfolio: Arc<Portfolio>,
}

impl<F: PageFetcher, L: JobExtractor + EmailDrafter> ColdMailPipeline<F, L> {
    pub fn new(fetcher: F, llm: L, portfolio: Arc<Portfolio>) -> Self {
        Self {
            fetcher,
            llm,
            portfolio,
        }
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    pub async fn run(&self, url: &str) -> Result<Vec<GeneratedEmail>> {
        tracing::info!("🌐 Loading job posting: {}", url);
        let raw = self.fetcher.fetch(url).await?;
        let page_text = clean_text(&raw);
        tracing::debug!("Cleaned page text: {} chars", page_text.len());

        tracing::info!("🔎 Extracting job details...");
        let jobs = self.llm.extract(&page_text).await?;
        if jobs.is_empty() {
            return Err(ColdMailError::NoJobsExtracted {
                url: url.to_string(),
            });
        }
        tracing::info!("🔎 Extracted {} job(s)", jobs.len());

        // One snapshot for the whole run so every job sees the same portfolio.
        let portfolio = self.portfolio.snapshot();
        let mut emails = Vec::with_capacity(jobs.len());

        for job in jobs {
            let links = portfolio.query_links(&job.skills);
            tracing::info!(
                "✉️ Drafting email for '{}' with {} portfolio link(s)",
                job.role,
                links.len()
            );
            let email = self.llm.draft(&job, &links).await?;
            emails.push(GeneratedEmail { job, links, email });
        }

        Ok(emails)
    }
}
