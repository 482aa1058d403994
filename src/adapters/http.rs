use crate::domain::ports::PageFetcher;
use crate::utils::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Loads job posting pages over HTTP.
#[derive(Debug, Clone)]
pub struct WebPageFetcher {
    client: Client,
}

impl WebPageFetcher {
    pub fn new(user_agent: &str, timeout_seconds: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for WebPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?.error_for_status()?;
        tracing::debug!("Page response status: {}", response.status());
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::ColdMailError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/jobs/42")
                .header("user-agent", "cold-mail-test");
            then.status(200)
                .header("Content-Type", "text/html")
                .body("<h1>Data Analyst</h1>");
        });

        let fetcher = WebPageFetcher::new("cold-mail-test", 5).unwrap();
        let body = fetcher.fetch(&server.url("/jobs/42")).await.unwrap();

        page_mock.assert();
        assert_eq!(body, "<h1>Data Analyst</h1>");
    }

    #[tokio::test]
    async fn test_fetch_error_status() {
        let server = MockServer::start();
        let page_mock = server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(404);
        });

        let fetcher = WebPageFetcher::new(DEFAULT_USER_AGENT, 5).unwrap();
        let err = fetcher.fetch(&server.url("/gone")).await.unwrap_err();

        page_mock.assert();
        assert!(matches!(err, ColdMailError::HttpError(_)));
    }
}
