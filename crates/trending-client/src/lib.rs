pub mod cache;
pub mod html_parser;
pub mod text;
pub mod types;

use std::time::Duration as StdDuration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CONNECTION},
    Client, StatusCode,
};
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{debug, info, instrument, warn};

pub use html_parser::{extract_repositories, parse_trending_html, EntryError, Extraction};
pub use types::{CacheEntry, Contributor, Repository, Since, TrendingResponse};

pub const GITHUB_BASE_URL: &str = "https://github.com";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("invalid since parameter `{0}`; expected daily, weekly or monthly")]
    InvalidSince(String),
    #[error("HTTP request failed: {0}")]
    Http(String),
    #[error("GitHub responded with status {0}")]
    Status(StatusCode),
}

impl ClientError {
    /// Whether the caller supplied bad input, as opposed to an upstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::InvalidSince(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Origin the trending pages are fetched from and relative links resolve against.
    pub base_url: String,
    pub user_agent: String,
    /// `None` leaves the transport defaults in place.
    pub timeout: Option<StdDuration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: GITHUB_BASE_URL.to_string(),
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

/// Public listing URL for a language and time window.
pub fn trending_url(base: &str, language: &str, since: Since) -> String {
    format!(
        "{}/trending/{}?since={}",
        base.trim_end_matches('/'),
        urlencoding::encode(language),
        since
    )
}

/// Scrapes github.com trending pages.
#[derive(Debug, Clone)]
pub struct TrendingClient {
    http: Client,
    config: ClientConfig,
}

impl TrendingClient {
    pub fn with_config(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(browser_headers())
            .gzip(true)
            .brotli(true)
            .deflate(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|err| ClientError::Http(err.to_string()))?;

        Ok(Self { http, config })
    }

    pub fn new() -> Result<Self, ClientError> {
        Self::with_config(ClientConfig::default())
    }

    pub fn trending_url(&self, language: &str, since: Since) -> String {
        trending_url(&self.config.base_url, language, since)
    }

    /// Validate a raw `since` value and fetch. Invalid values fail before any request is made.
    pub async fn fetch_str(&self, language: &str, since: &str) -> Result<Vec<Repository>, ClientError> {
        let since = since.parse::<Since>()?;
        self.fetch(language, since).await
    }

    #[instrument(name = "trending_client.fetch", skip(self))]
    pub async fn fetch(&self, language: &str, since: Since) -> Result<Vec<Repository>, ClientError> {
        let url = self.trending_url(language, since);
        info!(url = %url, "scraping trending page");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|err| ClientError::Http(err.to_string()))?;
        if !response.status().is_success() {
            warn!(status = %response.status(), url = %url, "trending request failed");
            return Err(ClientError::Status(response.status()));
        }

        let html = response
            .text()
            .await
            .map_err(|err| ClientError::Http(err.to_string()))?;
        debug!(bytes = html.len(), "trending page downloaded");

        let repositories = parse_trending_html(&html, language, &self.config.base_url);
        info!(count = repositories.len(), "scraped trending repositories");
        Ok(repositories)
    }

    /// Fetch and wrap the result with its query parameters and a fresh timestamp.
    pub async fn fetch_response(
        &self,
        language: &str,
        since: Since,
    ) -> Result<TrendingResponse, ClientError> {
        let repositories = self.fetch(language, since).await?;
        Ok(TrendingResponse {
            repositories,
            language: language.to_string(),
            since,
            last_updated: OffsetDateTime::now_utc(),
        })
    }
}

fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate, br"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(
        "upgrade-insecure-requests",
        HeaderValue::from_static("1"),
    );
    headers
}
