use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use time::Duration;
use tracing::info;
use trending_client::{ClientConfig, TrendingClient};

pub mod cache;
pub mod dashboard;
pub mod languages;
pub mod services;
pub mod source;
pub mod state;

pub use cache::{CacheKey, TrendingCache, DEFAULT_TTL};
pub use dashboard::{Dashboard, DashboardSnapshot, LanguageView};
pub use source::{BackendSource, DirectSource, SourceError, TrendingSource};
pub use state::{LanguageData, WindowSlot};

pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:3000";

/// Where the dashboard gets its data from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceMode {
    /// Go through the service's `/api/trending` endpoint at `url`.
    Backend {
        url: String,
        /// `None` leaves the transport defaults in place.
        timeout: Option<StdDuration>,
    },
    /// Scrape the trending site in-process.
    Direct(ClientConfig),
}

impl Default for SourceMode {
    fn default() -> Self {
        SourceMode::Backend {
            url: DEFAULT_BACKEND_URL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub source: SourceMode,
    /// Freshness window of the client cache.
    pub cache_ttl: Duration,
    pub languages: Vec<String>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: SourceMode::default(),
            cache_ttl: DEFAULT_TTL,
            languages: languages::DEFAULT_LANGUAGES
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// A dashboard over whichever source the configuration names.
pub type BoxedDashboard = Dashboard<Box<dyn TrendingSource>>;

#[async_trait::async_trait]
impl TrendingSource for Box<dyn TrendingSource> {
    async fn fetch(
        &self,
        language: &str,
        since: trending_client::Since,
    ) -> Result<Vec<trending_client::Repository>, SourceError> {
        self.as_ref().fetch(language, since).await
    }
}

/// Build the dashboard and kick off loading of the configured languages.
pub async fn bootstrap(config: DashboardConfig) -> Result<BoxedDashboard> {
    let source: Box<dyn TrendingSource> = match &config.source {
        SourceMode::Backend { url, timeout } => Box::new(
            BackendSource::with_timeout(url, *timeout)
                .context("failed to build trending backend client")?,
        ),
        SourceMode::Direct(client_config) => Box::new(DirectSource::new(
            TrendingClient::with_config(client_config.clone())
                .context("failed to build trending scraper")?,
        )),
    };

    info!(
        target: "trending_core",
        source = ?config.source,
        cache_ttl = %config.cache_ttl,
        languages = ?config.languages,
        "Dashboard starting"
    );

    let dashboard = Dashboard::new(TrendingCache::with_ttl(source, config.cache_ttl));
    dashboard.select_languages(config.languages.clone()).await;
    Ok(dashboard)
}
