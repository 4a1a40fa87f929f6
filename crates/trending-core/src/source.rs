use std::time::Duration as StdDuration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use trending_client::{ClientError, Repository, Since, TrendingClient};

/// Anything that can produce the repositories for one (language, window) slot.
#[async_trait]
pub trait TrendingSource: Send + Sync {
    async fn fetch(&self, language: &str, since: Since) -> Result<Vec<Repository>, SourceError>;
}

#[derive(Debug, Clone, Error)]
pub enum SourceError {
    #[error("request to trending backend failed: {0}")]
    Network(String),
    #[error("HTTP error! status: {0}")]
    Status(u16),
    #[error("failed to decode trending payload: {0}")]
    Decode(String),
    #[error(transparent)]
    Client(#[from] ClientError),
}

#[derive(Debug, Deserialize)]
struct BackendPayload {
    #[serde(default)]
    repositories: Vec<Repository>,
}

/// Calls the service's own `/api/trending` endpoint.
#[derive(Debug, Clone)]
pub struct BackendSource {
    http: Client,
    endpoint: String,
}

impl BackendSource {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<StdDuration>) -> Result<Self, SourceError> {
        let mut builder = Client::builder().user_agent(concat!(
            "trending-dashboard/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| SourceError::Network(err.to_string()))?;

        Ok(Self {
            http,
            endpoint: format!("{}/api/trending", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl TrendingSource for BackendSource {
    #[instrument(name = "backend_source.fetch", skip(self))]
    async fn fetch(&self, language: &str, since: Since) -> Result<Vec<Repository>, SourceError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("language", language), ("since", since.as_str())])
            .send()
            .await
            .map_err(|err| SourceError::Network(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "trending backend returned an error");
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: BackendPayload = response
            .json()
            .await
            .map_err(|err| SourceError::Decode(err.to_string()))?;
        debug!(count = payload.repositories.len(), "backend payload received");
        Ok(payload.repositories)
    }
}

/// Scrapes github.com in-process, skipping the HTTP hop through the backend.
#[derive(Debug, Clone)]
pub struct DirectSource {
    client: TrendingClient,
}

impl DirectSource {
    pub fn new(client: TrendingClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TrendingSource for DirectSource {
    async fn fetch(&self, language: &str, since: Since) -> Result<Vec<Repository>, SourceError> {
        Ok(self.client.fetch(language, since).await?)
    }
}
