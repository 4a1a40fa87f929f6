use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ClientError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contributor {
    pub username: String,
    pub avatar: String,
    pub url: String,
}

/// One row of a trending listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repository {
    pub owner: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub stars: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub stars_today: u64,
    #[serde(default)]
    pub built_by: Vec<Contributor>,
}

impl Repository {
    /// Identity key shared by the same repository across time windows.
    pub fn key(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

/// Time window a trending listing is measured over.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Since {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl Since {
    pub const ALL: [Since; 3] = [Since::Daily, Since::Weekly, Since::Monthly];

    pub fn as_str(self) -> &'static str {
        match self {
            Since::Daily => "daily",
            Since::Weekly => "weekly",
            Since::Monthly => "monthly",
        }
    }

    /// Column heading used by the dashboard.
    pub fn label(self) -> &'static str {
        match self {
            Since::Daily => "Today",
            Since::Weekly => "This Week",
            Since::Monthly => "This Month",
        }
    }
}

impl fmt::Display for Since {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Since {
    type Err = ClientError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "daily" => Ok(Since::Daily),
            "weekly" => Ok(Since::Weekly),
            "monthly" => Ok(Since::Monthly),
            other => Err(ClientError::InvalidSince(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingResponse {
    pub repositories: Vec<Repository>,
    pub language: String,
    pub since: Since,
    #[serde(with = "time::serde::rfc3339")]
    pub last_updated: OffsetDateTime,
}

#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    pub data: T,
    pub timestamp: OffsetDateTime,
}
