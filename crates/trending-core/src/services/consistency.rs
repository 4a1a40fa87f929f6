//! Cross-window consistency: how many of the daily, weekly and monthly
//! listings a repository shows up in.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use trending_client::Repository;

use crate::state::LanguageData;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsistencyTier {
    /// Listed in every window.
    SuperTrending,
    /// Listed in two windows.
    Trending,
    Normal,
}

impl ConsistencyTier {
    /// Badge shown next to a repository; `None` for the normal tier.
    pub fn badge(self) -> Option<&'static str> {
        match self {
            ConsistencyTier::SuperTrending => Some("Super Trending"),
            ConsistencyTier::Trending => Some("Trending"),
            ConsistencyTier::Normal => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyStats {
    pub super_trending: usize,
    pub trending: usize,
    pub normal: usize,
}

/// Count, for every `owner/name` key, the number of windows it appears in.
///
/// Membership is by key, so independently fetched copies of a repository
/// count as the same entry. Duplicates inside one window count once.
pub fn score<'a, I>(windows: I) -> HashMap<String, u8>
where
    I: IntoIterator<Item = &'a [Repository]>,
{
    let mut counts: HashMap<String, u8> = HashMap::new();
    for window in windows {
        let keys: HashSet<String> = window.iter().map(Repository::key).collect();
        for key in keys {
            *counts.entry(key).or_default() += 1;
        }
    }
    counts
}

/// Per-language scores for a whole dashboard.
pub fn score_all<'a, I>(languages: I) -> HashMap<String, HashMap<String, u8>>
where
    I: IntoIterator<Item = (&'a String, &'a LanguageData)>,
{
    languages
        .into_iter()
        .map(|(language, data)| (language.clone(), score(data.windows())))
        .collect()
}

pub fn tier(score: u8) -> ConsistencyTier {
    match score {
        3..=u8::MAX => ConsistencyTier::SuperTrending,
        2 => ConsistencyTier::Trending,
        _ => ConsistencyTier::Normal,
    }
}

/// Tally tiers across every language.
pub fn consistency_stats(scores: &HashMap<String, HashMap<String, u8>>) -> ConsistencyStats {
    scores
        .values()
        .flat_map(HashMap::values)
        .fold(ConsistencyStats::default(), |mut stats, score| {
            match tier(*score) {
                ConsistencyTier::SuperTrending => stats.super_trending += 1,
                ConsistencyTier::Trending => stats.trending += 1,
                ConsistencyTier::Normal => stats.normal += 1,
            }
            stats
        })
}
