//! Dashboard state: one slot per (language, window), filled by independent
//! fetch tasks.
//!
//! Every call to [`Dashboard::select_languages`] starts a new selection epoch.
//! Fetch tasks remember the epoch they were spawned under and drop their
//! result if the selection has moved on by the time they finish.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use serde::Serialize;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::{debug, warn};
use trending_client::{Repository, Since};

use crate::{
    cache::TrendingCache,
    services::{
        consistency_stats, filter_language_data, score_all, total_repositories,
        total_stars_today, ConsistencyStats,
    },
    source::{SourceError, TrendingSource},
    state::{LanguageData, FETCH_FAILED_MESSAGE},
};

#[derive(Debug, Default)]
struct DashboardState {
    epoch: u64,
    languages: Vec<String>,
    data: HashMap<String, LanguageData>,
}

impl DashboardState {
    fn apply(&mut self, language: &str, since: Since, result: Result<Vec<Repository>, SourceError>) {
        let Some(data) = self.data.get_mut(language) else {
            return;
        };
        let slot = data.slot_mut(since);
        match result {
            Ok(repositories) => slot.loaded(repositories),
            Err(_) => slot.failed(FETCH_FAILED_MESSAGE),
        }
    }
}

/// Per-language view handed to the renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageView {
    pub language: String,
    pub display_name: String,
    #[serde(flatten)]
    pub data: LanguageData,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub epoch: u64,
    pub search: Option<String>,
    /// Filtered by `search` when one is set.
    pub languages: Vec<LanguageView>,
    /// Computed over unfiltered data.
    pub consistency: HashMap<String, HashMap<String, u8>>,
    pub stats: ConsistencyStats,
    pub total_repositories: usize,
    pub filtered_repositories: usize,
    pub stars_today: u64,
}

pub struct Dashboard<S> {
    cache: Arc<TrendingCache<S>>,
    state: Arc<RwLock<DashboardState>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    discarded: Arc<AtomicUsize>,
}

impl<S> Dashboard<S>
where
    S: TrendingSource + 'static,
{
    pub fn new(cache: TrendingCache<S>) -> Self {
        Self {
            cache: Arc::new(cache),
            state: Arc::new(RwLock::new(DashboardState::default())),
            tasks: Mutex::new(Vec::new()),
            discarded: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn cache(&self) -> &TrendingCache<S> {
        &self.cache
    }

    /// Replace the selected languages and start loading every window for each.
    /// Repeated languages are collapsed into one.
    ///
    /// Returns the new selection epoch.
    pub async fn select_languages<I, L>(&self, languages: I) -> u64
    where
        I: IntoIterator<Item = L>,
        L: Into<String>,
    {
        let mut seen = HashSet::new();
        let languages: Vec<String> = languages
            .into_iter()
            .map(Into::into)
            .filter(|language: &String| seen.insert(language.clone()))
            .collect();

        let epoch = {
            let mut state = self.state.write().await;
            state.epoch += 1;
            state.data = languages
                .iter()
                .map(|language| (language.clone(), LanguageData::pending()))
                .collect();
            state.languages.clone_from(&languages);
            state.epoch
        };

        debug!(epoch, languages = ?languages, "language selection changed");
        for language in &languages {
            for since in Since::ALL {
                self.spawn_fetch(epoch, language.clone(), since);
            }
        }
        epoch
    }

    /// Re-run the fetch for one slot, e.g. after the user hits "retry".
    pub async fn refresh(&self, language: &str, since: Since) {
        let epoch = {
            let mut state = self.state.write().await;
            let Some(data) = state.data.get_mut(language) else {
                warn!(language, "refresh requested for a language that is not selected");
                return;
            };
            let slot = data.slot_mut(since);
            slot.loading = true;
            slot.error = None;
            state.epoch
        };
        self.spawn_fetch(epoch, language.to_string(), since);
    }

    fn spawn_fetch(&self, epoch: u64, language: String, since: Since) {
        let cache = Arc::clone(&self.cache);
        let state = Arc::clone(&self.state);
        let discarded = Arc::clone(&self.discarded);

        let handle = tokio::spawn(async move {
            let result = cache.get_or_fetch(&language, since).await;

            let mut state = state.write().await;
            if state.epoch != epoch {
                discarded.fetch_add(1, Ordering::Relaxed);
                debug!(
                    language = %language,
                    %since,
                    issued = epoch,
                    current = state.epoch,
                    "discarding result from superseded selection"
                );
                return;
            }
            state.apply(&language, since, result);
        });

        let mut tasks = self
            .tasks
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        tasks.retain(|task| !task.is_finished());
        tasks.push(handle);
    }

    /// Wait for every fetch spawned so far to finish.
    pub async fn wait_idle(&self) {
        loop {
            let pending: Vec<JoinHandle<()>> = {
                let mut tasks = self
                    .tasks
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner);
                tasks.drain(..).collect()
            };
            if pending.is_empty() {
                return;
            }
            for result in futures::future::join_all(pending).await {
                if let Err(error) = result {
                    warn!(error = %error, "fetch task ended abnormally");
                }
            }
        }
    }

    pub async fn language_data(&self, language: &str) -> Option<LanguageData> {
        self.state.read().await.data.get(language).cloned()
    }

    /// Results dropped because their selection was replaced before they landed.
    pub fn discarded_results(&self) -> usize {
        self.discarded.load(Ordering::Relaxed)
    }

    pub async fn snapshot(&self, search: Option<&str>) -> DashboardSnapshot {
        let state = self.state.read().await;
        let search = search.filter(|term| !term.trim().is_empty());

        let consistency = score_all(state.data.iter());
        let stats = consistency_stats(&consistency);

        let languages: Vec<LanguageView> = state
            .languages
            .iter()
            .filter_map(|language| {
                let data = state.data.get(language)?;
                let data = match search {
                    Some(term) => filter_language_data(data, term),
                    None => data.clone(),
                };
                Some(LanguageView {
                    language: language.clone(),
                    display_name: crate::languages::display_name(language).to_string(),
                    data,
                })
            })
            .collect();

        let total = total_repositories(state.data.values());
        let filtered = total_repositories(languages.iter().map(|view| &view.data));
        let stars_today = total_stars_today(languages.iter().map(|view| &view.data));

        DashboardSnapshot {
            epoch: state.epoch,
            search: search.map(str::to_string),
            languages,
            consistency,
            stats,
            total_repositories: total,
            filtered_repositories: filtered,
            stars_today,
        }
    }
}
