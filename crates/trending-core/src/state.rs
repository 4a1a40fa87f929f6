use serde::Serialize;
use trending_client::{Repository, Since};

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch repositories";

/// One (language, window) cell of the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WindowSlot {
    pub repositories: Vec<Repository>,
    pub loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl WindowSlot {
    pub fn pending() -> Self {
        Self {
            repositories: Vec::new(),
            loading: true,
            error: None,
        }
    }

    /// Record a successful load, clearing any previous error.
    pub fn loaded(&mut self, repositories: Vec<Repository>) {
        self.repositories = repositories;
        self.loading = false;
        self.error = None;
    }

    /// Record a failed load. Previously shown repositories are kept.
    pub fn failed(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }
}

/// Daily, weekly and monthly slots for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageData {
    pub daily: WindowSlot,
    pub weekly: WindowSlot,
    pub monthly: WindowSlot,
}

impl LanguageData {
    pub fn pending() -> Self {
        Self {
            daily: WindowSlot::pending(),
            weekly: WindowSlot::pending(),
            monthly: WindowSlot::pending(),
        }
    }

    pub fn slot(&self, since: Since) -> &WindowSlot {
        match since {
            Since::Daily => &self.daily,
            Since::Weekly => &self.weekly,
            Since::Monthly => &self.monthly,
        }
    }

    pub fn slot_mut(&mut self, since: Since) -> &mut WindowSlot {
        match since {
            Since::Daily => &mut self.daily,
            Since::Weekly => &mut self.weekly,
            Since::Monthly => &mut self.monthly,
        }
    }

    /// Repository lists in daily, weekly, monthly order.
    pub fn windows(&self) -> [&[Repository]; 3] {
        [
            self.daily.repositories.as_slice(),
            self.weekly.repositories.as_slice(),
            self.monthly.repositories.as_slice(),
        ]
    }

    pub fn is_loading(&self) -> bool {
        Since::ALL.iter().any(|since| self.slot(*since).loading)
    }
}
