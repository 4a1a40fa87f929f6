use trending_client::{Repository, Since};

use crate::state::LanguageData;

fn matches(repository: &Repository, needle: &str) -> bool {
    repository.name.to_lowercase().contains(needle)
        || repository.description.to_lowercase().contains(needle)
        || repository.owner.to_lowercase().contains(needle)
}

/// Case-insensitive substring filter over name, description and owner.
/// A blank term keeps everything. Order is preserved.
pub fn filter_repositories(repositories: &[Repository], term: &str) -> Vec<Repository> {
    if term.trim().is_empty() {
        return repositories.to_vec();
    }

    let needle = term.to_lowercase();
    repositories
        .iter()
        .filter(|repository| matches(repository, &needle))
        .cloned()
        .collect()
}

/// Apply [`filter_repositories`] to each window independently.
pub fn filter_language_data(data: &LanguageData, term: &str) -> LanguageData {
    let mut filtered = data.clone();
    for since in Since::ALL {
        let slot = filtered.slot_mut(since);
        slot.repositories = filter_repositories(&slot.repositories, term);
    }
    filtered
}

pub fn total_repositories<'a>(languages: impl IntoIterator<Item = &'a LanguageData>) -> usize {
    languages
        .into_iter()
        .flat_map(LanguageData::windows)
        .map(<[Repository]>::len)
        .sum()
}

pub fn total_stars_today<'a>(languages: impl IntoIterator<Item = &'a LanguageData>) -> u64 {
    languages
        .into_iter()
        .flat_map(LanguageData::windows)
        .flatten()
        .map(|repository| repository.stars_today)
        .sum()
}
