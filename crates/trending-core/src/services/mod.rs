pub mod consistency;
pub mod search;

pub use consistency::{consistency_stats, score, score_all, tier, ConsistencyStats, ConsistencyTier};
pub use search::{filter_language_data, filter_repositories, total_repositories, total_stars_today};
