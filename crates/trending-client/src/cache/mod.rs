pub mod clock;
pub mod memory;
pub mod stats;

pub use clock::{Clock, ManualClock, SystemClock};
pub use memory::MemoryCache;
pub use stats::{CacheStats, CacheStatsSnapshot};
