pub mod episode_stats;
pub mod session;

pub use episode_stats::{EpisodeEnd, EpisodeStats};
pub use session::SessionMetrics;
