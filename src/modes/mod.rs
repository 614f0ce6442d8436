pub mod play;
pub mod rollout;

pub use play::PlayMode;
pub use rollout::{EpisodeSummary, RolloutConfig, RolloutMode};
