//! Rolling statistics over finished episodes

use std::collections::VecDeque;

/// How an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEnd {
    /// The snake died
    Died,
    /// The snake filled the board
    Won,
    /// The step cap was reached first
    Truncated,
}

/// Episode statistics tracker with rolling averages
///
/// Tracks rewards, lengths and scores over the last `window_size` episodes,
/// plus running totals and the best score seen.
///
/// # Example
///
/// ```rust
/// use gym_snake::metrics::{EpisodeEnd, EpisodeStats};
///
/// let mut stats = EpisodeStats::new(100);
/// stats.record_episode(3.0, 150, 4, EpisodeEnd::Died);
///
/// assert_eq!(stats.total_episodes(), 1);
/// assert_eq!(stats.best_score(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct EpisodeStats {
    episode_rewards: VecDeque<f32>,
    episode_lengths: VecDeque<usize>,
    episode_scores: VecDeque<u32>,
    total_episodes: usize,
    total_steps: usize,
    wins: usize,
    truncations: usize,
    best_score: u32,
    window_size: usize,
}

impl EpisodeStats {
    /// Create a tracker averaging over the last `window_size` episodes
    pub fn new(window_size: usize) -> Self {
        let window_size = window_size.max(1);
        Self {
            episode_rewards: VecDeque::with_capacity(window_size),
            episode_lengths: VecDeque::with_capacity(window_size),
            episode_scores: VecDeque::with_capacity(window_size),
            total_episodes: 0,
            total_steps: 0,
            wins: 0,
            truncations: 0,
            best_score: 0,
            window_size,
        }
    }

    /// Record a finished episode
    pub fn record_episode(&mut self, reward: f32, length: usize, score: u32, end: EpisodeEnd) {
        Self::push_window(&mut self.episode_rewards, reward, self.window_size);
        Self::push_window(&mut self.episode_lengths, length, self.window_size);
        Self::push_window(&mut self.episode_scores, score, self.window_size);
        self.total_episodes += 1;
        self.total_steps += length;
        self.best_score = self.best_score.max(score);
        match end {
            EpisodeEnd::Won => self.wins += 1,
            EpisodeEnd::Truncated => self.truncations += 1,
            EpisodeEnd::Died => {}
        }
    }

    /// Mean episode reward over the window, 0.0 when empty
    pub fn mean_episode_reward(&self) -> f32 {
        if self.episode_rewards.is_empty() {
            0.0
        } else {
            self.episode_rewards.iter().sum::<f32>() / self.episode_rewards.len() as f32
        }
    }

    pub fn mean_episode_length(&self) -> f32 {
        Self::mean_of(self.episode_lengths.iter().map(|&l| l as f32))
    }

    pub fn mean_episode_score(&self) -> f32 {
        Self::mean_of(self.episode_scores.iter().map(|&s| s as f32))
    }

    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn total_steps(&self) -> usize {
        self.total_steps
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    /// Episodes cut off by the step cap
    pub fn truncations(&self) -> usize {
        self.truncations
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// One-line summary of the current statistics
    pub fn format_summary(&self) -> String {
        format!(
            "Episodes: {} | Steps: {} | Reward: {:.2} | Score: {:.2} | Len: {:.1} | Best: {} | Wins: {} | Truncated: {}",
            self.total_episodes,
            self.total_steps,
            self.mean_episode_reward(),
            self.mean_episode_score(),
            self.mean_episode_length(),
            self.best_score,
            self.wins,
            self.truncations,
        )
    }

    fn mean_of(values: impl ExactSizeIterator<Item = f32>) -> f32 {
        let len = values.len();
        if len == 0 {
            0.0
        } else {
            values.sum::<f32>() / len as f32
        }
    }

    fn push_window<T>(window: &mut VecDeque<T>, value: T, window_size: usize) {
        if window.len() >= window_size {
            window.pop_front();
        }
        window.push_back(value);
    }
}
