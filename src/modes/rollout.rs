//! Rollout mode: a uniformly random agent driving the environment
//!
//! Runs the standard loop (`reset`, then `step` until `done`) for a number of
//! episodes, optionally rendering every frame to the terminal, and reports
//! episode statistics.

use anyhow::{Context, Result};
use rand::{rngs::StdRng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::{info, warn};

use crate::env::{RenderMode, SnakeEnv, FRAMES_PER_SECOND};
use crate::game::GameConfig;
use crate::metrics::{EpisodeEnd, EpisodeStats};

/// Configuration for rollout mode
#[derive(Debug, Clone)]
pub struct RolloutConfig {
    /// Number of episodes to run
    pub episodes: usize,

    /// Steps after which an episode is cut off
    pub max_steps: usize,

    /// Draw every step to the terminal
    pub render: bool,

    /// Log a summary every N episodes
    pub log_frequency: usize,

    /// Game configuration; its seed also seeds the agent
    pub game_config: GameConfig,
}

impl RolloutConfig {
    pub fn new(episodes: usize, game_config: GameConfig) -> Self {
        Self {
            episodes,
            max_steps: 1000,
            render: false,
            log_frequency: 100,
            game_config,
        }
    }
}

/// Result of one episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeSummary {
    pub reward: f32,
    pub length: usize,
    pub score: u32,
    pub end: EpisodeEnd,
}

pub struct RolloutMode {
    env: SnakeEnv,
    config: RolloutConfig,
    rng: StdRng,
    stats: EpisodeStats,
    interrupt: Arc<Notify>,
    interrupted: bool,
}

impl RolloutMode {
    pub fn new(config: RolloutConfig) -> Result<Self> {
        let env = SnakeEnv::new(config.game_config.clone())
            .context("Failed to create environment")?;
        let rng = match config.game_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            env,
            stats: EpisodeStats::new(config.log_frequency.max(1)),
            config,
            rng,
            interrupt: Arc::new(Notify::new()),
            interrupted: false,
        })
    }

    /// Run all episodes, or until Ctrl+C while rendering
    pub async fn run(&mut self) -> Result<&EpisodeStats> {
        info!(
            episodes = self.config.episodes,
            width = self.config.game_config.grid_width,
            height = self.config.game_config.grid_height,
            "starting rollout"
        );

        let mut frame_timer = self.config.render.then(|| {
            let mut timer = interval(Duration::from_millis(1000 / u64::from(FRAMES_PER_SECOND)));
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            timer
        });

        // One listener for the whole run; a Ctrl+C between frames leaves a
        // permit on `interrupt` for the next frame to pick up.
        let listener = self.config.render.then(|| {
            let interrupt = Arc::clone(&self.interrupt);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    interrupt.notify_one();
                }
            })
        });

        let result = self.run_episodes(frame_timer.as_mut()).await;
        if let Some(listener) = listener {
            listener.abort();
        }
        self.env.close().context("Failed to close environment")?;
        result?;

        Ok(&self.stats)
    }

    async fn run_episodes(&mut self, mut frame_timer: Option<&mut Interval>) -> Result<()> {
        for episode in 1..=self.config.episodes {
            let Some(summary) = self.run_episode(frame_timer.as_deref_mut()).await? else {
                warn!(episode, "rollout interrupted");
                break;
            };

            self.stats
                .record_episode(summary.reward, summary.length, summary.score, summary.end);

            if summary.end == EpisodeEnd::Truncated {
                warn!(episode, max_steps = self.config.max_steps, "episode truncated");
            }
            if episode % self.config.log_frequency.max(1) == 0 {
                info!("{}", self.stats.format_summary());
            }
        }
        Ok(())
    }

    /// Play one episode. `None` if the user interrupted it.
    async fn run_episode(
        &mut self,
        mut frame_timer: Option<&mut Interval>,
    ) -> Result<Option<EpisodeSummary>> {
        self.env.reset().context("Failed to reset environment")?;
        self.render_frame(frame_timer.as_deref_mut()).await?;
        if self.interrupted {
            return Ok(None);
        }

        let mut reward = 0.0;
        let mut length = 0;
        let end = loop {
            if length >= self.config.max_steps {
                break EpisodeEnd::Truncated;
            }

            let action = self.env.action_space().sample(&mut self.rng);
            let outcome = self.env.step(action).context("Failed to step environment")?;
            reward += outcome.reward;
            length += 1;

            self.render_frame(frame_timer.as_deref_mut()).await?;
            if self.interrupted {
                return Ok(None);
            }

            if outcome.done {
                break if self.env.game().is_won() {
                    EpisodeEnd::Won
                } else {
                    EpisodeEnd::Died
                };
            }
        };

        Ok(Some(EpisodeSummary {
            reward,
            length,
            score: self.env.game().score(),
            end,
        }))
    }

    async fn render_frame(&mut self, frame_timer: Option<&mut Interval>) -> Result<()> {
        let Some(timer) = frame_timer else {
            return Ok(());
        };

        self.env
            .render(RenderMode::Human)
            .context("Failed to render frame")?;

        let interrupt = Arc::clone(&self.interrupt);
        self.interrupted = tokio::select! {
            _ = timer.tick() => false,
            _ = interrupt.notified() => true,
        };
        Ok(())
    }

    pub fn stats(&self) -> &EpisodeStats {
        &self.stats
    }
}
