use tracing::{debug, info};

use super::spaces::{BoxSpace, Discrete};
use crate::error::{EnvError, Result};
use crate::game::{Board, Cell, Direction, Event, GameConfig, SnakeGame};
use crate::render::{Hud, RgbFrame, SnakeViewer};

/// Playback rate for human rendering
pub const FRAMES_PER_SECOND: u32 = 40;

/// How [`SnakeEnv::render`] presents a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Draw to the terminal
    #[default]
    Human,
    /// Return the frame as RGB pixels
    RgbArray,
}

/// Extra information about a step
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Events the game emitted this step
    pub events: Vec<Event>,
    /// Food eaten so far this episode
    pub score: u32,
    /// Steps taken so far this episode
    pub steps: u32,
}

/// Result of [`SnakeEnv::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct StepOutcome {
    /// Board after the step; `None` when stepping an already finished game
    pub observation: Option<Board>,
    pub reward: f32,
    pub done: bool,
    pub info: StepInfo,
}

/// Snake environment for reinforcement learning
///
/// Wraps a [`SnakeGame`] with the standard RL interface:
/// - Observations are the board of cell codes, shape `(height, width, 1)`
/// - Discrete action space of 4 actions (north, east, south, west)
/// - `reset`, `step`, `render`, `close`
pub struct SnakeEnv {
    game: SnakeGame,
    viewer: Option<SnakeViewer>,
    action_space: Discrete,
    observation_space: BoxSpace,
}

impl SnakeEnv {
    /// Create a new Snake environment
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::from_game(SnakeGame::new(config)?))
    }

    /// Wrap an existing game
    pub fn from_game(game: SnakeGame) -> Self {
        let observation_space = BoxSpace::new(0, Cell::MAX, [game.height(), game.width(), 1]);
        Self {
            game,
            viewer: None,
            action_space: Discrete::new(Direction::ALL.len()),
            observation_space,
        }
    }

    pub fn action_space(&self) -> &Discrete {
        &self.action_space
    }

    pub fn observation_space(&self) -> &BoxSpace {
        &self.observation_space
    }

    /// Reset the environment and return initial observation
    pub fn reset(&mut self) -> Result<Board> {
        self.game.reset(None)?;
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.reset(&self.game);
        }
        Ok(self.game.board().clone())
    }

    /// Step the environment with a discrete action
    ///
    /// Actions:
    /// - 0: Move North
    /// - 1: Move East
    /// - 2: Move South
    /// - 3: Move West
    ///
    /// Reward is `death_penalty` when the snake dies, `food_reward` when it
    /// eats, plus `step_penalty` on every step it survives.
    pub fn step(&mut self, action: usize) -> Result<StepOutcome> {
        if self.game.is_over() {
            return Ok(StepOutcome {
                observation: None,
                reward: 0.0,
                done: true,
                info: StepInfo::default(),
            });
        }

        if !self.action_space.contains(action) {
            return Err(EnvError::InvalidAction(action));
        }
        let direction = Direction::from_action(action)?;

        let events = self.game.step(direction);
        debug!(?direction, ?events, "step");

        let config = self.game.config();
        let mut reward = 0.0;
        for event in &events {
            if let Some(viewer) = self.viewer.as_mut() {
                viewer.process_event(event);
            }
            match event {
                Event::Dead => reward = config.death_penalty,
                Event::Eat(_) => reward = config.food_reward,
                _ => {}
            }
        }
        if !events.contains(&Event::Dead) {
            reward += config.step_penalty;
        }

        if events.iter().any(Event::is_terminal) {
            info!(
                score = self.game.score(),
                steps = self.game.steps(),
                won = self.game.is_won(),
                "episode finished"
            );
        }

        Ok(StepOutcome {
            observation: Some(self.game.board().clone()),
            reward,
            done: self.game.is_over(),
            info: StepInfo {
                events,
                score: self.game.score(),
                steps: self.game.steps(),
            },
        })
    }

    /// Render the current frame.
    ///
    /// `Human` draws to the terminal and returns `None`; `RgbArray` returns
    /// the frame's pixels.
    pub fn render(&mut self, mode: RenderMode) -> Result<Option<RgbFrame>> {
        let hud = Hud::from_game(&self.game);
        let viewer = self.viewer();
        match mode {
            RenderMode::Human => {
                viewer.render_human(&hud)?;
                Ok(None)
            }
            RenderMode::RgbArray => Ok(Some(viewer.rgb_array())),
        }
    }

    /// The viewer, created on first use
    pub fn viewer(&mut self) -> &mut SnakeViewer {
        let game = &self.game;
        self.viewer
            .get_or_insert_with(|| SnakeViewer::new(game, game.config().viewer.clone()))
    }

    /// Release the viewer and any terminal it holds
    pub fn close(&mut self) -> Result<()> {
        if let Some(mut viewer) = self.viewer.take() {
            viewer.close()?;
        }
        Ok(())
    }

    /// Get reference to current game (for testing/debugging)
    pub fn game(&self) -> &SnakeGame {
        &self.game
    }

    /// Direct access to the game. An existing viewer only picks up changes
    /// made here on the next `reset`.
    pub fn game_mut(&mut self) -> &mut SnakeGame {
        &mut self.game
    }
}
