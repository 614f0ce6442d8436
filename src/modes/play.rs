//! Keyboard-driven play through the environment
//!
//! # Controls
//!
//! - Arrow keys / WASD: steer
//! - Space / P: pause
//! - 1-4: speed (1=slow, 2=normal, 3=fast, 4=very fast)
//! - R: restart
//! - Q / Esc: quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, Interval};
use tracing::info;

use crate::env::{SnakeEnv, FRAMES_PER_SECOND};
use crate::game::{Direction, GameConfig};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Hud;

/// Game tick rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    /// 2 Hz
    Slow,
    /// 8 Hz
    Normal,
    /// 20 Hz
    Fast,
    /// 40 Hz, one tick per rendered frame
    VeryFast,
}

impl Speed {
    fn tick_interval(&self) -> Duration {
        match self {
            Self::Slow => Duration::from_millis(500),
            Self::Normal => Duration::from_millis(125),
            Self::Fast => Duration::from_millis(50),
            Self::VeryFast => frame_interval(),
        }
    }

    fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Self::Slow),
            '2' => Some(Self::Normal),
            '3' => Some(Self::Fast),
            '4' => Some(Self::VeryFast),
            _ => None,
        }
    }
}

fn frame_interval() -> Duration {
    Duration::from_millis(1000 / u64::from(FRAMES_PER_SECOND))
}

pub struct PlayMode {
    env: SnakeEnv,
    metrics: SessionMetrics,
    input_handler: InputHandler,
    pending_direction: Option<Direction>,
    episode_reward: f32,
    paused: bool,
    speed: Speed,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        let mut env = SnakeEnv::new(config).context("Failed to create environment")?;
        env.reset().context("Failed to reset environment")?;

        Ok(Self {
            env,
            metrics: SessionMetrics::new(),
            input_handler: InputHandler::new(),
            pending_direction: None,
            episode_reward: 0.0,
            paused: false,
            speed: Speed::Normal,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;
        self.env.close().context("Failed to close environment")?;

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "play session ended"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.speed.tick_interval());
        let mut render_timer = interval(frame_interval());

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, &mut tick_timer)?;
                    }
                }

                _ = tick_timer.tick() => {
                    self.update_game()?;
                }

                _ = render_timer.tick() => {
                    terminal
                        .draw(|frame| self.draw_frame(frame))
                        .context("Failed to draw frame")?;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event, tick_timer: &mut Interval) -> Result<()> {
        let Event::Key(key) = event else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if let crossterm::event::KeyCode::Char(c) = key.code {
            if let Some(speed) = Speed::from_key(c) {
                self.speed = speed;
                tick_timer.reset_after(speed.tick_interval());
                return Ok(());
            }
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Move(direction) => self.pending_direction = Some(direction),
            KeyAction::Pause => {
                self.paused = !self.paused;
                self.metrics.set_paused(self.paused);
            }
            KeyAction::Restart => self.reset_game()?,
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        Ok(())
    }

    fn update_game(&mut self) -> Result<()> {
        if self.paused || self.env.game().is_over() {
            return Ok(());
        }

        let direction = self
            .pending_direction
            .take()
            .unwrap_or_else(|| self.env.game().current_direction());

        let outcome = self
            .env
            .step(direction.action_index())
            .context("Failed to step environment")?;
        self.episode_reward += outcome.reward;

        if outcome.done {
            self.metrics.on_game_over(outcome.info.score);
            info!(
                score = outcome.info.score,
                steps = outcome.info.steps,
                reward = self.episode_reward,
                won = self.env.game().is_won(),
                "game over"
            );
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        self.env.reset().context("Failed to reset environment")?;
        self.metrics.on_game_start();
        self.pending_direction = None;
        self.episode_reward = 0.0;
        self.paused = false;
        Ok(())
    }

    fn hud(&self) -> Hud {
        let game = self.env.game();
        let footer = if game.is_over() {
            let verdict = if game.is_won() { "YOU WIN" } else { "GAME OVER" };
            format!(
                "{verdict} | Games {} | Food {} | R restart | Q quit",
                self.metrics.games_played, self.metrics.total_food,
            )
        } else if self.paused {
            "PAUSED | Space resume | Q quit".to_string()
        } else {
            format!(
                "Time {} | Best {} | Games {} | Food {} | Arrows/WASD move | Space pause | 1-4 speed | Q quit",
                self.metrics.format_time(),
                self.metrics.high_score.max(game.score()),
                self.metrics.games_played,
                self.metrics.total_food + game.score(),
            )
        };

        Hud {
            footer: Some(footer),
            ..Hud::from_game(game)
        }
    }

    fn draw_frame(&mut self, frame: &mut Frame) {
        let hud = self.hud();
        self.env.viewer().draw(frame, &hud);
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
