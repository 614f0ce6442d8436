//! Reinforcement learning interface for the Snake game
//!
//! Provides:
//! - `SnakeEnv` with the reset / step / render / close loop
//! - Discrete action space and board observation space

pub mod environment;
pub mod spaces;

pub use environment::{RenderMode, SnakeEnv, StepInfo, StepOutcome, FRAMES_PER_SECOND};
pub use spaces::{BoxSpace, Discrete};
