//! gym_snake - a Snake game exposed as a reinforcement-learning environment
//!
//! This library provides:
//! - Core game logic (`game`)
//! - The `reset` / `step` / `render` environment (`env`)
//! - RGB and terminal rendering (`render`)
//! - Keyboard play and random-agent rollouts (`modes`)
//!
//! ```rust
//! use gym_snake::env::SnakeEnv;
//! use gym_snake::game::GameConfig;
//!
//! let mut env = SnakeEnv::new(GameConfig::default().with_seed(0))?;
//! let _board = env.reset()?;
//! loop {
//!     let outcome = env.step(0)?;
//!     if outcome.done {
//!         break;
//!     }
//! }
//! # Ok::<(), gym_snake::error::EnvError>(())
//! ```

pub mod env;
pub mod error;
pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;

pub use env::{RenderMode, SnakeEnv, StepOutcome};
pub use error::{EnvError, Result};
