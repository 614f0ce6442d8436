//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The environment, the viewer and the interactive modes all drive it.

pub mod action;
pub mod config;
pub mod engine;
pub mod event;
pub mod state;

// Re-export commonly used types
pub use action::Direction;
pub use config::{Color, GameConfig, ViewerConfig};
pub use engine::SnakeGame;
pub use event::Event;
pub use state::{Board, Cell, Position, Snake};
