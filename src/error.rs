//! Error type shared by the game, the environment and the viewer.

use thiserror::Error;

/// Errors produced by the Snake environment library.
#[derive(Error, Debug)]
pub enum EnvError {
    /// Action index outside the environment's action space.
    #[error("invalid action {0}: expected an index in 0..4")]
    InvalidAction(usize),

    /// The board must be at least 2 cells wide and 2 cells tall.
    #[error("invalid grid {width}x{height}: both sides must be greater than 1")]
    InvalidGrid { width: usize, height: usize },

    /// A square that is off the board or already occupied.
    #[error("square ({x}, {y}) is off the board or occupied")]
    InvalidSquare { x: i32, y: i32 },

    /// Any other rejected configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, EnvError>;
