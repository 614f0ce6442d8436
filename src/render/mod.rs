//! Rendering for the Snake environment: RGB frames and terminal output

pub mod viewer;

pub use viewer::{Hud, RgbFrame, SnakeViewer};
