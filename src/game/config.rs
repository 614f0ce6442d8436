use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{EnvError, Result};

/// Largest board, in cells, a config may ask for
pub const MAX_GRID_CELLS: usize = 1 << 20;

/// Largest rendered frame, in pixels
pub const MAX_SCREEN_PIXELS: usize = 1 << 24;

/// RGB color with components in `[0, 1]`
pub type Color = [f32; 3];

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,

    // Rewards
    /// Reward for eating food
    pub food_reward: f32,
    /// Reward added to every step the snake survives
    pub step_penalty: f32,
    /// Penalty for dying
    pub death_penalty: f32,

    /// Seed for head and food placement. `None` draws from OS entropy.
    pub seed: Option<u64>,

    pub viewer: ViewerConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            food_reward: 1.0,
            step_penalty: 0.0,
            death_penalty: -1.0,
            seed: None,
            viewer: ViewerConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Same configuration with a fixed seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn from_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Apply command-line overrides on top of this configuration and
    /// re-validate the result
    pub fn with_overrides(
        mut self,
        width: Option<usize>,
        height: Option<usize>,
        seed: Option<u64>,
    ) -> Result<Self> {
        if let Some(width) = width {
            self.grid_width = width;
        }
        if let Some(height) = height {
            self.grid_height = height;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<()> {
        if self.grid_width <= 1 || self.grid_height <= 1 {
            return Err(EnvError::InvalidGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let cells = self.grid_width.checked_mul(self.grid_height);
        if !cells.is_some_and(|cells| cells <= MAX_GRID_CELLS) {
            return Err(EnvError::InvalidConfig(format!(
                "grid {}x{} exceeds {MAX_GRID_CELLS} cells",
                self.grid_width, self.grid_height
            )));
        }

        for (name, value) in [
            ("food_reward", self.food_reward),
            ("step_penalty", self.step_penalty),
            ("death_penalty", self.death_penalty),
        ] {
            if !value.is_finite() {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        self.viewer.validate()
    }
}

/// Display settings for the viewer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Width of the rendered frame in pixels
    pub screen_width: usize,
    /// Height of the rendered frame in pixels
    pub screen_height: usize,
    pub food_color: Color,
    pub snake_color: Color,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            screen_width: 600,
            screen_height: 600,
            food_color: [0.4, 0.6, 0.8],
            snake_color: [0.3, 0.3, 0.3],
        }
    }
}

impl ViewerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(EnvError::InvalidConfig(format!(
                "screen must be non-empty, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }

        let pixels = self.screen_width.checked_mul(self.screen_height);
        if !pixels.is_some_and(|pixels| pixels <= MAX_SCREEN_PIXELS) {
            return Err(EnvError::InvalidConfig(format!(
                "screen {}x{} exceeds {MAX_SCREEN_PIXELS} pixels",
                self.screen_width, self.screen_height
            )));
        }

        for (name, color) in [("food_color", self.food_color), ("snake_color", self.snake_color)] {
            if color.iter().any(|c| !(0.0..=1.0).contains(c)) {
                return Err(EnvError::InvalidConfig(format!(
                    "{name} components must be in [0, 1], got {color:?}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.food_reward, 1.0);
        assert_eq!(config.death_penalty, -1.0);
        assert_eq!(config.step_penalty, 0.0);
        assert_eq!(config.viewer.screen_width, 600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12).with_seed(7);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
        assert_eq!(config.seed, Some(7));
    }

    #[test]
    fn test_validation_rejects_degenerate_grid() {
        assert!(matches!(
            GameConfig::new(1, 10).validate(),
            Err(EnvError::InvalidGrid { width: 1, height: 10 })
        ));
        assert!(GameConfig::new(10, 0).validate().is_err());
        assert!(GameConfig::new(2, 2).validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = GameConfig::default();
        config.food_reward = f32::NAN;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.viewer.screen_height = 0;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.viewer.snake_color = [0.3, 1.5, 0.3];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_grid() {
        let huge = i32::MAX as usize;
        assert!(matches!(
            GameConfig::new(huge, huge).validate(),
            Err(EnvError::InvalidConfig(_))
        ));
        assert!(GameConfig::new(usize::MAX, 2).validate().is_err());
        assert!(GameConfig::new(1024, 1024).validate().is_ok());
        assert!(GameConfig::new(1024, 1025).validate().is_err());
    }

    #[test]
    fn test_validation_rejects_oversized_screen() {
        let mut config = GameConfig::default();
        config.viewer.screen_width = usize::MAX;
        config.viewer.screen_height = 2;
        assert!(matches!(config.validate(), Err(EnvError::InvalidConfig(_))));

        config.viewer.screen_width = 4096;
        config.viewer.screen_height = 4096;
        assert!(config.validate().is_ok());

        config.viewer.screen_height = 4097;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_take_precedence_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");
        std::fs::write(&path, r#"{ "grid_width": 12, "grid_height": 9, "seed": 3 }"#).unwrap();

        let loaded = GameConfig::from_file(&path).unwrap();
        let merged = loaded.clone().with_overrides(Some(8), None, None).unwrap();
        assert_eq!(merged.grid_width, 8);
        assert_eq!(merged.grid_height, 9);
        assert_eq!(merged.seed, Some(3));

        let reseeded = loaded.clone().with_overrides(None, None, Some(11)).unwrap();
        assert_eq!(reseeded.grid_width, 12);
        assert_eq!(reseeded.seed, Some(11));

        assert!(matches!(
            loaded.with_overrides(Some(1), None, None),
            Err(EnvError::InvalidGrid { width: 1, height: 9 })
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snake.json");

        let config = GameConfig::new(8, 6).with_seed(42);
        config.save(&path).unwrap();

        let loaded = GameConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "grid_width": 12, "viewer": { "screen_width": 300 } }"#)
            .unwrap();

        let loaded = GameConfig::from_file(&path).unwrap();
        assert_eq!(loaded.grid_width, 12);
        assert_eq!(loaded.grid_height, 20);
        assert_eq!(loaded.viewer.screen_width, 300);
        assert_eq!(loaded.viewer.screen_height, 600);
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{ "grid_width": 1 }"#).unwrap();
        assert!(matches!(
            GameConfig::from_file(&path),
            Err(EnvError::InvalidGrid { .. })
        ));

        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(GameConfig::from_file(&path), Err(EnvError::Json(_))));

        assert!(matches!(
            GameConfig::from_file(&dir.path().join("missing.json")),
            Err(EnvError::Io(_))
        ));
    }
}
