use serde::{Deserialize, Serialize};

use super::level::Level;

/// Smallest grid edge the game accepts
pub const MIN_GRID_SIZE: usize = 8;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Points awarded for each food eaten
    pub score_per_food: u32,
    /// Difficulty level (tick speed)
    #[serde(default)]
    pub level: Level,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 3,
            score_per_food: 10,
            level: Level::default(),
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

    /// Validate configuration parameters
    ///
    /// The snake starts on the middle row with its head a quarter of the way
    /// in from the left wall, so the start row caps the initial length.
    pub fn validate(&self) -> Result<(), String> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            return Err(format!(
                "grid must be at least {MIN_GRID_SIZE}x{MIN_GRID_SIZE}, got {}x{}",
                self.grid_width, self.grid_height
            ));
        }

        if self.initial_snake_length == 0 {
            return Err("initial_snake_length must be at least 1".to_string());
        }

        let max_length = self.grid_width / 4 + 1;
        if self.initial_snake_length > max_length {
            return Err(format!(
                "initial_snake_length ({}) does not fit a {}-wide grid (max {})",
                self.initial_snake_length, self.grid_width, max_length
            ));
        }

        if self.score_per_food == 0 {
            return Err("score_per_food must be positive".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, 20);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.score_per_food, 10);
        assert_eq!(config.level, Level::Easy);
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.grid_width, 15);
        assert_eq!(config.grid_height, 12);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
        assert!(GameConfig::small().validate().is_ok());
    }

    #[test]
    fn test_validation_grid_too_small() {
        assert!(GameConfig::new(7, 20).validate().is_err());
        assert!(GameConfig::new(20, 7).validate().is_err());
        assert!(GameConfig::new(8, 8).validate().is_ok());
    }

    #[test]
    fn test_validation_snake_length() {
        let mut config = GameConfig::new(8, 8);
        config.initial_snake_length = 0;
        assert!(config.validate().is_err());

        config.initial_snake_length = 3;
        assert!(config.validate().is_ok());

        config.initial_snake_length = 4;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_score() {
        let config = GameConfig {
            score_per_food: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_level_defaults() {
        let json = r#"{"grid_width":12,"grid_height":9,"initial_snake_length":2,"score_per_food":5}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.level, Level::Easy);
        assert_eq!(config.grid_height, 9);
    }
}
