use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Fastest allowed tick interval in milliseconds
pub const MIN_TICK_INTERVAL_MS: u64 = 50;
/// Slowest allowed tick interval in milliseconds
pub const MAX_TICK_INTERVAL_MS: u64 = 150;

/// Reasons a [`GameConfig`] is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1 (got {cols}x{rows})")]
    ZeroDimension { cols: usize, rows: usize },
    #[error("grid must contain at least 2 cells (got {cells})")]
    BoardTooSmall { cells: usize },
    #[error("grid {cols}x{rows} does not fit in signed 32-bit coordinates")]
    BoardTooLarge { cols: usize, rows: usize },
    #[error(
        "tick interval {ms}ms must be between {}ms and {}ms",
        MIN_TICK_INTERVAL_MS,
        MAX_TICK_INTERVAL_MS
    )]
    TickIntervalOutOfRange { ms: u64 },
    #[error("food bonus must be at least 1")]
    ZeroFoodBonus,
    #[error("initial snake length must be between 1 and {max} (got {length})")]
    InitialLengthOutOfRange { length: usize, max: usize },
}

/// Speed presets selectable from the command line or in-game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Slow,
    Normal,
    Fast,
}

impl Difficulty {
    /// Get the tick interval in milliseconds for this preset
    pub fn tick_interval_ms(&self) -> u64 {
        match self {
            Difficulty::Slow => 150,
            Difficulty::Normal => 90,
            Difficulty::Fast => 50,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Slow => "Slow",
            Difficulty::Normal => "Normal",
            Difficulty::Fast => "Fast",
        }
    }
}

/// Configuration for the game
///
/// Every field is fixed for the lifetime of one game; changing any of them
/// means starting over from a fresh state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Number of grid columns
    pub cols: usize,
    /// Number of grid rows
    pub rows: usize,
    /// Delay between simulation ticks
    pub tick_interval_ms: u64,
    /// Segments gained per food item
    pub food_bonus: usize,
    /// Length the snake unfolds to after spawning
    pub initial_snake_length: usize,
    /// Shorten the tick interval every time food is eaten
    pub rush: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: 30,
            rows: 20,
            tick_interval_ms: Difficulty::Normal.tick_interval_ms(),
            food_bonus: 5,
            initial_snake_length: 5,
            rush: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.tick_interval_ms = difficulty.tick_interval_ms();
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(ConfigError::ZeroDimension {
                cols: self.cols,
                rows: self.rows,
            });
        }
        if self.cols > i32::MAX as usize || self.rows > i32::MAX as usize {
            return Err(ConfigError::BoardTooLarge {
                cols: self.cols,
                rows: self.rows,
            });
        }
        let cells = self
            .cols
            .checked_mul(self.rows)
            .ok_or(ConfigError::BoardTooLarge {
                cols: self.cols,
                rows: self.rows,
            })?;
        if cells < 2 {
            return Err(ConfigError::BoardTooSmall { cells });
        }
        if !(MIN_TICK_INTERVAL_MS..=MAX_TICK_INTERVAL_MS).contains(&self.tick_interval_ms) {
            return Err(ConfigError::TickIntervalOutOfRange {
                ms: self.tick_interval_ms,
            });
        }
        if self.food_bonus == 0 {
            return Err(ConfigError::ZeroFoodBonus);
        }
        // The snake must be able to unfold without already filling the board
        if self.initial_snake_length == 0 || self.initial_snake_length >= cells {
            return Err(ConfigError::InitialLengthOutOfRange {
                length: self.initial_snake_length,
                max: cells - 1,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.cols, 30);
        assert_eq!(config.rows, 20);
        assert_eq!(config.tick_interval_ms, 90);
        assert_eq!(config.food_bonus, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(15, 12);
        assert_eq!(config.cols, 15);
        assert_eq!(config.rows, 12);
        assert_eq!(config.cell_count(), 180);
    }

    #[test]
    fn test_difficulty_presets() {
        assert_eq!(Difficulty::Slow.tick_interval_ms(), 150);
        assert_eq!(Difficulty::Normal.tick_interval_ms(), 90);
        assert_eq!(Difficulty::Fast.tick_interval_ms(), 50);

        let config = GameConfig::small().with_difficulty(Difficulty::Fast);
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_boards() {
        assert_eq!(
            GameConfig::new(0, 5).validate(),
            Err(ConfigError::ZeroDimension { cols: 0, rows: 5 })
        );

        let mut one_cell = GameConfig::new(1, 1);
        one_cell.initial_snake_length = 1;
        assert_eq!(
            one_cell.validate(),
            Err(ConfigError::BoardTooSmall { cells: 1 })
        );
    }

    #[test]
    fn test_rejects_tick_interval_out_of_range() {
        let mut config = GameConfig::small();
        config.tick_interval_ms = 10;
        assert_eq!(
            config.validate(),
            Err(ConfigError::TickIntervalOutOfRange { ms: 10 })
        );

        config.tick_interval_ms = 151;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_food_bonus_and_bad_length() {
        let mut config = GameConfig::small();
        config.food_bonus = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFoodBonus));

        let mut config = GameConfig::new(2, 2);
        config.initial_snake_length = 4;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialLengthOutOfRange { length: 4, max: 3 })
        );
    }

    #[test]
    fn test_load_partial_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cols": 12, "rows": 8, "rush": true }}"#).unwrap();

        let config = GameConfig::from_file(file.path()).unwrap();
        assert_eq!(config.cols, 12);
        assert_eq!(config.rows, 8);
        assert!(config.rush);
        assert_eq!(config.food_bonus, 5);
    }

    #[test]
    fn test_load_invalid_config_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let err = GameConfig::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
