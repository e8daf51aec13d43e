use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::{
    direction::Direction,
    grid::{Board, Cell, MAX_SIDE},
};

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Validation error
    #[error("validation error: {0}")]
    Validation(String),
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the board in cells
    pub board_width: usize,
    /// Height of the board in cells
    pub board_height: usize,
    /// Terminal columns per cell
    pub cell_size: u16,
    /// Delay between ticks
    pub tick_interval_ms: u64,
    /// Initial length of the snake
    pub initial_length: usize,
    /// Starting head column, defaults to `initial_length - 1`
    pub start_x: Option<i32>,
    /// Starting head row, defaults to the centre row
    pub start_y: Option<i32>,
    /// Starting heading
    pub initial_heading: Direction,
    /// Score added per food eaten
    pub points_per_food: u32,
    /// Never respawn food under the snake
    pub food_avoids_snake: bool,
    /// Fixed RNG seed for reproducible food placement
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 20,
            board_height: 20,
            cell_size: 2,
            tick_interval_ms: 150,
            initial_length: 1,
            start_x: None,
            start_y: None,
            initial_heading: Direction::Right,
            points_per_food: 10,
            food_avoids_snake: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom board size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            board_width: width,
            board_height: height,
            ..Default::default()
        }
    }

    /// Create a small board for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load and validate a TOML configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate TOML configuration text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn board(&self) -> Board {
        Board::new(self.board_width, self.board_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Head cell of a fresh snake
    pub fn start_cell(&self) -> Cell {
        let x = self.start_x.unwrap_or_else(|| {
            i32::try_from(self.initial_length.saturating_sub(1)).unwrap_or(i32::MAX)
        });
        let y = self.start_y.unwrap_or_else(|| self.board().center_row());
        Cell::new(x, y)
    }

    /// Check that the configuration describes a playable game
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width == 0 || self.board_height == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        if self.board_width > MAX_SIDE || self.board_height > MAX_SIDE {
            return Err(ConfigError::Validation(format!(
                "board sides are limited to {MAX_SIDE} cells, got {}x{}",
                self.board_width, self.board_height
            )));
        }

        if self.cell_size == 0 {
            return Err(ConfigError::Validation("cell_size must be at least 1".into()));
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Validation("tick_interval_ms must be at least 1".into()));
        }

        if self.initial_length == 0 {
            return Err(ConfigError::Validation("initial_length must be at least 1".into()));
        }

        if self.initial_length > MAX_SIDE {
            return Err(ConfigError::Validation(format!(
                "initial_length is limited to {MAX_SIDE}, got {}",
                self.initial_length
            )));
        }

        let board = self.board();
        let head = self.start_cell();
        let fits = board.contains(head) && {
            let (back_dx, back_dy) = self.initial_heading.opposite().delta();
            let steps = i32::try_from(self.initial_length - 1)
                .map_err(|_| ConfigError::Validation("initial_length out of range".into()))?;
            board.contains(head.moved_by(back_dx * steps, back_dy * steps))
        };

        if !fits {
            return Err(ConfigError::Validation(format!(
                "snake of length {} heading {:?} from ({}, {}) does not fit on a {}x{} board",
                self.initial_length,
                self.initial_heading,
                head.x,
                head.y,
                self.board_width,
                self.board_height
            )));
        }

        Ok(())
    }
}
