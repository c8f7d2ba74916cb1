use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::board::Board;
use crate::session::Speed;
use crate::terminal::{MAX_COLUMNS, MAX_ROWS};

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const GRID_SIZE: i32 = 20;

pub const DEFAULT_SPEED: u32 = 10;
pub const MIN_SPEED: u32 = 5;
pub const MAX_SPEED: u32 = 60;
pub const SPEED_INCREMENT: u32 = 1;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "snektorus",
    about = "Snake on a wrap-around board. Arrows steer, F1/F2 change speed, Esc quits."
)]
pub struct Config {
    /// Board width in screen units
    #[arg(long, default_value_t = SCREEN_WIDTH)]
    pub width: i32,

    /// Board height in screen units
    #[arg(long, default_value_t = SCREEN_HEIGHT)]
    pub height: i32,

    /// Size of one cell in screen units
    #[arg(long, default_value_t = GRID_SIZE)]
    pub grid: i32,

    /// Starting speed in ticks per second
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: u32,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (RUST_LOG selects the level)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be positive, got {0}")]
    InvalidGrid(i32),
    #[error("{dimension} {value} is not a positive multiple of the grid size {grid}")]
    Misaligned {
        dimension: &'static str,
        value: i32,
        grid: i32,
    },
    #[error("a board needs at least two cells")]
    TooSmall,
    #[error("a {columns}x{rows} cell board is larger than {max_columns}x{max_rows}")]
    TooLarge {
        columns: i32,
        rows: i32,
        max_columns: i32,
        max_rows: i32,
    },
    #[error("speed {speed} is outside {min}..={max}")]
    SpeedOutOfRange { speed: u32, min: u32, max: u32 },
}

impl Config {
    pub fn board(&self) -> Result<Board, ConfigError> {
        if self.grid <= 0 {
            return Err(ConfigError::InvalidGrid(self.grid));
        }
        for (dimension, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 || value % self.grid != 0 {
                return Err(ConfigError::Misaligned {
                    dimension,
                    value,
                    grid: self.grid,
                });
            }
        }

        let board = Board::new(self.width, self.height, self.grid);
        if board.columns() > MAX_COLUMNS || board.rows() > MAX_ROWS {
            return Err(ConfigError::TooLarge {
                columns: board.columns(),
                rows: board.rows(),
                max_columns: MAX_COLUMNS,
                max_rows: MAX_ROWS,
            });
        }
        if board.area() < 2 {
            return Err(ConfigError::TooSmall);
        }
        Ok(board)
    }

    pub fn speed(&self) -> Result<Speed, ConfigError> {
        if !(MIN_SPEED..=MAX_SPEED).contains(&self.speed) {
            return Err(ConfigError::SpeedOutOfRange {
                speed: self.speed,
                min: MIN_SPEED,
                max: MAX_SPEED,
            });
        }
        Ok(Speed::new(self.speed))
    }
}
