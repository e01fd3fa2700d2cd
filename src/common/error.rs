use thiserror::Error;

use super::Cell;

/// Errors raised while building or populating a [GridWorld](crate::environment::GridWorld).
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell {0} is outside the grid")]
    OutOfBounds(Cell),

    #[error("Cell {0} is a barrier")]
    Barrier(Cell),

    #[error("Cell {0} already holds a task")]
    TaskOccupied(Cell),

    #[error("Unexpected character {ch:?} at line {line}, column {column}")]
    MalformedMap { line: usize, column: usize, ch: char },

    #[error("Map row {line} has width {found}, expected {expected}")]
    RaggedMap {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("Not enough free cells: requested {requested}, available {available}")]
    NotEnoughSpace { requested: usize, available: usize },
}

/// Errors raised while loading a [RunnerConfig](crate::config::RunnerConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {reason}")]
    Invalid { reason: String },
}

pub type GridResult<T> = Result<T, GridError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
