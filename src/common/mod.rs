/// Grid coordinates and movement directions.
pub mod cell;

/// Error types for grid construction and configuration.
pub mod error;

/// Traits shared by the search algorithms and heuristics.
pub mod traits;

pub use cell::{Cell, Direction};
pub use error::{ConfigError, GridError};
