/// Provides common definitions used across the crate
pub mod common;

/// Provides individual search algorithm implementations
pub mod algorithms;

/// Provides helper methods to simplify using algorithms
pub mod utils;

/// Provides the grid contract the agent runs against, and an in-memory grid
pub mod environment;

/// Provides the task-seeking agent and its search strategies
pub mod agent;

/// Provides configuration for the driving loop
pub mod config;
