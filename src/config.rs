use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::agent::SearchAlgorithm;
use crate::common::error::{ConfigError, ConfigResult};
use crate::common::Cell;

/// Settings for the `task_runner` driving loop.
///
/// Every field has a default, so a configuration file only needs to name
/// what it changes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub grid: GridConfig,
    pub agent: AgentConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub width: u32,
    pub height: u32,
    pub barrier_count: usize,
    pub task_count: usize,
    pub seed: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub algorithm: SearchAlgorithm,
    pub start: Cell,
    /// Node expansions allowed per search call.
    pub max_ops: u32,
    /// The loop stops after this many ticks even if tasks remain.
    pub max_ticks: u64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            barrier_count: 60,
            task_count: 10,
            seed: 0,
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            algorithm: SearchAlgorithm::AStar,
            start: Cell::new(0, 0),
            max_ops: 1_000_000,
            max_ticks: 10_000,
        }
    }
}

impl RunnerConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    ///
    /// # Example
    /// ```rust
    /// use gridtask_pathfinding::agent::SearchAlgorithm;
    /// use gridtask_pathfinding::config::RunnerConfig;
    ///
    /// let config = RunnerConfig::from_toml_str(
    ///     r#"
    ///     [grid]
    ///     width = 8
    ///     height = 8
    ///     barrier_count = 10
    ///
    ///     [agent]
    ///     algorithm = "idastar"
    ///     "#,
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(config.grid.width, 8);
    /// assert_eq!(config.agent.algorithm, SearchAlgorithm::IdaStar);
    /// assert_eq!(config.agent.max_ticks, 10_000);
    /// ```
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: RunnerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings the runner can't build a grid from.
    pub fn validate(&self) -> ConfigResult<()> {
        let grid = &self.grid;
        if grid.width == 0 || grid.height == 0 {
            return Err(ConfigError::Invalid {
                reason: format!("grid must not be empty, got {}x{}", grid.width, grid.height),
            });
        }

        let start = self.agent.start;
        if start.x < 0
            || start.y < 0
            || start.x as u32 >= grid.width
            || start.y as u32 >= grid.height
        {
            return Err(ConfigError::Invalid {
                reason: format!("agent start {} is outside the grid", start),
            });
        }

        // The start cell is always kept clear
        let free_cells = (grid.width as u64 * grid.height as u64).saturating_sub(1);
        let requested = grid.barrier_count as u64 + grid.task_count as u64;
        if requested > free_cells {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "{} barriers and {} tasks don't fit in {} free cells",
                    grid.barrier_count, grid.task_count, free_cells
                ),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = RunnerConfig::from_toml_str("").unwrap();
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn start_cell_is_parsed() {
        let config = RunnerConfig::from_toml_str(
            r#"
            [agent]
            start = { x = 3, y = 4 }
            max_ops = 500
            "#,
        )
        .unwrap();

        assert_eq!(config.agent.start, Cell::new(3, 4));
        assert_eq!(config.agent.max_ops, 500);
        assert_eq!(config.agent.algorithm, SearchAlgorithm::AStar);
    }

    #[test]
    fn rejects_empty_grid() {
        let err = RunnerConfig::from_toml_str("[grid]\nwidth = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_start_outside_grid() {
        let err = RunnerConfig::from_toml_str(
            "[grid]\nwidth = 4\nheight = 4\n[agent]\nstart = { x = 4, y = 0 }",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn rejects_overfull_grid() {
        let err = RunnerConfig::from_toml_str(
            "[grid]\nwidth = 3\nheight = 3\nbarrier_count = 5\ntask_count = 4",
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        // Exactly full is fine
        assert!(RunnerConfig::from_toml_str(
            "[grid]\nwidth = 3\nheight = 3\nbarrier_count = 4\ntask_count = 4",
        )
        .is_ok());
    }

    #[test]
    fn parse_errors_are_reported() {
        let err = RunnerConfig::from_toml_str("[agent]\nalgorithm = \"bfs\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RunnerConfig::from_file("does/not/exist.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
