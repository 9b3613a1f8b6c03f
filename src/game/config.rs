use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Largest accepted grid side for random generation
pub const MAX_GRID_SIDE: usize = 1024;

/// Configuration for a simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid rows for random generation, fence included
    pub rows: usize,
    /// Grid columns for random generation, fence included
    pub cols: usize,
    /// Food items scattered at generation time
    pub food_count: usize,
    /// Extra interior walls requested at generation time
    pub wall_count: usize,
    /// Wall placement attempts allowed per requested wall
    pub wall_attempts_per_wall: usize,

    /// Chance per tick of turning even when straight ahead is safe
    pub turn_probability: f64,
    /// Food eaten that ends the run as a win
    pub win_threshold: u32,

    /// Delay between ticks in milliseconds
    pub tick_interval_ms: u64,
    /// Seed for deterministic replay; random when absent
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            food_count: 10,
            wall_count: 10,
            wall_attempts_per_wall: 4,
            turn_probability: 0.1,
            win_threshold: 20,
            tick_interval_ms: 100,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration with custom grid size
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Default::default()
        }
    }

    /// Load a configuration from a JSON file. Missing fields take their
    /// default values.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    /// Validate configuration parameters
    ///
    /// # Returns
    ///
    /// `Ok(())` if all parameters are valid, `Err(String)` with an error message otherwise.
    pub fn validate(&self) -> Result<(), String> {
        if self.rows < 3 || self.cols < 3 {
            return Err(format!(
                "grid must be at least 3x3 to hold a fence and one interior cell, got {}x{}",
                self.rows, self.cols
            ));
        }

        if self.rows > MAX_GRID_SIDE || self.cols > MAX_GRID_SIDE {
            return Err(format!(
                "grid sides must not exceed {MAX_GRID_SIDE}, got {}x{}",
                self.rows, self.cols
            ));
        }

        let area = self.interior_area();
        if self.food_count > area {
            return Err(format!(
                "food_count ({}) cannot exceed the {area} interior cells",
                self.food_count
            ));
        }

        if self.wall_count > area {
            return Err(format!(
                "wall_count ({}) cannot exceed the {area} interior cells",
                self.wall_count
            ));
        }

        if !(0.0..=1.0).contains(&self.turn_probability) {
            return Err(format!(
                "turn_probability must be in [0, 1], got {}",
                self.turn_probability
            ));
        }

        if self.win_threshold == 0 {
            return Err("win_threshold must be at least 1".to_string());
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".to_string());
        }

        Ok(())
    }

    /// Interior cells available to random generation
    pub fn interior_area(&self) -> usize {
        self.rows
            .saturating_sub(2)
            .saturating_mul(self.cols.saturating_sub(2))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = SimulationConfig::default();
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 20);
        assert_eq!(config.food_count, 10);
        assert_eq!(config.wall_count, 10);
        assert_eq!(config.win_threshold, 20);
        assert_eq!(config.turn_probability, 0.1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = SimulationConfig::new(8, 12);
        assert_eq!(config.rows, 8);
        assert_eq!(config.cols, 12);
        assert_eq!(config.interior_area(), 60);
    }

    #[test]
    fn test_validation_errors() {
        let mut config = SimulationConfig::new(2, 10);
        assert!(config.validate().is_err());

        config = SimulationConfig::default();
        config.turn_probability = 1.5;
        assert!(config.validate().is_err());

        config = SimulationConfig::default();
        config.win_threshold = 0;
        assert!(config.validate().is_err());

        config = SimulationConfig::default();
        config.tick_interval_ms = 0;
        assert!(config.validate().is_err());

        config = SimulationConfig::new(MAX_GRID_SIDE + 1, 10);
        assert!(config.validate().is_err());

        config = SimulationConfig::new(usize::MAX, usize::MAX);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_counts_bounded_by_interior() {
        let mut config = SimulationConfig::new(6, 6);
        config.food_count = 16;
        config.wall_count = 16;
        assert!(config.validate().is_ok());

        config.food_count = 17;
        assert!(config.validate().is_err());

        config.food_count = 1;
        config.wall_count = usize::MAX / 2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "rows": 12, "seed": 99, "turn_probability": 0.25 }}"#).unwrap();

        let config = SimulationConfig::load(file.path()).unwrap();
        assert_eq!(config.rows, 12);
        assert_eq!(config.cols, 20);
        assert_eq!(config.seed, Some(99));
        assert_eq!(config.turn_probability, 0.25);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SimulationConfig::load(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
