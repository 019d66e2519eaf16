//! Configuration system for picklist.
//!
//! Load search configuration from TOML or YAML files to control the numeric
//! targets, the alternative-solution cap and the rounding precision without
//! code changes.
//!
//! # Examples
//!
//! Load configuration from a TOML string:
//!
//! ```
//! use picklist_config::SearchConfig;
//!
//! let config = SearchConfig::from_toml_str(r#"
//!     max_solutions = 10
//!
//!     [targets]
//!     container_count = 2
//!     weight = 10.0
//!     volume = 2.0
//! "#).unwrap();
//!
//! assert_eq!(config.max_solutions, 10);
//! assert_eq!(config.precision, 2);
//! ```
//!
//! Use the default cap and precision when the file omits them:
//!
//! ```
//! use picklist_config::SearchConfig;
//!
//! let config = SearchConfig::load("search.toml").unwrap_or_default();
//! assert_eq!(config.max_solutions, 100);
//! ```

use std::path::{Path, PathBuf};

use picklist_core::SelectionTargets;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default cap on the number of alternative solutions.
pub const DEFAULT_MAX_SOLUTIONS: usize = 100;

/// Default rounding precision in decimal digits.
pub const DEFAULT_PRECISION: u32 = 2;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main search configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SearchConfig {
    /// Numeric targets of the selection problem.
    #[serde(default)]
    pub targets: TargetsConfig,

    /// Cap on accepted alternative solutions. The search performs one extra
    /// solve past the cap, so at most `max_solutions + 1` are written.
    #[serde(default = "default_max_solutions")]
    pub max_solutions: usize,

    /// Decimal digits used when comparing sums against targets.
    #[serde(default = "default_precision")]
    pub precision: u32,

    /// Directory where accepted solutions are stored.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_max_solutions() -> usize {
    DEFAULT_MAX_SOLUTIONS
}

fn default_precision() -> u32 {
    DEFAULT_PRECISION
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            targets: TargetsConfig::default(),
            max_solutions: DEFAULT_MAX_SOLUTIONS,
            precision: DEFAULT_PRECISION,
            output_dir: None,
        }
    }
}

impl SearchConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the targets.
    pub fn with_targets(mut self, targets: TargetsConfig) -> Self {
        self.targets = targets;
        self
    }

    /// Sets the alternative-solution cap.
    pub fn with_max_solutions(mut self, max_solutions: usize) -> Self {
        self.max_solutions = max_solutions;
        self
    }

    /// Sets the rounding precision.
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Checks the configuration for values the search cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.container_count == 0 {
            return Err(ConfigError::Invalid(
                "targets.container_count must be at least 1".into(),
            ));
        }
        if !self.targets.weight.is_finite() || !self.targets.volume.is_finite() {
            return Err(ConfigError::Invalid(
                "targets.weight and targets.volume must be finite".into(),
            ));
        }
        Ok(())
    }
}

/// Numeric targets section.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TargetsConfig {
    /// Exact number of containers to select.
    #[serde(default)]
    pub container_count: u32,

    /// Exact summed cylinder weight, in grams.
    #[serde(default)]
    pub weight: f64,

    /// Exact summed cylinder volume, in mL.
    #[serde(default)]
    pub volume: f64,
}

impl TargetsConfig {
    /// Converts to the core targets type.
    pub fn to_targets(self) -> SelectionTargets {
        SelectionTargets {
            container_count: self.container_count,
            weight: self.weight,
            volume: self.volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toml_parsing() {
        let toml = r#"
            max_solutions = 5
            precision = 3
            output_dir = "out"

            [targets]
            container_count = 2
            weight = 10.0
            volume = 2.0
        "#;

        let config = SearchConfig::from_toml_str(toml).unwrap();
        assert_eq!(config.max_solutions, 5);
        assert_eq!(config.precision, 3);
        assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        assert_eq!(config.targets.container_count, 2);
        assert_eq!(config.targets.weight, 10.0);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
            max_solutions: 5
            targets:
              container_count: 2
              weight: 10.0
              volume: 2.0
        "#;

        let config = SearchConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.max_solutions, 5);
        assert_eq!(config.targets.volume, 2.0);
    }

    #[test]
    fn test_defaults() {
        let config = SearchConfig::from_toml_str("[targets]\ncontainer_count = 1").unwrap();
        assert_eq!(config.max_solutions, DEFAULT_MAX_SOLUTIONS);
        assert_eq!(config.precision, DEFAULT_PRECISION);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn test_builder() {
        let config = SearchConfig::new()
            .with_max_solutions(7)
            .with_precision(1)
            .with_output_dir("solutions");

        assert_eq!(config.max_solutions, 7);
        assert_eq!(config.precision, 1);
        assert_eq!(config.output_dir, Some(PathBuf::from("solutions")));
    }

    #[test]
    fn test_validate_rejects_zero_containers() {
        let config = SearchConfig::default();
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = config.with_targets(TargetsConfig {
            container_count: 1,
            weight: 4.0,
            volume: 3.0,
        });
        assert!(config.validate().is_ok());
    }
}
