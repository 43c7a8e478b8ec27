//! A module for loading and validating the run configuration of a damage assessment.

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{FatigueError, Result};
use crate::material::Material;

/// Represents the configuration of a damage assessment run.
///
/// Every section falls back to its default when missing from the file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub histogram: Histogram,
    pub window: Window,
    pub material: Material,
}

impl Config {
    /// Validates the entire configuration.
    ///
    /// This method checks the validity of each section and returns the first
    /// problem found.
    pub fn validate(&self) -> Result<()> {
        self.histogram.validate()?;
        self.window.validate()?;
        self.material.validate()?;
        Ok(())
    }
}

/// Represents the binning of rainflow ranges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Histogram {
    /// Width of each range bin, in the unit of the stress signal.
    pub width: f64,
}

impl Default for Histogram {
    fn default() -> Self {
        Histogram { width: 10.0 }
    }
}

impl Histogram {
    /// Validates that the bin width is a positive, finite number.
    ///
    /// # Examples
    ///
    /// ```
    /// use fatigue_damage::config::Histogram;
    ///
    /// assert!(Histogram { width: 2.5 }.validate().is_ok());
    /// assert!(Histogram { width: 0.0 }.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(FatigueError::InvalidConfiguration(format!(
                "width must be greater than 0.0, got {}",
                self.width
            )));
        }
        Ok(())
    }
}

/// Represents the growing-prefix damage history.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Window {
    /// Number of leading samples reported as zero damage before the first rerun.
    pub start: usize,
}

impl Default for Window {
    fn default() -> Self {
        Window { start: 20 }
    }
}

impl Window {
    pub fn validate(&self) -> Result<()> {
        if self.start == 0 {
            return Err(FatigueError::InvalidConfiguration(
                "start must be at least 1, got 0".into(),
            ));
        }
        Ok(())
    }
}

/// Loads the configuration from a YAML or TOML file.
///
/// Files ending in `.toml` are read as TOML, anything else as YAML.
///
/// # Errors
///
/// This function will return an error if reading or parsing the configuration file fails.
/// The configuration is not validated here, call [`Config::validate`] once any
/// command line overrides are applied.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> anyhow::Result<Config> {
    let path = config_path.as_ref();
    let content = fs::read_to_string(path)?;
    let is_toml = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("toml"));
    let config = if is_toml {
        toml::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_config() {
        let config_path = "tests/config.yaml";
        let config = load_config(config_path).expect("Failed to load config");
        assert!(
            config.validate().is_ok(),
            "Expected Ok(()) but got Err with {:?}",
            config.validate()
        );
        assert_relative_eq!(config.histogram.width, 10.0);
        assert_eq!(config.window.start, 20);
        assert_eq!(config.material.name, "S355");
        assert_relative_eq!(config.material.ultimate_stress, 865.0);
        assert_relative_eq!(config.material.fatigue.slope, 8.0);
        assert_relative_eq!(config.material.fatigue.knee_cycles, 2.0e6);
    }

    #[test]
    fn test_load_toml_config() {
        let config = load_config("tests/config.toml").expect("Failed to load config");
        assert!(config.validate().is_ok());
        assert_relative_eq!(config.histogram.width, 5.0);
        assert_eq!(config.window.start, 1);
        assert_relative_eq!(config.material.ultimate_stress, 500.0);
        assert_relative_eq!(config.material.fatigue.slope, 5.0);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config() {
        let config: Config = serde_yaml::from_str("window:\n  start: 0\n").unwrap();
        assert!(matches!(config.validate(), Err(FatigueError::InvalidConfiguration(_))));
        let config: Config = serde_yaml::from_str("histogram:\n  width: -3.0\n").unwrap();
        assert!(matches!(config.validate(), Err(FatigueError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_missing_config_file() {
        assert!(load_config("tests/does-not-exist.yaml").is_err());
    }
}
