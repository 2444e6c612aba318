//! Configuration management for the savings calculator
//!
//! Config stored at: ~/.config/ecotruck-calculator/config.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use ecotruck_domain::PercentageDefaults;
use ecotruck_types::{ConfigError, OutputFormat, Result};

const APP_DIR: &str = "ecotruck-calculator";
const CONFIG_FILE: &str = "config.json";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Store directory override
    #[serde(default)]
    pub store_dir: Option<PathBuf>,

    /// Default output format (json, table)
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Percentages applied when a submission leaves them out
    #[serde(default)]
    pub percentage_defaults: PercentageDefaults,

    /// Calculations per page in listings
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_dir: None,
            output_format: default_output_format(),
            percentage_defaults: PercentageDefaults::default(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Get the store directory path
    pub fn store_dir(&self) -> Result<PathBuf> {
        if let Some(ref dir) = self.store_dir {
            return Ok(dir.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or(ConfigError::NotFound)?
            .join(APP_DIR);
        Ok(data_dir)
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from an explicit path, or default when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;
            config
                .check_ranges()
                .map_err(|msg| ConfigError::ParseError(format!("{}: {}", path.display(), msg)))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Check value ranges that serde cannot express
    pub fn validate(&self) -> Result<()> {
        self.check_ranges().map_err(ConfigError::ParseError)?;
        Ok(())
    }

    fn check_ranges(&self) -> std::result::Result<(), String> {
        let defaults = &self.percentage_defaults;
        for (name, value) in [
            ("fuel_savings", defaults.fuel_savings),
            ("cpk_improvement", defaults.cpk_improvement),
            ("carcass_savings", defaults.carcass_savings),
        ] {
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(format!(
                    "percentage_defaults.{} must be between 0 and 100, got {}",
                    name, value
                ));
            }
        }
        if self.page_size == 0 {
            return Err("page_size must be at least 1".to_string());
        }
        Ok(())
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "EcoTruck Calculator Configuration")?;
        writeln!(f, "=================================")?;
        writeln!(f)?;
        writeln!(
            f,
            "Store dir:         {}",
            self.store_dir()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|_| "(error)".to_string())
        )?;
        writeln!(f, "Output format:     {}", self.output_format)?;
        writeln!(f, "Page size:         {}", self.page_size)?;
        writeln!(
            f,
            "Fuel savings:      {}%",
            self.percentage_defaults.fuel_savings
        )?;
        writeln!(
            f,
            "CPK improvement:   {}%",
            self.percentage_defaults.cpk_improvement
        )?;
        writeln!(
            f,
            "Carcass savings:   {}%",
            self.percentage_defaults.carcass_savings
        )?;

        if let Ok(path) = Self::config_path() {
            writeln!(f)?;
            writeln!(f, "Config file:       {}", path.display())?;
        }

        Ok(())
    }
}
