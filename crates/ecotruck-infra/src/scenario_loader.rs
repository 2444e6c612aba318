//! Load calculator submissions from JSON or TOML files

use std::path::Path;

use tracing::debug;

use ecotruck_domain::model::{AdditionalGain, CalculatorForm};
use ecotruck_types::{Error, Result};

/// Scenario file format, picked from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFormat {
    Json,
    Toml,
}

impl ScenarioFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("json") => Ok(ScenarioFormat::Json),
            Some("toml") => Ok(ScenarioFormat::Toml),
            _ => Err(Error::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse a submitted form from text
pub fn parse_form(content: &str, format: ScenarioFormat) -> Result<CalculatorForm> {
    let form = match format {
        ScenarioFormat::Json => serde_json::from_str(content)?,
        ScenarioFormat::Toml => toml::from_str(content)?,
    };
    Ok(form)
}

/// Read a submitted form from a `.json` or `.toml` file
pub fn load_form(path: &Path) -> Result<CalculatorForm> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let format = ScenarioFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), ?format, "loading scenario");
    parse_form(&content, format)
}

/// Read additional gains from a JSON array file
pub fn load_additional_gains(path: &Path) -> Result<Vec<AdditionalGain>> {
    if !path.exists() {
        return Err(Error::FileNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let gains: Vec<AdditionalGain> = serde_json::from_str(&content)?;
    debug!(path = %path.display(), count = gains.len(), "loaded additional gains");
    Ok(gains)
}
