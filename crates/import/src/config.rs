use serde::{Deserialize, Serialize};
use std::path::Path;
use tally_core::{Money, SentinelLabels};
use thiserror::Error;

use crate::builder::DEFAULT_DATE_FORMATS;
use crate::line::LineShape;
use crate::rules::CategoryRule;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid pattern for line shape '{shape}': {message}")]
    InvalidPattern { shape: String, message: String },
    #[error("Line shape '{shape}' has no named group '{group}'")]
    MissingGroup { shape: String, group: String },
    #[error("At least one line shape is required")]
    NoShapes,
    #[error("At least one date format is required")]
    NoDateFormats,
}

/// Everything the pipeline needs that is data rather than code.
///
/// ```toml
/// outlier_cutoff = "5.00"
/// date_formats = ["%d %b %Y", "%d/%m/%Y"]
///
/// [labels]
/// unclassified = "in unknown"
/// unclassified_debit = "unknown"
///
/// [[rules]]
/// kind = "contains"
/// pattern = "GITHUB.COM"
/// label = "Computers"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub shapes: Vec<LineShape>,
    pub date_formats: Vec<String>,
    pub rules: Vec<CategoryRule>,
    pub outlier_cutoff: Money,
    pub labels: SentinelLabels,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            shapes: LineShape::defaults(),
            date_formats: DEFAULT_DATE_FORMATS.iter().map(|f| f.to_string()).collect(),
            rules: Vec::new(),
            outlier_cutoff: Money::from_cents(500),
            labels: SentinelLabels::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml(toml_content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}
