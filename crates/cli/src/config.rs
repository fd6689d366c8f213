//! Configuration file support for catalog queries

use anyhow::{Context, Result};
use brickset_formats::DatasetFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Catalog used when neither the command line nor a config file names one
pub const DEFAULT_DATASET: &str = "brickset.json";

/// Complete query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryConfig {
    pub dataset: DatasetConfig,
}

/// Where the catalog lives and how it is encoded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub path: String,
    /// Overrides extension-based detection
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<DatasetFormat>,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            dataset: DatasetConfig {
                path: DEFAULT_DATASET.to_string(),
                format: None,
            },
        }
    }
}

impl QueryConfig {
    /// Load configuration from a file (YAML or TOML)
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        match extension {
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            "toml" => toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            _ => Err(anyhow::anyhow!(
                "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                extension
            )),
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let extension = path.extension().and_then(|s| s.to_str()).unwrap_or("");

        let content = match extension {
            "yaml" | "yml" => serde_yaml::to_string(self)?,
            "toml" => toml::to_string_pretty(self)?,
            _ => {
                return Err(anyhow::anyhow!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .toml",
                    extension
                ))
            }
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }
}

/// A resolved catalog location
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSource {
    pub path: PathBuf,
    pub format: Option<DatasetFormat>,
}

/// Pick the catalog to read: command-line flags win over the config file,
/// which wins over [`DEFAULT_DATASET`].
pub fn resolve_source(
    data: Option<PathBuf>,
    format: Option<DatasetFormat>,
    config: Option<&QueryConfig>,
) -> DatasetSource {
    let path = data
        .or_else(|| config.map(|c| PathBuf::from(&c.dataset.path)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET));
    let format = format.or_else(|| config.and_then(|c| c.dataset.format));

    DatasetSource { path, format }
}
