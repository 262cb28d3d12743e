//! Settings types.

use crate::format::OutputFormat;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the resource loaded when none is given.
pub const DEFAULT_RESOURCE_NAME: &str = "contributions_light";

/// Extension appended to resource names.
pub const DEFAULT_EXTENSION: &str = "json";

/// Tool settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub resources: ResourcesConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Resource lookup settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Directory searched before every other tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Extension appended to resource names, without the dot.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Resource used when a command is given no name.
    #[serde(default = "default_resource_name")]
    pub default_name: String,

    /// Fall back to resources compiled into the binary.
    #[serde(default = "default_true")]
    pub embedded: bool,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
            default_name: default_resource_name(),
            embedded: true,
        }
    }
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_resource_name() -> String {
    DEFAULT_RESOURCE_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
}

impl Config {
    /// Load settings from a single YAML file, without tier merging.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}
