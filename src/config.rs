//! Configuration parsing for pydock.toml files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::images;

/// Root configuration structure matching the pydock.toml schema.
///
/// Every section is optional; an absent file yields the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub workspace: WorkspaceConfig,
    #[serde(default)]
    pub images: ImagesConfig,
    #[serde(default)]
    pub container: ContainerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Staging directory the image is built from. Replaced on every run.
    #[serde(default = "default_workspace_dir")]
    pub dir: PathBuf,
    /// The source file the generated image executes.
    #[serde(default = "default_entry_file")]
    pub entry_file: String,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            dir: default_workspace_dir(),
            entry_file: default_entry_file(),
        }
    }
}

fn default_workspace_dir() -> PathBuf {
    std::env::temp_dir().join("pydock-workspace")
}

fn default_entry_file() -> String {
    "app.py".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImagesConfig {
    /// Base images tried in order until one builds and runs.
    #[serde(default = "images::default_candidates")]
    pub candidates: Vec<String>,
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            candidates: images::default_candidates(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Seconds to wait for a container to stop before it is killed.
    #[serde(default = "default_stop_timeout_secs")]
    pub stop_timeout_secs: i64,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            stop_timeout_secs: default_stop_timeout_secs(),
        }
    }
}

fn default_stop_timeout_secs() -> i64 {
    10
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }

    /// Load `pydock.toml` from the current directory if present, otherwise
    /// return the defaults.
    pub fn discover() -> Result<Self> {
        let default_path = PathBuf::from("pydock.toml");
        if default_path.exists() {
            Self::from_file(&default_path)
        } else {
            Ok(Self::default())
        }
    }
}
