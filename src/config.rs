use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::archive::DEFAULT_OUTPUT_DIR;

const CONFIG_BASENAME: &str = "gitlab-auditor";

/// Configuration file structure.
///
/// Supplies defaults for values that are tedious to repeat on every run.
/// Command-line flags and environment variables take precedence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    #[serde(default)]
    pub gitlab: GitLabConfig,

    #[serde(default)]
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitLabConfig {
    /// GitLab personal access token (read access is enough)
    pub token: Option<String>,

    /// GitLab instance URL, without the `/api/v4` suffix
    pub instance_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScanConfig {
    /// Root directory for the per-project trace folders
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Maximum in-flight trace downloads per project
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Remove the output directory before scanning
    #[serde(default)]
    pub clean: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            concurrency: default_concurrency(),
            clean: false,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_concurrency() -> usize {
    1
}

impl Config {
    /// Load configuration from a file.
    ///
    /// Searches for configuration files in this order:
    /// 1. Specified path
    /// 2. ./gitlab-auditor.toml
    /// 3. ./gitlab-auditor.json
    /// 4. ./gitlab-auditor.yaml
    /// 5. ./gitlab-auditor.yml
    /// 6. `<user config dir>/gitlab-auditor/config.toml`
    ///
    /// Returns default configuration if no file is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load_from_path(path);
        }

        let candidates = ["toml", "json", "yaml", "yml"]
            .iter()
            .map(|ext| PathBuf::from(format!("{CONFIG_BASENAME}.{ext}")))
            .chain(dirs::config_dir().map(|dir| dir.join(CONFIG_BASENAME).join("config.toml")));

        for candidate in candidates {
            if candidate.exists() {
                log::debug!("Loading configuration from {}", candidate.display());
                return Self::load_from_path(&candidate);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file path.
    fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        match extension {
            "toml" => toml::from_str(&contents)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display())),
            "json" => serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display())),
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .with_context(|| format!("Failed to parse YAML config: {}", path.display())),
            _ => toml::from_str(&contents)
                .or_else(|_| serde_json::from_str(&contents))
                .or_else(|_| serde_yaml::from_str(&contents))
                .with_context(|| format!("Failed to parse config file: {}", path.display())),
        }
    }
}
