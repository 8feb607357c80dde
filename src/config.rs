use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Root configuration structure, deserialized from `.ackack/config.toml`.
///
/// Every key is optional; missing keys fall back to the built-in defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Folder auto-detection settings.
    pub locate: LocateConfig,
    /// License scanning settings.
    pub scan: ScanConfig,
}

/// Names used when the input or output folder is not given on the command line.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LocateConfig {
    /// Folder holding the dependency checkouts, relative to the project root.
    pub input: String,
    /// Settings bundle that receives the generated documents.
    pub output: String,
    /// Dependency manifests whose presence lets the search continue upward.
    pub markers: Vec<String>,
}

impl Default for LocateConfig {
    fn default() -> Self {
        Self {
            input: "Carthage/Checkouts".to_string(),
            output: "Settings.bundle".to_string(),
            markers: vec!["Cartfile".to_string(), "Podfile".to_string()],
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory depth below the input folder at which files are ignored.
    pub max_depth: usize,
    /// Case-insensitive filename suffixes that identify a license file.
    pub license_names: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_depth: 1,
            license_names: vec![
                "license".to_string(),
                "license.txt".to_string(),
                "license.md".to_string(),
            ],
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<start_dir>/.ackack/config.toml`
/// 3. `~/.config/ackack/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(start_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        return read_config(path);
    }

    let project_config = start_dir.join(".ackack").join("config.toml");
    if project_config.is_file() {
        return read_config(&project_config);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("ackack").join("config.toml");
        if home_config.is_file() {
            return read_config(&home_config);
        }
    }

    Ok(Config::default())
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = toml::from_str(&content)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
