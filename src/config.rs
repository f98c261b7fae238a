// Optional YAML configuration

use crate::filter::SortBy;
use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "taskboard";
const CONFIG_FILE: &str = "taskboard.yml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Name used in the dashboard greeting
    pub user_name: Option<String>,
    /// Sort applied when a filter request doesn't choose one
    pub default_sort: Option<SortBy>,
    /// JSONL file to seed the store from instead of the demo tasks
    pub tasks_file: Option<PathBuf>,
    pub color: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            user_name: None,
            default_sort: None,
            tasks_file: None,
            color: true,
        }
    }
}

impl Config {
    /// Load from an explicit path, or from the default location if it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_file(path),
            None => match default_path() {
                Some(path) if path.exists() => Self::load_file(&path),
                _ => {
                    debug!("No config file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Config =
            serde_yaml::from_str(&content).with_context(|| format!("Failed to parse config file {:?}", path))?;
        debug!(file = ?path, ?config, "Loaded config");
        Ok(config)
    }
}

/// `<config dir>/taskboard/taskboard.yml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}
