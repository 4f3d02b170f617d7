use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional settings file, read from the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Dashboard settings. Every key in `dashboard.json` is optional:
///
/// ```json
/// { "data_path": "all_data.csv", "window_width": 1400, "chart_height": 220 }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Observation file loaded at startup and on Reload.
    pub data_path: PathBuf,
    pub window_width: f32,
    pub window_height: f32,
    /// Height of each line-chart panel.
    pub chart_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("all_data.csv"),
            window_width: 1400.0,
            window_height: 900.0,
            chart_height: 240.0,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }
}
