use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use eqn_typeset::{Container, DEFAULT_TARGET_FRACTION};
use tracing::warn;

pub const CONFIG_FILE: &str = "eqn_config.toml";
pub const HISTORY_FILE: &str = ".eqn_history";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EqnConfig {
    /// Fraction of the container the text grows to fill.
    pub target_fraction: f64,
    /// Font size the equation is typeset at before fitting, in points.
    pub initial_font_size: f64,
    pub container_width: f64,
    pub container_height: f64,
    /// Size of one terminal cell in points.
    pub cell_width_pt: f64,
    pub cell_height_pt: f64,
    /// Bare call that views the previous statement.
    pub directive: String,
    pub history_size: usize,
}

impl Default for EqnConfig {
    fn default() -> Self {
        Self {
            target_fraction: DEFAULT_TARGET_FRACTION,
            initial_font_size: 10.0,
            container_width: 560.0,
            container_height: 420.0,
            cell_width_pt: 7.0,
            cell_height_pt: 14.0,
            directive: "eqn".to_string(),
            history_size: 100,
        }
    }
}

impl EqnConfig {
    /// Load `eqn_config.toml` from the working directory.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Load from `path`; a missing or unreadable file yields the defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => return config,
                Err(e) => warn!(path = %path.display(), error = %e, "invalid config, using defaults"),
            },
            Err(e) => warn!(path = %path.display(), error = %e, "unreadable config, using defaults"),
        }
        Self::default()
    }

    pub fn container(&self) -> Container {
        Container::new(self.container_width, self.container_height)
    }

    /// `~/.eqn_history`, or the working directory when there is no home.
    pub fn history_path(&self) -> PathBuf {
        dirs::home_dir()
            .map(|p| p.join(HISTORY_FILE))
            .unwrap_or_else(|| PathBuf::from(HISTORY_FILE))
    }
}
