//! Runner configuration. Loaded from `birdspace.json` (or the file named by
//! `BIRDSPACE_CONFIG`) at startup.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use birdspace_core::enums::SceneId;
use birdspace_core::level::LevelDescription;
use birdspace_sim::engine::SimConfig;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "BIRDSPACE_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "birdspace.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// RNG seed handed to the engine.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_viewport")]
    pub viewport_width: f64,
    #[serde(default = "default_viewport")]
    pub viewport_height: f64,
    /// Longest frame delta the engine accepts, in seconds.
    #[serde(default = "default_max_frame_dt")]
    pub max_frame_dt: f64,
    /// Scene rules to run under; also the built-in layout when no level file is given.
    #[serde(default = "default_scene")]
    pub scene: SceneId,
    /// Optional level text file replacing the built-in layout.
    #[serde(default)]
    pub level_path: Option<PathBuf>,
    /// How long the headless runner keeps the loop alive.
    #[serde(default = "default_run_seconds")]
    pub run_seconds: f64,
}

fn default_seed() -> u64 {
    42
}
fn default_viewport() -> f64 {
    600.0
}
fn default_max_frame_dt() -> f64 {
    0.25
}
fn default_scene() -> SceneId {
    SceneId::Battle
}
fn default_run_seconds() -> f64 {
    10.0
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            viewport_width: default_viewport(),
            viewport_height: default_viewport(),
            max_frame_dt: default_max_frame_dt(),
            scene: default_scene(),
            level_path: None,
            run_seconds: default_run_seconds(),
        }
    }
}

impl AppConfig {
    /// Load from `$BIRDSPACE_CONFIG` or `birdspace.json`. A missing file
    /// yields defaults silently; an invalid one logs a warning.
    pub fn load() -> Self {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        let Ok(data) = std::fs::read_to_string(path) else {
            log::debug!("no config at {:?}, using defaults", path);
            return Self::default();
        };
        match serde_json::from_str(&data) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Invalid config at {:?}: {}, using defaults", path, e);
                Self::default()
            }
        }
    }

    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            seed: self.seed,
            max_frame_dt: self.max_frame_dt,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
        }
    }

    /// The external level, if one is configured and parses. Otherwise `None`
    /// and the built-in layout for `scene` is used.
    pub fn level(&self) -> Option<LevelDescription> {
        let path = self.level_path.as_ref()?;
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::warn!("Could not read level {:?}: {}", path, e);
                return None;
            }
        };
        match LevelDescription::parse(&text) {
            Ok(level) => Some(level),
            Err(e) => {
                log::warn!("Could not parse level {:?}: {}", path, e);
                None
            }
        }
    }
}
