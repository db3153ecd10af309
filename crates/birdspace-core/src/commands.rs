//! Input and commands fed to the simulation.
//!
//! `InputFrame` is polled once per frame by the driver. `SimCommand`s are
//! queued and processed at the next tick boundary.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::enums::SceneId;
use crate::level::LevelDescription;

/// Logical key names. The windowing layer maps physical keys onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    /// Throttle up / walk up (`w`).
    Forward,
    /// Throttle down / walk down (`s`).
    Back,
    /// Turn left / walk left (`a`).
    Left,
    /// Turn right / walk right (`d`).
    Right,
    /// Enter or leave a vehicle (`Return`).
    Interact,
}

/// Mouse state in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MouseState {
    pub x: f64,
    pub y: f64,
    pub left: bool,
    pub right: bool,
    /// Wheel delta since the last frame; negative zooms out.
    pub scroll: f64,
}

/// Input snapshot for one frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Keys currently held.
    pub keys: BTreeSet<Key>,
    pub mouse: MouseState,
}

impl InputFrame {
    pub fn held(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn with_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            mouse: MouseState::default(),
        }
    }
}

/// Discrete commands from the driver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Clear the registry and populate it from a built-in scene.
    LoadScene { scene: SceneId },
    /// Clear the registry and populate it from an external level description,
    /// running it under the rules of `scene`.
    LoadLevel {
        level: LevelDescription,
        scene: SceneId,
    },
    /// Window resized (pixels).
    Resize { width: f64, height: f64 },
    Pause,
    Resume,
}
