//! Game settings and tuning
//!
//! Every field has a default, so a settings file only needs the values it
//! overrides.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::Path;

/// Per-frame physics constants (units are pixels and pixels per frame).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Physics {
    /// Added to vertical velocity every frame
    pub gravity: f64,
    /// Multiplier applied to horizontal velocity every frame
    pub friction: f64,
    /// Horizontal speed set by the left/right keys
    pub move_speed: f64,
    /// Vertical velocity set by a jump (negative is up)
    pub jump_impulse: f64,
}

impl Default for Physics {
    fn default() -> Self {
        Self {
            gravity: 0.5,
            friction: 0.9,
            move_speed: 5.0,
            jump_impulse: -12.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub physics: Physics,

    /// Start on the title screen. When false the game goes straight to play.
    pub show_title_screen: bool,
    /// Rebuild the world when the viewport is resized on the title screen.
    /// Resizing while playing always rebuilds.
    pub rebuild_on_title_resize: bool,

    pub title: String,
    pub menu_items: Vec<String>,

    pub decoration_seed: u64,
    pub decoration_count: usize,

    /// Background image URL for the title screen (web only)
    pub background_image: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            physics: Physics::default(),
            show_title_screen: true,
            rebuild_on_title_resize: false,
            title: "Ball Platformer".to_string(),
            menu_items: ["Play", "Options", "Credits", "Quit"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            decoration_seed: 7,
            decoration_count: 6,
            background_image: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> io::Result<Self> {
        serde_json::from_str(json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    pub fn load(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> io::Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}
