//! Game settings and preferences
//!
//! Read from a JSON file next to the binary. Every field has a default, so a
//! partial file (or no file at all) is fine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::PlayConfig;

/// File looked up when no path is given on the command line
pub const DEFAULT_SETTINGS_FILE: &str = "pitfall.json";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed simulation/draw rate
    pub fps: u32,
    /// Seed for the first play session; later sessions derive from it
    pub seed: u64,
    /// Where progression is saved
    pub save_path: PathBuf,

    // === Gameplay ===
    /// Coins per pickup before multipliers
    pub coin_reward: u64,
    /// Placement retries per entity before level generation gives up
    pub max_placement_attempts: u32,
    /// Frames the headless demo runs before quitting
    pub demo_frames: u64,

    // === Audio ===
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: FPS,
            seed: 0,
            save_path: PathBuf::from("save.pitfall"),

            coin_reward: BASE_COIN_REWARD,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
            demo_frames: 60 * u64::from(FPS),

            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            muted: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or unreadable
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    log::warn!("Could not read {}: {e}", path.display());
                }
                log::info!("Using default settings");
                return Self::default();
            }
        };

        match serde_json::from_str::<Settings>(&text) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or break the game loop
    pub fn sanitized(mut self) -> Self {
        self.fps = self.fps.max(1);
        self.max_placement_attempts = self.max_placement_attempts.max(1);
        self.master_volume = self.master_volume.clamp(0.0, 1.0);
        self.sfx_volume = self.sfx_volume.clamp(0.0, 1.0);
        self.music_volume = self.music_volume.clamp(0.0, 1.0);
        self
    }

    /// Seconds per frame
    pub fn frame_time(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Session tunables for a play session started with `seed`
    pub fn play_config(&self, seed: u64) -> PlayConfig {
        PlayConfig {
            seed,
            coin_reward: self.coin_reward,
            max_placement_attempts: self.max_placement_attempts,
        }
    }
}
