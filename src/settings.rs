//! Timing and volume tuning
//!
//! Loaded from a JSON file next to the level data; any field left out keeps
//! its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Scene tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Timers (seconds) ===
    /// Length of the level fade-in and fade-out
    pub fade_duration: f32,
    /// Time between death and respawn
    pub death_duration: f32,
    /// Celebration level runtime before its closing fade
    pub victory_duration: f32,

    // === Motion ===
    /// Camera pan speed (units/s)
    pub camera_speed: f32,
    /// Actor starting velocity (units/s)
    pub actor_velocity: Vec2,
    /// Actor bounding box size
    pub actor_size: Vec2,
    /// Upper bound on movement substeps per frame
    pub max_substeps: u32,

    // === Audio (0.0 - 1.0) ===
    pub music_volume: f32,
    pub terminal_music_volume: f32,
    pub celebration_volume: f32,
    pub line_volume: f32,

    // === Animation ===
    pub rotate_time: f32,
    pub squash_time: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fade_duration: FADE_DURATION,
            death_duration: DEATH_DURATION,
            victory_duration: VICTORY_DURATION,

            camera_speed: CAMERA_SPEED,
            actor_velocity: Vec2::splat(ACTOR_SPEED),
            actor_size: Vec2::splat(ACTOR_SIZE),
            max_substeps: MAX_SUBSTEPS,

            music_volume: MUSIC_VOLUME,
            terminal_music_volume: TERMINAL_MUSIC_VOLUME,
            celebration_volume: CELEBRATION_VOLUME,
            line_volume: LINE_VOLUME,

            rotate_time: ROTATE_TIME,
            squash_time: SQUASH_TIME,
        }
    }
}

impl Settings {
    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {} - using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Theme music ceiling for a level
    pub fn music_ceiling(&self, terminal: bool) -> f32 {
        if terminal {
            self.terminal_music_volume
        } else {
            self.music_volume
        }
    }
}
