//! Qomp3D - runtime core of a tile-based 3D puzzle-platformer
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (tile collisions, interactive objects,
//!   actor controller, camera, fades, scene orchestration)
//! - `level`: Level descriptions handed over by the level loader
//! - `settings`: Data-driven timing and volume tuning
//! - `audio`: Audio output interface driven by the scene
//! - `input`: Raw key codes and held-key queries

pub mod audio;
pub mod input;
pub mod level;
pub mod settings;
pub mod sim;

pub use audio::{AudioChannel, AudioOutput, LogAudio, NullAudio, SoundEffect};
pub use input::{HeldKeys, KeyCode, KeyState};
pub use level::{LevelDesc, LevelError};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fade-in / fade-out duration (seconds)
    pub const FADE_DURATION: f32 = 0.75;
    /// Time the actor stays dead before respawning at the checkpoint (seconds)
    pub const DEATH_DURATION: f32 = 1.0;
    /// Time on the celebration level before the closing fade starts (seconds)
    pub const VICTORY_DURATION: f32 = 21.25;

    /// Camera pan speed (world units per second)
    pub const CAMERA_SPEED: f32 = 40.0;
    /// Actor starting velocity (world units per second, per axis)
    pub const ACTOR_SPEED: f32 = 6.0;
    /// Actor bounding box edge (world units)
    pub const ACTOR_SIZE: f32 = 0.8;
    /// Render-depth plane every gameplay position lives on
    pub const RENDER_DEPTH: f32 = 0.0;

    /// Theme music ceiling on regular levels
    pub const MUSIC_VOLUME: f32 = 0.5;
    /// Theme music ceiling on the celebration level
    pub const TERMINAL_MUSIC_VOLUME: f32 = 0.8;
    /// Fireworks layer ceiling on the celebration level
    pub const CELEBRATION_VOLUME: f32 = 1.0;
    /// Actor "line" hum volume
    pub const LINE_VOLUME: f32 = 0.5;

    /// Rotation animation after the action key (seconds)
    pub const ROTATE_TIME: f32 = 0.25;
    /// Squash animation after an impact (seconds)
    pub const SQUASH_TIME: f32 = 0.15;
    /// Death animation spin period (seconds per round)
    pub const DEATH_ROUND_TIME: f32 = 0.25;

    /// Maximum movement substeps per actor update
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Slack used when comparing accumulated timers against zero
    pub const TIMER_EPSILON: f32 = 1e-4;
}

/// Move `current` toward `target` by at most `max_step`
#[inline]
pub fn approach(current: f32, target: f32, max_step: f32) -> f32 {
    let delta = target - current;
    current + delta.clamp(-max_step, max_step)
}
