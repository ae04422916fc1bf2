//! Audio output interface
//!
//! The scene never talks to a sound engine directly. Every frame it pushes
//! channel volumes through [`AudioOutput`]; the host maps channels onto
//! whatever engine it uses.

/// Long-running channels whose volume the scene drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioChannel {
    /// Level theme music
    Theme,
    /// Actor "line" hum
    Line,
    /// Fireworks layer (celebration level only)
    Celebration,
}

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Actor bounced off tile geometry
    TileHit,
    /// Actor bounced off a wall object
    WallHit,
    /// Button pressed
    Button,
    /// Actor started touching a switch
    Switch,
    /// Actor killed
    Death,
    /// Checkpoint captured
    Checkpoint,
    /// Action key reversed the actor
    Reverse,
}

/// Sink for the scene's audio decisions
pub trait AudioOutput {
    /// Set a channel volume (0.0 - 1.0)
    fn set_volume(&mut self, channel: AudioChannel, volume: f32);

    /// Stop a channel for good
    fn stop(&mut self, channel: AudioChannel);

    /// Fire a one-shot effect
    fn play(&mut self, _effect: SoundEffect) {}
}

/// Audio output that discards everything (headless runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioOutput for NullAudio {
    fn set_volume(&mut self, _channel: AudioChannel, _volume: f32) {}

    fn stop(&mut self, _channel: AudioChannel) {}
}

/// Audio output that logs every call at trace level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioOutput for LogAudio {
    fn set_volume(&mut self, channel: AudioChannel, volume: f32) {
        log::trace!("volume {:?} = {:.3}", channel, volume);
    }

    fn stop(&mut self, channel: AudioChannel) {
        log::debug!("stop {:?}", channel);
    }

    fn play(&mut self, effect: SoundEffect) {
        log::debug!("play {:?}", effect);
    }
}
