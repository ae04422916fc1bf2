//! Scene orchestrator
//!
//! Owns one level's worth of state and steps it in a fixed order each frame:
//!
//! 1. Fade timer, volumes and the level-wide decoration clocks
//! 2. Death timer
//! 3. Checkpoint capture, only while the camera is static
//! 4. Camera transition and motion
//! 5. Actor movement and collision
//! 6. Interactive objects against the actor's resolved position
//!
//! Steps 3-6 only run while the fade is holding (the celebration level runs
//! them throughout) and are suspended while the actor is dead.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

use super::actor::{Actor, ActorEvent};
use super::camera::Camera;
use super::fade::{Fade, SceneOutcome};
use super::grid::TileGrid;
use super::objects::Interactives;
use crate::audio::{AudioChannel, AudioOutput, SoundEffect};
use crate::consts::{RENDER_DEPTH, TIMER_EPSILON};
use crate::input::{KEY_ESCAPE, KeyCode, KeyState};
use crate::level::{LevelDesc, LevelError};
use crate::settings::Settings;

/// Last safe respawn framing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checkpoint {
    pub actor: Vec3,
    pub camera: Vec3,
    /// Actor velocity when captured; restored on respawn
    pub velocity: Vec2,
}

/// Channel volumes pushed to the audio output on the last update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Volumes {
    pub theme: f32,
    pub line: f32,
    pub celebration: f32,
}

/// One running level
#[derive(Debug)]
pub struct Scene {
    name: String,
    settings: Settings,
    grid: TileGrid,
    actor: Actor,
    interactives: Interactives,
    camera: Camera,
    checkpoint: Checkpoint,
    fade: Fade,

    /// Visible room extent (camera pan thresholds)
    room: Vec2,
    /// Celebration level
    terminal: bool,
    god_mode: bool,
    first_update: bool,

    /// Time left before respawn while the actor is dead
    death_remaining: Option<f32>,
    /// A checkpoint tile was entered and has not been captured yet
    checkpoint_pending: bool,
    outcome: Option<SceneOutcome>,
    /// Effects raised outside `update`, played on the next one
    queued_effects: Vec<SoundEffect>,

    volumes: Volumes,
    celebration_rotation: f32,
    victory_time: f32,
    level_time: f32,
}

impl Scene {
    /// Validate a level and build its scene
    pub fn new(level: &LevelDesc, settings: Settings) -> Result<Self, LevelError> {
        let grid = level.validate(settings.actor_size)?;
        let spawn = level.spawn.extend(RENDER_DEPTH);
        let actor = Actor::new(spawn, &settings);
        let camera = Camera::new(level.camera_center, level.camera_movement, settings.camera_speed);
        let checkpoint = Checkpoint {
            actor: spawn,
            camera: level.camera_center,
            velocity: actor.velocity(),
        };
        let interactives = level.interactives();

        log::info!(
            "Level '{}' built: {}x{} tiles, {} walls, {} hazards, {} buttons, {} switches{}",
            level.name,
            grid.width(),
            grid.height(),
            interactives.walls.len(),
            interactives.hazards.len(),
            interactives.buttons.len(),
            interactives.switches.len(),
            if level.terminal { " (celebration)" } else { "" },
        );

        Ok(Self {
            name: level.name.clone(),
            fade: Fade::new(settings.fade_duration),
            settings,
            grid,
            actor,
            interactives,
            camera,
            checkpoint,
            room: level.room_size,
            terminal: level.terminal,
            god_mode: false,
            first_update: true,
            death_remaining: None,
            checkpoint_pending: false,
            outcome: None,
            queued_effects: Vec::new(),
            volumes: Volumes::default(),
            celebration_rotation: 0.0,
            victory_time: 0.0,
            level_time: 0.0,
        })
    }

    // === Accessors ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn checkpoint(&self) -> Checkpoint {
        self.checkpoint
    }

    pub fn fade(&self) -> &Fade {
        &self.fade
    }

    pub fn interactives(&self) -> &Interactives {
        &self.interactives
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn is_dead(&self) -> bool {
        self.actor.is_dead()
    }

    pub fn god_mode(&self) -> bool {
        self.god_mode
    }

    /// Outcome reported when the closing fade finished
    pub fn outcome(&self) -> Option<SceneOutcome> {
        self.outcome
    }

    /// Opacity of the black overlay
    pub fn overlay_alpha(&self) -> f32 {
        self.fade.overlay_alpha()
    }

    pub fn volumes(&self) -> Volumes {
        self.volumes
    }

    /// Celebration spin angle (radians, wraps at 2π)
    pub fn celebration_rotation(&self) -> f32 {
        self.celebration_rotation
    }

    /// Decoration clock
    pub fn level_time(&self) -> f32 {
        self.level_time
    }

    // === Control ===

    pub fn set_god_mode(&mut self, enabled: bool) {
        if self.god_mode != enabled {
            log::debug!("God mode {}", if enabled { "on" } else { "off" });
        }
        self.god_mode = enabled;
    }

    /// Start the closing fade; the outcome is reported when it completes
    pub fn request_fade_out(&mut self, outcome: SceneOutcome) {
        if self.fade.request_out(outcome) {
            log::info!("Fade-out requested: {:?}", outcome);
        }
    }

    /// Discrete key press from the host
    pub fn key_pressed(&mut self, key: KeyCode, keys: &dyn KeyState) {
        if key == KEY_ESCAPE {
            self.request_fade_out(SceneOutcome::ReturnToMenu);
            return;
        }
        if self.outcome.is_some() || !self.gameplay_active() {
            return;
        }
        if let Some(ActorEvent::Reversed) = self.actor.key_pressed(key, keys) {
            self.queued_effects.push(SoundEffect::Reverse);
        }
    }

    fn gameplay_active(&self) -> bool {
        self.fade.is_holding() || self.terminal
    }

    /// Step one frame. Returns the outcome on the frame the closing fade
    /// completes; after that the scene no longer changes.
    pub fn update(&mut self, dt: f32, audio: &mut dyn AudioOutput) -> Option<SceneOutcome> {
        if self.outcome.is_some() {
            return None;
        }
        let dt = if self.first_update {
            self.first_update = false;
            0.0
        } else {
            dt
        };

        for effect in self.queued_effects.drain(..) {
            audio.play(effect);
        }

        // 1. Timers
        if let Some(outcome) = self.fade.advance(dt) {
            self.finish(outcome, audio);
            return Some(outcome);
        }
        self.apply_volumes(audio);
        self.advance_decorations(dt);

        // 2. Death
        if let Some(remaining) = self.death_remaining {
            let remaining = remaining - dt;
            if remaining <= TIMER_EPSILON {
                self.respawn();
            } else {
                self.death_remaining = Some(remaining);
                // Kill sequence animation only
                self.actor.update(dt, &self.grid, &mut self.interactives, self.god_mode);
            }
            return None;
        }

        if !self.gameplay_active() {
            return None;
        }

        // 3. Checkpoint capture
        if self.checkpoint_pending && self.camera.is_static() {
            self.checkpoint_pending = false;
            self.checkpoint = Checkpoint {
                actor: self.actor.position(),
                camera: self.camera.position,
                velocity: self.actor.velocity(),
            };
            audio.play(SoundEffect::Checkpoint);
            log::info!("Checkpoint captured at {:?}", self.checkpoint.actor);
        }

        // 4. Camera
        self.camera.update(
            dt,
            self.actor.position(),
            self.actor.size(),
            self.room,
            self.terminal,
        );

        // 5. Actor
        let events = self.actor.update(dt, &self.grid, &mut self.interactives, self.god_mode);
        for event in events {
            self.handle_event(event, audio);
        }
        if self.death_remaining.is_some() {
            return None;
        }

        // 6. Objects
        self.interactives
            .update(dt, self.actor.position(), self.actor.size());

        None
    }

    /// Level clocks that run every frame, dead or alive, fading or not
    fn advance_decorations(&mut self, dt: f32) {
        self.level_time += dt;
        if !self.terminal {
            return;
        }
        self.celebration_rotation = (self.celebration_rotation + dt * 0.5).rem_euclid(TAU);
        if !self.fade.is_fading_out() {
            self.victory_time += dt;
            if self.victory_time >= self.settings.victory_duration {
                self.request_fade_out(SceneOutcome::LevelComplete);
            }
        }
    }

    fn handle_event(&mut self, event: ActorEvent, audio: &mut dyn AudioOutput) {
        match event {
            ActorEvent::TileBounce(_) => audio.play(SoundEffect::TileHit),
            ActorEvent::WallBounce(_) => audio.play(SoundEffect::WallHit),
            ActorEvent::ButtonPressed(_) => audio.play(SoundEffect::Button),
            ActorEvent::SwitchTouched(_) => audio.play(SoundEffect::Switch),
            ActorEvent::Reversed => audio.play(SoundEffect::Reverse),
            ActorEvent::Died => {
                audio.play(SoundEffect::Death);
                log::info!("Actor died at {:?}", self.actor.position());
                self.death_remaining = Some(self.settings.death_duration);
            }
            ActorEvent::CheckpointReached(_) => self.checkpoint_pending = true,
            ActorEvent::GoalReached => self.request_fade_out(SceneOutcome::LevelComplete),
        }
    }

    fn respawn(&mut self) {
        self.death_remaining = None;
        // A signal raised before death must not capture the death framing,
        // but the tile has to signal again once re-entered
        if self.checkpoint_pending {
            self.checkpoint_pending = false;
            self.actor.forget_checkpoint();
        }
        self.actor.set_dead(false);
        self.actor.set_position(self.checkpoint.actor);
        self.actor.set_velocity(self.checkpoint.velocity);
        self.camera.reset(self.checkpoint.camera);
        log::info!("Respawned at {:?}", self.checkpoint.actor);
    }

    fn apply_volumes(&mut self, audio: &mut dyn AudioOutput) {
        let progress = self.fade.progress();
        if self.fade.is_fading_out() {
            self.actor
                .set_line_volume(self.settings.line_volume * progress);
        }

        self.volumes = Volumes {
            theme: progress * self.settings.music_ceiling(self.terminal),
            line: self.actor.line_volume(),
            celebration: if self.terminal {
                progress * self.settings.celebration_volume
            } else {
                0.0
            },
        };

        audio.set_volume(AudioChannel::Theme, self.volumes.theme);
        audio.set_volume(AudioChannel::Line, self.volumes.line);
        if self.terminal {
            audio.set_volume(AudioChannel::Celebration, self.volumes.celebration);
        }
    }

    fn finish(&mut self, outcome: SceneOutcome, audio: &mut dyn AudioOutput) {
        self.actor.set_line_volume(0.0);
        self.volumes = Volumes::default();
        audio.stop(AudioChannel::Theme);
        audio.stop(AudioChannel::Line);
        if self.terminal {
            audio.stop(AudioChannel::Celebration);
        }
        self.outcome = Some(outcome);
        log::info!("Level '{}' finished: {:?}", self.name, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{HeldKeys, KEY_SPACE};
    use crate::sim::camera::CamMove;

    #[derive(Default)]
    struct RecordingAudio {
        theme: Vec<f32>,
        celebration: Vec<f32>,
        stopped: Vec<AudioChannel>,
        played: Vec<SoundEffect>,
    }

    impl AudioOutput for RecordingAudio {
        fn set_volume(&mut self, channel: AudioChannel, volume: f32) {
            match channel {
                AudioChannel::Theme => self.theme.push(volume),
                AudioChannel::Celebration => self.celebration.push(volume),
                AudioChannel::Line => {}
            }
        }

        fn stop(&mut self, channel: AudioChannel) {
            self.stopped.push(channel);
        }

        fn play(&mut self, effect: SoundEffect) {
            self.played.push(effect);
        }
    }

    fn level(row: &str) -> LevelDesc {
        LevelDesc {
            name: "test".into(),
            rows: vec![
                "############".into(),
                "#..........#".into(),
                row.into(),
                "#..........#".into(),
                "#..........#".into(),
                "############".into(),
            ],
            tile_size: 1.0,
            spawn: Vec2::new(2.0, 2.1),
            room_size: Vec2::new(12.0, 6.0),
            camera_center: Vec3::new(6.0, 3.0, 10.0),
            camera_movement: Vec2::new(12.0, 6.0),
            terminal: false,
            style: 0,
            walls: Vec::new(),
            hazards: Vec::new(),
            buttons: Vec::new(),
            switches: Vec::new(),
        }
    }

    fn settings(velocity: Vec2) -> Settings {
        Settings {
            fade_duration: 0.5,
            actor_velocity: velocity,
            ..Default::default()
        }
    }

    /// First update plus a full fade-in
    fn settle(scene: &mut Scene, audio: &mut RecordingAudio) {
        scene.update(0.0, audio);
        scene.update(0.5, audio);
        assert!(scene.fade().is_holding());
    }

    #[test]
    fn test_first_update_uses_zero_dt() {
        let mut scene = Scene::new(&level("#..........#"), settings(Vec2::ZERO)).unwrap();
        let mut audio = RecordingAudio::default();
        scene.update(5.0, &mut audio);
        assert_eq!(scene.overlay_alpha(), 1.0);
        assert_eq!(scene.level_time(), 0.0);
    }

    #[test]
    fn test_gameplay_waits_for_fade_in() {
        let mut scene = Scene::new(&level("#..........#"), settings(Vec2::new(1.0, 0.0))).unwrap();
        let mut audio = RecordingAudio::default();
        let spawn = scene.actor().position();

        scene.update(0.0, &mut audio);
        scene.update(0.25, &mut audio);
        assert_eq!(scene.actor().position(), spawn);

        scene.update(0.25, &mut audio);
        assert!(scene.fade().is_holding());
        assert!((scene.actor().position().x - 2.25).abs() < 1e-5);
    }

    #[test]
    fn test_theme_volume_ramps_to_ceiling() {
        let mut scene = Scene::new(&level("#..........#"), settings(Vec2::ZERO)).unwrap();
        let mut audio = RecordingAudio::default();
        scene.update(0.0, &mut audio);
        for _ in 0..8 {
            scene.update(0.1, &mut audio);
        }
        assert!(audio.theme.windows(2).all(|w| w[1] >= w[0]));
        assert_eq!(audio.theme.last().copied(), Some(0.5));
        assert!(audio.celebration.is_empty());
    }

    #[test]
    fn test_death_respawns_at_checkpoint() {
        let mut scene = Scene::new(&level("#......^...#"), settings(Vec2::new(4.0, 0.0))).unwrap();
        let mut audio = RecordingAudio::default();
        let checkpoint = scene.checkpoint();
        settle(&mut scene, &mut audio);

        let mut frames = 0;
        while !scene.is_dead() {
            scene.update(0.1, &mut audio);
            frames += 1;
            assert!(frames < 20);
        }
        assert!(audio.played.contains(&SoundEffect::Death));
        let frozen = scene.actor().position();

        for _ in 0..3 {
            scene.update(0.25, &mut audio);
            assert!(scene.is_dead());
            assert_eq!(scene.actor().position(), frozen);
        }
        scene.update(0.25, &mut audio);

        assert!(!scene.is_dead());
        assert_eq!(scene.actor().position(), checkpoint.actor);
        assert_eq!(scene.actor().velocity(), Vec2::new(4.0, 0.0));
        assert_eq!(scene.camera().position, checkpoint.camera);
        assert_eq!(scene.camera().state(), CamMove::Static);
    }

    #[test]
    fn test_checkpoint_not_captured_while_panning() {
        let mut settings = settings(Vec2::ZERO);
        settings.camera_speed = 1.0;
        let mut scene = Scene::new(&level("#..C.......#"), settings).unwrap();
        let mut audio = RecordingAudio::default();
        let initial = scene.checkpoint();
        settle(&mut scene, &mut audio);

        // Start a long pan, then stand on the checkpoint tile
        let size = scene.actor().size();
        scene.camera.update(0.0, Vec3::new(100.0, 2.1, 0.0), size, scene.room, false);
        assert_eq!(scene.camera().state(), CamMove::Right);
        scene.actor.set_position(Vec3::new(3.0, 2.1, 0.0));

        for _ in 0..10 {
            scene.update(0.1, &mut audio);
            assert_eq!(scene.checkpoint(), initial);
        }
        assert!(scene.checkpoint_pending);

        // Camera settles: exactly one capture
        scene.camera.reset(Vec3::new(6.0, 3.0, 10.0));
        scene.update(0.1, &mut audio);
        let captured = scene.checkpoint();
        assert_eq!(captured.actor, Vec3::new(3.0, 2.1, 0.0));
        assert_eq!(captured.camera, Vec3::new(6.0, 3.0, 10.0));
        assert!(!scene.checkpoint_pending);

        for _ in 0..10 {
            scene.update(0.1, &mut audio);
        }
        assert_eq!(scene.checkpoint(), captured);
        let captures = audio.played.iter().filter(|e| **e == SoundEffect::Checkpoint).count();
        assert_eq!(captures, 1);
    }

    #[test]
    fn test_checkpoint_reentered_after_death_is_captured() {
        let mut settings = settings(Vec2::ZERO);
        settings.camera_speed = 1.0;
        let mut scene = Scene::new(&level("#..C...^...#"), settings).unwrap();
        let mut audio = RecordingAudio::default();
        let initial = scene.checkpoint();
        settle(&mut scene, &mut audio);

        let size = scene.actor().size();
        scene.camera.update(0.0, Vec3::new(100.0, 2.1, 0.0), size, scene.room, false);
        scene.actor.set_position(Vec3::new(3.0, 2.1, 0.0));
        scene.update(0.1, &mut audio);
        assert!(scene.checkpoint_pending);

        // Die before the pan ends
        scene.actor.set_position(Vec3::new(7.0, 2.1, 0.0));
        scene.update(0.1, &mut audio);
        assert!(scene.is_dead());
        for _ in 0..4 {
            scene.update(0.25, &mut audio);
        }
        assert!(!scene.is_dead());
        assert!(scene.camera().is_static());
        assert_eq!(scene.checkpoint(), initial);

        // Back on the same tile: signalled again, captured once
        scene.actor.set_position(Vec3::new(3.0, 2.1, 0.0));
        for _ in 0..5 {
            scene.update(0.1, &mut audio);
        }
        assert_eq!(scene.checkpoint().actor, Vec3::new(3.0, 2.1, 0.0));
        let captures = audio.played.iter().filter(|e| **e == SoundEffect::Checkpoint).count();
        assert_eq!(captures, 1);
    }

    #[test]
    fn test_death_freezes_pan_until_respawn() {
        let mut settings = settings(Vec2::ZERO);
        settings.camera_speed = 1.0;
        let mut scene = Scene::new(&level("#......^...#"), settings).unwrap();
        let mut audio = RecordingAudio::default();
        let checkpoint = scene.checkpoint();
        settle(&mut scene, &mut audio);

        let size = scene.actor().size();
        scene.camera.update(0.0, Vec3::new(100.0, 2.1, 0.0), size, scene.room, false);
        scene.actor.set_position(Vec3::new(7.0, 2.1, 0.0));
        scene.update(0.1, &mut audio);
        assert!(scene.is_dead());
        assert_eq!(scene.camera().state(), CamMove::Right);

        let frozen = scene.camera().position;
        let remaining = scene.camera().remaining();
        for _ in 0..3 {
            scene.update(0.25, &mut audio);
            assert!(scene.is_dead());
            assert_eq!(scene.camera().position, frozen);
            assert_eq!(scene.camera().remaining(), remaining);
            assert_eq!(scene.camera().state(), CamMove::Right);
        }

        scene.update(0.25, &mut audio);
        assert!(!scene.is_dead());
        assert_eq!(scene.camera().state(), CamMove::Static);
        assert_eq!(scene.camera().position, checkpoint.camera);
        assert_eq!(scene.camera().remaining(), 0.0);
    }

    #[test]
    fn test_level_time_runs_through_fades_and_death() {
        let mut scene = Scene::new(&level("#......^...#"), settings(Vec2::new(4.0, 0.0))).unwrap();
        let mut audio = RecordingAudio::default();
        scene.update(0.0, &mut audio);
        scene.update(0.25, &mut audio);
        assert!(!scene.fade().is_holding());
        assert_eq!(scene.level_time(), 0.25);

        scene.update(0.25, &mut audio);
        while !scene.is_dead() {
            scene.update(0.1, &mut audio);
        }
        let before = scene.level_time();
        scene.update(0.25, &mut audio);
        assert!(scene.is_dead());
        assert!((scene.level_time() - before - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_god_mode_survives_spikes() {
        let mut scene = Scene::new(&level("#.^........#"), settings(Vec2::ZERO)).unwrap();
        let mut audio = RecordingAudio::default();
        scene.set_god_mode(true);
        assert!(scene.god_mode());
        settle(&mut scene, &mut audio);

        scene.actor.set_position(Vec3::new(2.0, 2.1, 0.0));
        scene.update(0.1, &mut audio);
        assert!(!scene.is_dead());

        scene.set_god_mode(false);
        scene.update(0.1, &mut audio);
        assert!(scene.is_dead());
    }

    #[test]
    fn test_escape_returns_to_menu() {
        let mut scene = Scene::new(&level("#..........#"), settings(Vec2::ZERO)).unwrap();
        let mut audio = RecordingAudio::default();
        settle(&mut scene, &mut audio);

        scene.key_pressed(KEY_ESCAPE, &HeldKeys::new());
        assert!(scene.fade().is_fading_out());
        assert_eq!(scene.update(0.25, &mut audio), None);
        assert!((scene.actor().line_volume() - 0.25).abs() < 1e-5);
        assert_eq!(scene.update(0.25, &mut audio), Some(SceneOutcome::ReturnToMenu));

        assert_eq!(scene.outcome(), Some(SceneOutcome::ReturnToMenu));
        assert!(audio.stopped.contains(&AudioChannel::Theme));
        assert!(audio.stopped.contains(&AudioChannel::Line));
        assert_eq!(scene.actor().line_volume(), 0.0);

        // Nothing changes after the outcome
        let level_time = scene.level_time();
        assert_eq!(scene.update(0.25, &mut audio), None);
        assert_eq!(scene.level_time(), level_time);
    }

    #[test]
    fn test_goal_completes_level() {
        let mut scene = Scene::new(&level("#.......G..#"), settings(Vec2::new(4.0, 0.0))).unwrap();
        let mut audio = RecordingAudio::default();
        settle(&mut scene, &mut audio);
        assert!(!scene.fade().is_fading_out());

        let mut outcome = None;
        for _ in 0..40 {
            if let Some(reported) = scene.update(0.1, &mut audio) {
                outcome = Some(reported);
                break;
            }
        }
        assert_eq!(outcome, Some(SceneOutcome::LevelComplete));
        // Reached the goal column before fading
        assert!(scene.actor().position().x + scene.actor().size().x > 8.0);
    }

    #[test]
    fn test_action_key_ignored_during_fade_in() {
        let mut scene = Scene::new(&level("#..........#"), settings(Vec2::new(0.0, 2.0))).unwrap();
        let mut audio = RecordingAudio::default();
        let keys = HeldKeys::new();

        scene.key_pressed(KEY_SPACE, &keys);
        assert_eq!(scene.actor().velocity().y, 2.0);

        settle(&mut scene, &mut audio);
        scene.key_pressed(KEY_SPACE, &keys);
        assert!(scene.actor().velocity().y < 0.0);
        scene.update(0.01, &mut audio);
        assert!(audio.played.contains(&SoundEffect::Reverse));
    }

    #[test]
    fn test_celebration_level_runs_to_completion() {
        let mut desc = level("#..........#");
        desc.terminal = true;
        let mut settings = settings(Vec2::ZERO);
        settings.victory_duration = 1.0;
        let mut scene = Scene::new(&desc, settings).unwrap();
        let mut audio = RecordingAudio::default();

        scene.update(0.0, &mut audio);
        // Runs during the fade-in
        scene.update(0.25, &mut audio);
        assert_eq!(scene.camera().state(), CamMove::Follow);
        assert!((scene.celebration_rotation() - 0.125).abs() < 1e-6);

        let mut outcome = None;
        for _ in 0..20 {
            if let Some(reported) = scene.update(0.25, &mut audio) {
                outcome = Some(reported);
                break;
            }
        }
        assert_eq!(outcome, Some(SceneOutcome::LevelComplete));
        assert!(audio.celebration.iter().any(|v| *v > 0.0));
        assert!(audio.stopped.contains(&AudioChannel::Celebration));
    }

    #[test]
    fn test_invalid_level_rejected() {
        let mut desc = level("#..........#");
        desc.spawn = Vec2::ZERO;
        assert!(matches!(
            Scene::new(&desc, Settings::default()),
            Err(LevelError::SpawnInsideSolid(_))
        ));
    }
}
