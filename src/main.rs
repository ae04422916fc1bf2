//! Qomp3D headless runner
//!
//! Loads a level (and optional settings), steps the scene at a fixed rate
//! with a scripted action key, and logs what happens until the level
//! reports an outcome.
//!
//! Usage: `qomp3d [--god] [level.json] [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;
#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use qomp3d::input::{KEY_ESCAPE, KEY_SPACE};
#[cfg(not(target_arch = "wasm32"))]
use qomp3d::sim::{Scene, SceneOutcome};
#[cfg(not(target_arch = "wasm32"))]
use qomp3d::{HeldKeys, LevelDesc, LogAudio, Settings};

/// Fixed simulation rate of the runner
#[cfg(not(target_arch = "wasm32"))]
const FRAME_DT: f32 = 1.0 / 60.0;
/// Seconds between scripted action-key presses
#[cfg(not(target_arch = "wasm32"))]
const ACTION_INTERVAL: f32 = 1.3;
/// Give up and escape to the menu after this much simulated time
#[cfg(not(target_arch = "wasm32"))]
const MAX_RUN_TIME: f32 = 120.0;

#[cfg(not(target_arch = "wasm32"))]
const BUNDLED_LEVEL: &str = include_str!("../levels/level01.json");

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::init();
    log::info!("Qomp3D (headless) starting...");

    let (flags, paths): (Vec<String>, Vec<String>) =
        std::env::args().skip(1).partition(|arg| arg.starts_with("--"));
    let god_mode = flags.iter().any(|flag| flag == "--god");
    let mut args = paths.into_iter();
    let level = match args.next() {
        Some(path) => LevelDesc::load(Path::new(&path)),
        None => LevelDesc::from_json(BUNDLED_LEVEL),
    };
    let level = match level {
        Ok(level) => level,
        Err(e) => {
            log::error!("Cannot load level: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let settings = args
        .next()
        .map(|path| Settings::load(Path::new(&path)))
        .unwrap_or_default();

    let mut scene = match Scene::new(&level, settings) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Invalid level '{}': {}", level.name, e);
            return ExitCode::FAILURE;
        }
    };

    scene.set_god_mode(god_mode);
    if scene.god_mode() {
        log::info!("God mode enabled");
    }

    let outcome = run(&mut scene);
    log::info!("Outcome: {:?}", outcome);
    println!("{:?}", outcome);
    ExitCode::SUCCESS
}

/// Step the scene until it reports an outcome
#[cfg(not(target_arch = "wasm32"))]
fn run(scene: &mut Scene) -> SceneOutcome {
    let mut audio = LogAudio;
    let keys = HeldKeys::new();
    let mut elapsed = 0.0;
    let mut next_action = ACTION_INTERVAL;
    let mut deaths = 0u32;
    let mut was_dead = false;

    loop {
        if elapsed >= next_action {
            scene.key_pressed(KEY_SPACE, &keys);
            next_action += ACTION_INTERVAL;
        }
        if elapsed >= MAX_RUN_TIME && !scene.fade().is_fading_out() {
            log::info!("Run time limit reached, leaving level");
            scene.key_pressed(KEY_ESCAPE, &keys);
        }

        if let Some(outcome) = scene.update(FRAME_DT, &mut audio) {
            log::info!(
                "Level '{}' ended after {:.2}s with {} death(s)",
                scene.name(),
                elapsed,
                deaths
            );
            return outcome;
        }

        if scene.is_dead() && !was_dead {
            deaths += 1;
        }
        was_dead = scene.is_dead();
        elapsed += FRAME_DT;
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The headless runner is native only
}
