//! Tube Tempest headless runner
//!
//! Plays the demo autopilot for a fixed number of frames and logs what
//! happens. Usage: `tube-tempest [seed] [frames] [settings.json]`.

#![cfg_attr(target_arch = "wasm32", allow(dead_code, unused_imports))]

use tube_tempest::HighScores;
use tube_tempest::Settings;
use tube_tempest::sim::{Effects, FxEvent, GameEngine, GamePhase, RecordingSink, SoundEffect, TickInput};

const FRAME_DT: f32 = 1.0 / 60.0;

struct Args {
    seed: u64,
    frames: u32,
    settings_path: Option<String>,
}

fn parse_args() -> Args {
    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345);
    let frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 120);
    let settings_path = args.next();
    Args {
        seed,
        frames,
        settings_path,
    }
}

fn load_settings(path: Option<&str>) -> Settings {
    let Some(path) = path else {
        return Settings::default();
    };
    match std::fs::read_to_string(path) {
        Ok(json) => match Settings::from_json(&json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring {path}: {e}");
                Settings::default()
            }
        },
        Err(e) => {
            log::warn!("Could not read {path}: {e}");
            Settings::default()
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    let args = parse_args();
    log::info!("Tube Tempest (headless) seed {} for {} frames", args.seed, args.frames);

    let settings = load_settings(args.settings_path.as_deref());
    let recorder = RecordingSink::new();
    let mut engine = match GameEngine::new(args.seed, settings.clone()) {
        Ok(engine) => engine.with_effects(Effects::recording(&recorder)),
        Err(e) => {
            log::error!("Cannot start session: {e}");
            std::process::exit(1);
        }
    };

    let idle = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut high_scores = HighScores::new();
    let mut last_phase = engine.phase();
    let mut explosions = 0usize;
    let mut shots = 0usize;

    for _ in 0..args.frames {
        engine.update(&idle, settings.clamp_dt(FRAME_DT));

        for event in recorder.take() {
            match event {
                FxEvent::Explosion { .. } => explosions += 1,
                FxEvent::Sound(SoundEffect::Shoot) => shots += 1,
                _ => {}
            }
        }

        let phase = engine.phase();
        if phase != last_phase {
            log::debug!("{last_phase:?} -> {phase:?}");
            // Submit before autopilot restarts the next game
            if phase == GamePhase::GameOver {
                if let Some(result) = engine.final_result() {
                    high_scores.submit("CPU", result);
                }
            }
            last_phase = phase;
        }
    }

    let state = engine.state();
    log::info!(
        "Finished: {:?}, score {}, high {}, level {}, lives {}, {} shots, {} explosions",
        state.phase,
        state.score,
        state.high_score,
        state.levels.current_number() + 1,
        state.lives,
        shots,
        explosions
    );
    match high_scores.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize high scores: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Hosts drive `GameEngine` directly on the web
}
