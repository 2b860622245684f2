//! Host-facing wrapper: one session plus its collaborators

use super::effects::{AudioSink, Effects, ParticleSink};
use super::error::{GeometryError, SetupError};
use super::input::{HeldButtons, InputTracker, TickInput};
use super::shapes::TubeDimensions;
use super::state::{FinalResult, GamePhase, GameState};
use super::tick::tick;
use crate::settings::Settings;

/// Owns the game state, the optional particle/audio sinks and the input
/// edge tracker. Renderers read through `state()`.
#[derive(Debug)]
pub struct GameEngine {
    state: GameState,
    effects: Effects,
    input: InputTracker,
}

impl GameEngine {
    pub fn new(seed: u64, settings: Settings) -> Result<Self, SetupError> {
        Ok(Self {
            state: GameState::new(seed, settings)?,
            effects: Effects::none(),
            input: InputTracker::new(),
        })
    }

    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    pub fn set_particle_sink(&mut self, sink: Box<dyn ParticleSink>) {
        self.effects.set_particles(sink);
    }

    pub fn set_audio_sink(&mut self, sink: Box<dyn AudioSink>) {
        self.effects.set_audio(sink);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    /// Advance one frame with already-derived input signals
    pub fn update(&mut self, input: &TickInput, dt: f32) {
        tick(&mut self.state, input, dt, &mut self.effects);
    }

    /// Advance one frame from raw held-button state
    pub fn update_held(&mut self, held: HeldButtons, dt: f32) {
        let input = self.input.update(held);
        self.update(&input, dt);
    }

    /// Pause or resume outside of the input stream (e.g. window focus loss)
    pub fn toggle_pause(&mut self) {
        self.state.phase = match self.state.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        };
        self.input.reset();
    }

    /// Rebuild tube geometry for a resized host
    pub fn update_dimensions(&mut self, dimensions: TubeDimensions) -> Result<(), GeometryError> {
        self.state.levels.update_dimensions(dimensions)
    }

    pub fn final_result(&self) -> Option<FinalResult> {
        self.state.final_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effects::{RecordingSink, SoundEffect};

    struct BrokenSpeaker;

    impl AudioSink for BrokenSpeaker {
        fn play(&mut self, _sound: SoundEffect) {
            panic!("device lost");
        }
    }

    #[test]
    fn test_held_start_only_triggers_once() {
        let mut engine = GameEngine::new(1, Settings::default()).unwrap();
        let held = HeldButtons {
            start: true,
            pause: true,
            ..Default::default()
        };
        // Start and pause edges arrive together; Attract only reacts to Start
        engine.update_held(held, 0.016);
        assert_eq!(engine.phase(), GamePhase::Playing);

        // Still held: no new pause edge
        engine.update_held(held, 0.016);
        assert_eq!(engine.phase(), GamePhase::Playing);

        engine.update_held(HeldButtons::default(), 0.016);
        engine.update_held(
            HeldButtons {
                pause: true,
                ..Default::default()
            },
            0.016,
        );
        assert_eq!(engine.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_toggle_pause() {
        let mut engine = GameEngine::new(1, Settings::default()).unwrap();
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Attract);

        engine.update(
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.016,
        );
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Paused);
        engine.toggle_pause();
        assert_eq!(engine.phase(), GamePhase::Playing);
    }

    #[test]
    fn test_sinks_receive_events() {
        let recorder = RecordingSink::new();
        let mut engine = GameEngine::new(1, Settings::default())
            .unwrap()
            .with_effects(Effects::recording(&recorder));
        engine.update(
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.016,
        );
        engine.update(
            &TickInput {
                fire: true,
                ..Default::default()
            },
            0.016,
        );
        assert_eq!(recorder.count_sound(SoundEffect::Shoot), 1);
    }

    #[test]
    fn test_broken_audio_does_not_stop_the_frame() {
        let recorder = RecordingSink::new();
        let mut engine = GameEngine::new(1, Settings::default())
            .unwrap()
            .with_effects(Effects::recording(&recorder));
        engine.set_audio_sink(Box::new(BrokenSpeaker));
        engine.update(
            &TickInput {
                start: true,
                ..Default::default()
            },
            0.016,
        );
        engine.update(
            &TickInput {
                fire: true,
                ..Default::default()
            },
            0.016,
        );

        assert!(!engine.effects.has_audio());
        assert!(engine.effects.has_particles());
        // Projectiles still advanced after the failed cue
        let shot = &engine.state().projectiles[0];
        assert!(shot.body.depth < crate::consts::PLAYER_SHOT_START_DEPTH);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = Settings {
            bonus_life_every: 0,
            ..Default::default()
        };
        assert!(matches!(GameEngine::new(1, settings), Err(SetupError::Settings(_))));
    }

    #[test]
    fn test_resize_keeps_session() {
        let mut engine = GameEngine::new(1, Settings::default()).unwrap();
        let dims = TubeDimensions::new(glam::Vec2::new(320.0, 240.0), 30.0, 200.0);
        engine.update_dimensions(dims).unwrap();
        assert!((engine.state().tube().outer_radius() - 200.0).abs() < 1e-3);
        assert_eq!(engine.phase(), GamePhase::Attract);
    }
}
