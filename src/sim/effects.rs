//! Particle and audio collaborators
//!
//! The simulation reports explosions, line bursts, warps and sound cues to
//! optional sinks. Sinks only observe: whether one is attached never changes
//! what the simulation does. A sink that panics is logged and detached.

use std::cell::RefCell;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use glam::Vec2;

use super::palette::Color;

/// Sound cues the simulation can request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Shoot,
    EnemyDeath,
    PlayerDeath,
    LevelComplete,
    SuperZapper,
    Warp,
}

/// Receives particle spawn requests. Every method defaults to a no-op.
pub trait ParticleSink {
    fn explosion(&mut self, _position: Vec2, _color: Color, _count: u32) {}
    fn line(&mut self, _start: Vec2, _end: Vec2, _color: Color, _count: u32) {}
    fn warp(&mut self, _center: Vec2, _radius: f32, _color: Color) {}
    /// Advance live particles (called once per non-paused tick)
    fn advance(&mut self, _dt: f32) {}
    /// Drop all live particles (level reset)
    fn clear(&mut self) {}
}

/// Receives sound cue requests
pub trait AudioSink {
    fn play(&mut self, _sound: SoundEffect) {}
}

/// Optional collaborator handles owned by the engine
#[derive(Default)]
pub struct Effects {
    particles: Option<Box<dyn ParticleSink>>,
    audio: Option<Box<dyn AudioSink>>,
}

impl std::fmt::Debug for Effects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effects")
            .field("particles", &self.particles.is_some())
            .field("audio", &self.audio.is_some())
            .finish()
    }
}

impl Effects {
    /// No collaborators attached
    pub fn none() -> Self {
        Self::default()
    }

    pub fn new(particles: Box<dyn ParticleSink>, audio: Box<dyn AudioSink>) -> Self {
        Self {
            particles: Some(particles),
            audio: Some(audio),
        }
    }

    pub fn set_particles(&mut self, sink: Box<dyn ParticleSink>) {
        self.particles = Some(sink);
    }

    pub fn set_audio(&mut self, sink: Box<dyn AudioSink>) {
        self.audio = Some(sink);
    }

    /// Attach one recorder as both sinks
    pub fn recording(recorder: &RecordingSink) -> Self {
        Self::new(Box::new(recorder.clone()), Box::new(recorder.clone()))
    }

    pub fn has_particles(&self) -> bool {
        self.particles.is_some()
    }

    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }

    pub fn explosion(&mut self, position: Vec2, color: Color, count: u32) {
        forward(&mut self.particles, "particle", |sink| sink.explosion(position, color, count));
    }

    pub fn line(&mut self, start: Vec2, end: Vec2, color: Color, count: u32) {
        forward(&mut self.particles, "particle", |sink| sink.line(start, end, color, count));
    }

    pub fn warp(&mut self, center: Vec2, radius: f32, color: Color) {
        forward(&mut self.particles, "particle", |sink| sink.warp(center, radius, color));
    }

    pub fn advance(&mut self, dt: f32) {
        forward(&mut self.particles, "particle", |sink| sink.advance(dt));
    }

    pub fn clear(&mut self) {
        forward(&mut self.particles, "particle", |sink| sink.clear());
    }

    pub fn play(&mut self, sound: SoundEffect) {
        forward(&mut self.audio, "audio", |sink| sink.play(sound));
    }
}

/// Call an attached sink, dropping it if the call panics
fn forward<S: ?Sized>(slot: &mut Option<Box<S>>, name: &str, call: impl FnOnce(&mut S)) {
    let Some(sink) = slot.as_mut() else {
        return;
    };
    if panic::catch_unwind(AssertUnwindSafe(|| call(&mut **sink))).is_err() {
        log::error!("{name} sink panicked, detaching it");
        *slot = None;
    }
}

/// One recorded collaborator call
#[derive(Debug, Clone, PartialEq)]
pub enum FxEvent {
    Explosion { position: Vec2, color: Color, count: u32 },
    Line { start: Vec2, end: Vec2, color: Color, count: u32 },
    Warp { center: Vec2, radius: f32, color: Color },
    Clear,
    Sound(SoundEffect),
}

/// Sink that records every call; clones share one log
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    log: Rc<RefCell<Vec<FxEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<FxEvent> {
        self.log.borrow().clone()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<FxEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn sounds(&self) -> Vec<SoundEffect> {
        self.log
            .borrow()
            .iter()
            .filter_map(|event| match event {
                FxEvent::Sound(sound) => Some(*sound),
                _ => None,
            })
            .collect()
    }

    pub fn count_sound(&self, sound: SoundEffect) -> usize {
        self.sounds().into_iter().filter(|&s| s == sound).count()
    }

    fn push(&self, event: FxEvent) {
        self.log.borrow_mut().push(event);
    }
}

impl ParticleSink for RecordingSink {
    fn explosion(&mut self, position: Vec2, color: Color, count: u32) {
        self.push(FxEvent::Explosion {
            position,
            color,
            count,
        });
    }

    fn line(&mut self, start: Vec2, end: Vec2, color: Color, count: u32) {
        self.push(FxEvent::Line {
            start,
            end,
            color,
            count,
        });
    }

    fn warp(&mut self, center: Vec2, radius: f32, color: Color) {
        self.push(FxEvent::Warp {
            center,
            radius,
            color,
        });
    }

    fn clear(&mut self) {
        self.push(FxEvent::Clear);
    }
}

impl AudioSink for RecordingSink {
    fn play(&mut self, sound: SoundEffect) {
        self.push(FxEvent::Sound(sound));
    }
}

/// Explicit do-nothing collaborator
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ParticleSink for NullSink {}
impl AudioSink for NullSink {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::palette;

    #[test]
    fn test_missing_sinks_are_ignored() {
        let mut fx = Effects::none();
        fx.explosion(Vec2::ZERO, palette::PLAYER, 30);
        fx.play(SoundEffect::Shoot);
        fx.advance(0.1);
        fx.clear();
    }

    #[test]
    fn test_recording_sink_shares_log() {
        let recorder = RecordingSink::new();
        let mut fx = Effects::recording(&recorder);
        fx.play(SoundEffect::Shoot);
        fx.explosion(Vec2::new(1.0, 2.0), palette::FLIPPER, 15);
        fx.play(SoundEffect::EnemyDeath);
        fx.advance(0.1);

        assert_eq!(
            recorder.sounds(),
            vec![SoundEffect::Shoot, SoundEffect::EnemyDeath]
        );
        assert_eq!(recorder.count_sound(SoundEffect::Shoot), 1);
        let events = recorder.take();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[1], FxEvent::Explosion { count: 15, .. }));
        assert!(recorder.events().is_empty());
    }

    struct BrokenSpeaker;

    impl AudioSink for BrokenSpeaker {
        fn play(&mut self, _sound: SoundEffect) {
            panic!("device lost");
        }
    }

    #[test]
    fn test_panicking_sink_is_detached() {
        let recorder = RecordingSink::new();
        let mut fx = Effects::new(Box::new(recorder.clone()), Box::new(BrokenSpeaker));
        fx.play(SoundEffect::Shoot);
        assert!(!fx.has_audio());
        assert!(fx.has_particles());

        fx.play(SoundEffect::Warp);
        fx.explosion(Vec2::ZERO, palette::PLAYER, 30);
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_null_sink_accepts_everything() {
        let mut fx = Effects::new(Box::new(NullSink), Box::new(NullSink));
        fx.warp(Vec2::ZERO, 10.0, palette::PLAYER);
        fx.line(Vec2::ZERO, Vec2::ONE, palette::PLAYER, 5);
        fx.play(SoundEffect::Warp);
    }
}
