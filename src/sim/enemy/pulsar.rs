//! Pulsar: climbs to the rim and periodically electrifies its lane

use serde::{Deserialize, Serialize};

use super::{BehaviorCtx, climb, is_at_top};
use crate::sim::entity::Body;
use crate::sim::rng::GameRng;

const ELECTRIFY_DURATION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PulsarPhase {
    Climbing,
    Idle,
    Electrifying,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PulsarState {
    pub phase: PulsarPhase,
    /// Time spent in the current discharge
    pub electrify_timer: f32,
    pub electrify_duration: f32,
    /// Countdown to the next discharge while idle
    pub cooldown: f32,
    /// Cooldown restored after each discharge (2 - 4 s)
    pub interval: f32,
}

impl PulsarState {
    pub fn new(rng: &mut GameRng) -> Self {
        let interval = rng.range(2.0, 4.0);
        Self {
            phase: PulsarPhase::Climbing,
            electrify_timer: 0.0,
            electrify_duration: ELECTRIFY_DURATION,
            cooldown: interval * rng.unit(),
            interval,
        }
    }

    pub fn is_electrifying(&self) -> bool {
        self.phase == PulsarPhase::Electrifying
    }
}

pub(super) fn update(body: &mut Body, state: &mut PulsarState, speed: f32, ctx: &mut BehaviorCtx) {
    match state.phase {
        PulsarPhase::Climbing => {
            climb(body, speed, ctx.dt);
            if is_at_top(body.depth) {
                state.phase = PulsarPhase::Idle;
            }
        }
        PulsarPhase::Idle => {
            state.cooldown -= ctx.dt;
            if state.cooldown <= 0.0 {
                state.phase = PulsarPhase::Electrifying;
                state.electrify_timer = 0.0;
            }
        }
        PulsarPhase::Electrifying => {
            state.electrify_timer += ctx.dt;
            let segment = ctx.tube.segment_mut(body.segment);
            segment.electrify(state.electrify_duration - state.electrify_timer);

            if state.electrify_timer >= state.electrify_duration {
                state.phase = PulsarPhase::Idle;
                state.electrify_timer = 0.0;
                state.cooldown = state.interval;
                segment.clear_electrification();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Behavior, Enemy, EnemyKind};
    use crate::sim::shapes::{TubeDimensions, TubeShape};
    use crate::sim::tube::Tube;

    fn step(enemy: &mut Enemy, tube: &mut Tube, rng: &mut GameRng, dt: f32) {
        let mut ctx = BehaviorCtx {
            dt,
            tube,
            player_segment: 0,
            rng,
        };
        enemy.update_behavior(&mut ctx);
    }

    #[test]
    fn test_electrifies_then_clears() {
        let mut rng = GameRng::new(8);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut pulsar = Enemy::spawn(EnemyKind::Pulsar, 9, 1.0, &mut rng);

        // Reach the rim, then arm a short cooldown
        step(&mut pulsar, &mut tube, &mut rng, 0.125);
        if let Behavior::Pulsar(state) = &mut pulsar.behavior {
            assert_eq!(state.phase, PulsarPhase::Idle);
            state.cooldown = 0.1;
        }
        step(&mut pulsar, &mut tube, &mut rng, 0.125);
        assert!(pulsar.is_electrifying());
        assert!(!tube.segment(9).is_electrified());

        for _ in 0..3 {
            step(&mut pulsar, &mut tube, &mut rng, 0.125);
            assert!(tube.segment(9).is_electrified());
        }
        assert!((tube.segment(9).electrification_time() - 0.125).abs() < 1e-6);

        step(&mut pulsar, &mut tube, &mut rng, 0.125);
        assert!(!tube.segment(9).is_electrified());
        assert!(!pulsar.is_electrifying());
    }

    #[test]
    fn test_removal_clears_lane() {
        let mut rng = GameRng::new(8);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut pulsar = Enemy::spawn(EnemyKind::Pulsar, 2, 1.0, &mut rng);
        if let Behavior::Pulsar(state) = &mut pulsar.behavior {
            state.phase = PulsarPhase::Electrifying;
        }
        step(&mut pulsar, &mut tube, &mut rng, 0.125);
        assert!(tube.segment(2).is_electrified());

        pulsar.on_removed(&mut tube);
        assert!(!tube.segment(2).is_electrified());
    }

    #[test]
    fn test_cooldown_within_interval() {
        let mut rng = GameRng::new(21);
        for _ in 0..50 {
            let state = PulsarState::new(&mut rng);
            assert!((2.0..=4.0).contains(&state.interval));
            assert!(state.cooldown <= state.interval);
        }
    }
}
