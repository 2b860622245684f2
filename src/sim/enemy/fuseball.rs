//! Fuseball: rides the rim, hopping one lane every 0.15 s

use serde::{Deserialize, Serialize};

use super::BehaviorCtx;
use crate::sim::entity::Body;
use crate::sim::rng::GameRng;

const HOP_INTERVAL: f32 = 0.15;
const PULSE_RATE: f32 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FuseballState {
    /// -1 or 1
    pub direction: i32,
    pub hop_timer: f32,
    pub pulse_phase: f32,
}

impl FuseballState {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            direction: rng.sign(),
            hop_timer: 0.0,
            pulse_phase: 0.0,
        }
    }

    pub fn pulse_scale(&self) -> f32 {
        1.0 + self.pulse_phase.sin() * 0.2
    }
}

pub(super) fn update(body: &mut Body, state: &mut FuseballState, ctx: &mut BehaviorCtx) {
    body.depth = 1.0;
    state.pulse_phase += ctx.dt * PULSE_RATE;
    state.hop_timer += ctx.dt;

    if state.hop_timer >= HOP_INTERVAL {
        state.hop_timer = 0.0;

        let mut next = ctx.tube.adjacent(body.segment, state.direction);
        // Bounce off the ends of an open tube
        if ctx.tube.is_open() && next == body.segment {
            state.direction = -state.direction;
            next = ctx.tube.adjacent(body.segment, state.direction);
        }
        body.segment = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Behavior, Enemy, EnemyKind};
    use crate::sim::shapes::{TubeDimensions, TubeShape};
    use crate::sim::tube::Tube;

    fn fuseball_at(segment: usize, direction: i32) -> (Enemy, GameRng) {
        let mut rng = GameRng::new(2);
        let mut enemy = Enemy::spawn(EnemyKind::Fuseball, segment, 0.0, &mut rng);
        enemy.behavior = Behavior::Fuseball(FuseballState {
            direction,
            hop_timer: 0.0,
            pulse_phase: 0.0,
        });
        (enemy, rng)
    }

    fn hop(enemy: &mut Enemy, tube: &mut Tube, rng: &mut GameRng) {
        let mut ctx = BehaviorCtx {
            dt: HOP_INTERVAL,
            tube,
            player_segment: 0,
            rng,
        };
        enemy.update_behavior(&mut ctx);
    }

    #[test]
    fn test_reverses_at_open_tube_end() {
        let mut tube = TubeShape::FlatV.build(&TubeDimensions::default()).unwrap();
        let last = tube.segment_count() - 1;
        let (mut enemy, mut rng) = fuseball_at(last, 1);

        hop(&mut enemy, &mut tube, &mut rng);
        assert_eq!(enemy.body.segment, last - 1);
        assert_eq!(enemy.body.depth, 1.0);
        match &enemy.behavior {
            Behavior::Fuseball(state) => assert_eq!(state.direction, -1),
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_wraps_on_closed_tube() {
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let (mut enemy, mut rng) = fuseball_at(15, 1);
        hop(&mut enemy, &mut tube, &mut rng);
        assert_eq!(enemy.body.segment, 0);
        hop(&mut enemy, &mut tube, &mut rng);
        assert_eq!(enemy.body.segment, 1);
    }

    #[test]
    fn test_waits_between_hops() {
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let (mut enemy, mut rng) = fuseball_at(3, -1);
        let mut ctx = BehaviorCtx {
            dt: 0.1,
            tube: &mut tube,
            player_segment: 0,
            rng: &mut rng,
        };
        enemy.update_behavior(&mut ctx);
        assert_eq!(enemy.body.segment, 3);
        assert!(enemy.pulse_scale() != 1.0);
    }
}
