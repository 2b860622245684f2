//! Flipper: climbs, then hops lane to lane toward the player

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

use super::{BehaviorCtx, climb, is_at_top};
use crate::sim::entity::Body;
use crate::sim::rng::GameRng;

/// Flip progress per second (one flip takes 0.25 s)
const FLIP_RATE: f32 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FlipperPhase {
    Climbing,
    /// At the rim, waiting out `wait_interval`
    Waiting,
    Flipping { direction: i32, progress: f32 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlipperState {
    pub phase: FlipperPhase,
    pub wait_timer: f32,
    pub wait_interval: f32,
}

impl FlipperState {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            phase: FlipperPhase::Climbing,
            wait_timer: 0.0,
            wait_interval: rng.range(0.5, 2.0),
        }
    }

    /// Sideways offset (in lanes) for the flip animation
    pub fn flip_offset(&self) -> f32 {
        match self.phase {
            FlipperPhase::Flipping { direction, progress } => {
                (progress * PI).sin() * 0.5 * direction as f32
            }
            _ => 0.0,
        }
    }
}

pub(super) fn update(body: &mut Body, state: &mut FlipperState, speed: f32, ctx: &mut BehaviorCtx) {
    match state.phase {
        FlipperPhase::Climbing => {
            climb(body, speed, ctx.dt);
            if is_at_top(body.depth) {
                state.phase = FlipperPhase::Waiting;
                state.wait_timer = 0.0;
            }
        }
        FlipperPhase::Waiting => {
            state.wait_timer += ctx.dt;
            if state.wait_timer >= state.wait_interval {
                let direction = ctx.tube.shortest_direction(body.segment, ctx.player_segment);
                if direction != 0 {
                    state.phase = FlipperPhase::Flipping {
                        direction,
                        progress: 0.0,
                    };
                    state.wait_interval = ctx.rng.range(0.3, 0.8);
                } else {
                    state.wait_timer = 0.0;
                }
            }
        }
        FlipperPhase::Flipping { direction, progress } => {
            let progress = progress + ctx.dt * FLIP_RATE;
            if progress >= 1.0 {
                body.segment = ctx.tube.adjacent(body.segment, direction);
                state.phase = FlipperPhase::Waiting;
                state.wait_timer = 0.0;
            } else {
                state.phase = FlipperPhase::Flipping { direction, progress };
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

    fn step(enemy: &mut Enemy, tube: &mut Tube, rng: &mut GameRng, player_segment: usize, dt: f32) {
        let mut ctx = BehaviorCtx {
            dt,
            tube,
            player_segment,
            rng,
        };
        enemy.update_behavior(&mut ctx);
    }

    #[test]
    fn test_climbs_until_top() {
        let mut rng = GameRng::new(3);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut flipper = Enemy::spawn(EnemyKind::Flipper, 4, 0.0, &mut rng);
        step(&mut flipper, &mut tube, &mut rng, 0, 1.0);
        assert!((flipper.body.depth - 0.2).abs() < 1e-6);
        for _ in 0..8 {
            step(&mut flipper, &mut tube, &mut rng, 4, 0.5);
        }
        assert!(flipper.is_at_top());
        assert_eq!(flipper.body.segment, 4);
    }

    #[test]
    fn test_flips_toward_player_the_short_way() {
        let mut rng = GameRng::new(3);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut flipper = Enemy::spawn(EnemyKind::Flipper, 1, 1.0, &mut rng);
        // Player at 14 is three lanes away across the wrap
        for _ in 0..12 {
            step(&mut flipper, &mut tube, &mut rng, 14, 0.25);
        }
        let seg = flipper.body.segment;
        assert!(seg == 0 || seg == 15 || seg == 14, "moved to {seg}");
    }

    #[test]
    fn test_waits_when_on_player_lane() {
        let mut rng = GameRng::new(3);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut flipper = Enemy::spawn(EnemyKind::Flipper, 6, 1.0, &mut rng);
        for _ in 0..20 {
            step(&mut flipper, &mut tube, &mut rng, 6, 0.25);
        }
        assert_eq!(flipper.body.segment, 6);
        assert_eq!(flipper.flip_offset(), 0.0);
    }

    #[test]
    fn test_flip_offset_peaks_mid_flip() {
        let state = FlipperState {
            phase: FlipperPhase::Flipping {
                direction: -1,
                progress: 0.5,
            },
            wait_timer: 0.0,
            wait_interval: 1.0,
        };
        assert!((state.flip_offset() + 0.5).abs() < 1e-6);

        let mut rng = GameRng::new(9);
        let mut enemy = Enemy::spawn(EnemyKind::Flipper, 2, 1.0, &mut rng);
        enemy.behavior = Behavior::Flipper(state);
        assert!((enemy.flip_offset() + 0.5).abs() < 1e-6);
    }
}
