//! Spiker: climbs to a random height, then retreats laying a spike

use serde::{Deserialize, Serialize};

use super::{BehaviorCtx, climb};
use crate::sim::entity::Body;
use crate::sim::rng::GameRng;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpikerState {
    pub descending: bool,
    /// Depth at which the Spiker turns back (0.8 - 0.95)
    pub turn_depth: f32,
}

impl SpikerState {
    pub fn new(rng: &mut GameRng) -> Self {
        Self {
            descending: false,
            turn_depth: rng.range(0.8, 0.95),
        }
    }
}

pub(super) fn update(body: &mut Body, state: &mut SpikerState, speed: f32, ctx: &mut BehaviorCtx) {
    if state.descending {
        body.depth -= speed * ctx.dt;
        ctx.tube.segment_mut(body.segment).raise_spike(body.depth);
        if body.depth <= 0.0 {
            body.alive = false;
        }
    } else {
        climb(body, speed, ctx.dt);
        if body.depth >= state.turn_depth {
            state.descending = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::enemy::{Behavior, Enemy, EnemyKind};
    use crate::sim::shapes::{TubeDimensions, TubeShape};

    #[test]
    fn test_lays_spike_and_expires() {
        let mut rng = GameRng::new(5);
        let mut tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let mut spiker = Enemy::spawn(EnemyKind::Spiker, 7, 0.0, &mut rng);
        let turn_depth = match &spiker.behavior {
            Behavior::Spiker(state) => state.turn_depth,
            _ => unreachable!(),
        };

        let mut ticks = 0;
        while spiker.body.alive && ticks < 1000 {
            let mut ctx = BehaviorCtx {
                dt: 0.05,
                tube: &mut tube,
                player_segment: 0,
                rng: &mut rng,
            };
            spiker.update_behavior(&mut ctx);
            // No spike is laid on the way up
            if let Behavior::Spiker(state) = &spiker.behavior {
                if !state.descending {
                    assert!(!tube.segment(7).has_spike());
                }
            }
            ticks += 1;
        }

        assert!(!spiker.body.alive);
        let spike = tube.segment(7).spike_depth();
        assert!(spike > 0.7 && spike <= turn_depth + 0.02, "spike {spike}");
        assert!(!tube.segment(6).has_spike());
        assert!(!tube.segment(8).has_spike());
    }
}
