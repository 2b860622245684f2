//! Tanker: slow climber that splits into two Flippers when shot

use super::{BehaviorCtx, Enemy, EnemyKind, climb, is_at_top};
use crate::sim::entity::Body;
use crate::sim::rng::GameRng;
use crate::sim::tube::Tube;

pub(super) fn update(body: &mut Body, speed: f32, ctx: &mut BehaviorCtx) {
    if !is_at_top(body.depth) {
        climb(body, speed, ctx.dt);
    }
}

/// Flippers released on either side of a destroyed Tanker
pub(super) fn split(body: &Body, tube: &Tube, rng: &mut GameRng) -> Vec<Enemy> {
    [-1, 1]
        .into_iter()
        .map(|direction| {
            let segment = tube.adjacent(body.segment, direction);
            Enemy::spawn(EnemyKind::Flipper, segment, body.depth, rng)
        })
        .collect()
}
