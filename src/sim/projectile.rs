//! Shots travelling along a lane

use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::palette::{self, Color};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub body: Body,
    /// Player shots fly inward and may hit enemies; enemy shots fly outward
    pub player_shot: bool,
    /// Depth units per second
    pub speed: f32,
}

impl Projectile {
    pub fn player_shot(segment: usize) -> Self {
        Self {
            body: Body::new(segment, PLAYER_SHOT_START_DEPTH),
            player_shot: true,
            speed: PLAYER_SHOT_SPEED,
        }
    }

    pub fn enemy_shot(segment: usize, depth: f32) -> Self {
        Self {
            body: Body::new(segment, depth),
            player_shot: false,
            speed: ENEMY_SHOT_SPEED,
        }
    }

    /// Advance along the lane; dies on leaving [0, 1]
    pub fn update(&mut self, dt: f32) {
        if self.player_shot {
            self.body.depth -= self.speed * dt;
            if self.body.depth <= 0.0 {
                self.body.alive = false;
            }
        } else {
            self.body.depth += self.speed * dt;
            if self.body.depth >= 1.0 {
                self.body.alive = false;
            }
        }
    }
}

impl Entity for Projectile {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        if self.player_shot {
            palette::PLAYER_SHOT
        } else {
            palette::ENEMY_SHOT
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_shot_flies_inward_and_expires() {
        let mut shot = Projectile::player_shot(3);
        shot.update(0.125);
        assert!(shot.body.depth < PLAYER_SHOT_START_DEPTH);
        assert!(shot.is_alive());
        shot.update(0.25);
        assert!(!shot.is_alive());
    }

    #[test]
    fn test_enemy_shot_flies_outward() {
        let mut shot = Projectile::enemy_shot(3, 0.5);
        shot.update(0.25);
        assert!(shot.body.depth > 0.5);
        shot.update(0.25);
        assert!(!shot.is_alive());
    }
}
