//! The player's claw and the Super Zapper

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::palette::{self, Color};
use super::projectile::Projectile;
use super::tube::{Side, Tube};
use crate::consts::*;

/// Distance the movement accumulator must cover for one segment step
const MOVE_THRESHOLD: f32 = 1.0;

/// What a Super Zapper discharge destroys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZapMode {
    /// First use in a level: every active enemy
    All,
    /// Later uses: one random enemy
    Single,
}

/// The player (singleton, never removed, only reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Body,
    /// Segments per second while a move input is held
    pub move_speed: f32,
    pub fire_rate: f32,
    pub fire_cooldown: f32,
    pub super_zapper_charges: u32,
    /// Discharges used this level
    pub zaps_used: u32,
    pub invulnerable: bool,
    pub invulnerability_time: f32,
    move_accumulator: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self::new(PLAYER_MOVE_SPEED, PLAYER_FIRE_RATE)
    }
}

impl Player {
    pub fn new(move_speed: f32, fire_rate: f32) -> Self {
        Self {
            body: Body::new(0, 1.0),
            move_speed,
            fire_rate,
            fire_cooldown: 0.0,
            super_zapper_charges: SUPER_ZAPPER_CHARGES,
            zaps_used: 0,
            invulnerable: false,
            invulnerability_time: 0.0,
            move_accumulator: 0.0,
        }
    }

    /// Tick timers (fire cooldown, invulnerability)
    pub fn update(&mut self, dt: f32) {
        if self.fire_cooldown > 0.0 {
            self.fire_cooldown -= dt;
        }
        if self.invulnerability_time > 0.0 {
            self.invulnerability_time -= dt;
            if self.invulnerability_time <= 0.0 {
                self.invulnerable = false;
            }
        }
    }

    /// Step around the tube; `direction` is -1 (left) or 1 (right)
    pub fn move_along(&mut self, direction: i32, tube: &Tube, dt: f32) {
        self.move_accumulator += direction as f32 * self.move_speed * dt;

        while self.move_accumulator >= MOVE_THRESHOLD {
            self.body.segment = tube.adjacent(self.body.segment, 1);
            self.move_accumulator -= MOVE_THRESHOLD;
        }
        while self.move_accumulator <= -MOVE_THRESHOLD {
            self.body.segment = tube.adjacent(self.body.segment, -1);
            self.move_accumulator += MOVE_THRESHOLD;
        }
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown <= 0.0
    }

    pub fn fire(&mut self) -> Option<Projectile> {
        if !self.can_fire() {
            return None;
        }
        self.fire_cooldown = self.fire_rate;
        Some(Projectile::player_shot(self.body.segment))
    }

    pub fn can_use_super_zapper(&self) -> bool {
        self.super_zapper_charges > 0
    }

    /// Spend a charge; returns what the discharge destroys
    pub fn use_super_zapper(&mut self) -> Option<ZapMode> {
        if !self.can_use_super_zapper() {
            return None;
        }
        self.super_zapper_charges -= 1;
        let mode = if self.zaps_used == 0 { ZapMode::All } else { ZapMode::Single };
        self.zaps_used += 1;
        Some(mode)
    }

    pub fn reset_for_level(&mut self) {
        self.super_zapper_charges = SUPER_ZAPPER_CHARGES;
        self.zaps_used = 0;
        self.fire_cooldown = 0.0;
        self.move_accumulator = 0.0;
    }

    pub fn make_invulnerable(&mut self, duration: f32) {
        self.invulnerable = true;
        self.invulnerability_time = duration;
    }

    /// Seven-point claw outline for renderers
    pub fn claw_shape(&self, tube: &Tube) -> [Vec2; 7] {
        let segment = tube.segment(self.body.segment);
        let inner_center = segment.center_at_depth(0.85);
        let left = segment.outer_left();
        let right = segment.outer_right();

        [
            left,
            left.lerp(inner_center, 0.3),
            segment.point_at_depth(0.7, Side::Left).lerp(inner_center, 0.5),
            inner_center,
            segment.point_at_depth(0.7, Side::Right).lerp(inner_center, 0.5),
            right.lerp(inner_center, 0.3),
            right,
        ]
    }
}

impl Entity for Player {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        palette::PLAYER
    }
}

/// Screen flash left by a Super Zapper discharge
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuperZapper {
    pub active: bool,
    pub duration: f32,
}

impl SuperZapper {
    pub fn activate(&mut self) {
        self.active = true;
        self.duration = SUPER_ZAPPER_FLASH;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.active {
            return;
        }
        self.duration -= dt;
        if self.duration <= 0.0 {
            self.active = false;
            self.duration = 0.0;
        }
    }

    /// Flash strength in [0, 1]
    pub fn intensity(&self) -> f32 {
        self.duration / SUPER_ZAPPER_FLASH
    }

    pub fn color(&self) -> Color {
        palette::SUPER_ZAPPER.with_alpha((255.0 * self.intensity()) as u8)
    }
}
