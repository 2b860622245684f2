//! Shared entity fields
//!
//! Every game object lives in one lane at one depth. Entities never hold
//! references into the tube, only a segment index resolved through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::palette::Color;
use super::tube::Tube;

/// Lane position and liveness
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub segment: usize,
    /// 0 = tube center (far), 1 = outer rim (player plane)
    pub depth: f32,
    pub alive: bool,
}

impl Body {
    pub fn new(segment: usize, depth: f32) -> Self {
        Self {
            segment,
            depth,
            alive: true,
        }
    }

    /// Tube-space position of this body
    pub fn position(&self, tube: &Tube) -> Vec2 {
        tube.position(self.segment, self.depth)
    }
}

/// Capability set shared by the player, enemies and projectiles
pub trait Entity {
    fn body(&self) -> &Body;
    fn color(&self) -> Color;

    fn segment(&self) -> usize {
        self.body().segment
    }

    fn depth(&self) -> f32 {
        self.body().depth
    }

    fn is_alive(&self) -> bool {
        self.body().alive
    }

    fn position(&self, tube: &Tube) -> Vec2 {
        self.body().position(tube)
    }
}
