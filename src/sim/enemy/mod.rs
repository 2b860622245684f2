//! Enemies climbing the tube
//!
//! An `Enemy` carries the shared fields (lane, depth, points, speed, shooting)
//! and a `Behavior` payload holding the per-kind state machine. Each kind's
//! tick lives in its own module; `Enemy::update_behavior` dispatches to it.

pub mod flipper;
pub mod fuseball;
pub mod pulsar;
pub mod spiker;
pub mod tanker;

use serde::{Deserialize, Serialize};

use super::entity::{Body, Entity};
use super::palette::{self, Color};
use super::projectile::Projectile;
use super::rng::GameRng;
use super::tube::Tube;
use crate::consts::TOP_DEPTH;

pub use flipper::{FlipperPhase, FlipperState};
pub use fuseball::FuseballState;
pub use pulsar::{PulsarPhase, PulsarState};
pub use spiker::SpikerState;

/// Seconds between enemy shots when shooting is enabled
const SHOOT_RATE: f32 = 2.0;

/// The five enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Flipper,
    Tanker,
    Spiker,
    Fuseball,
    Pulsar,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 5] = [
        EnemyKind::Flipper,
        EnemyKind::Tanker,
        EnemyKind::Spiker,
        EnemyKind::Pulsar,
        EnemyKind::Fuseball,
    ];

    pub fn points(&self) -> u64 {
        match self {
            EnemyKind::Flipper => 150,
            EnemyKind::Tanker => 250,
            EnemyKind::Spiker => 50,
            EnemyKind::Fuseball => 750,
            EnemyKind::Pulsar => 200,
        }
    }

    /// Climb speed in depth units per second
    pub fn speed(&self) -> f32 {
        match self {
            EnemyKind::Flipper => 0.2,
            EnemyKind::Tanker => 0.1,
            EnemyKind::Spiker => 0.25,
            EnemyKind::Fuseball => 0.3,
            EnemyKind::Pulsar => 0.12,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Flipper => "flipper",
            EnemyKind::Tanker => "tanker",
            EnemyKind::Spiker => "spiker",
            EnemyKind::Fuseball => "fuseball",
            EnemyKind::Pulsar => "pulsar",
        }
    }
}

/// Per-kind behavior state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Behavior {
    Flipper(FlipperState),
    Tanker,
    Spiker(SpikerState),
    Fuseball(FuseballState),
    Pulsar(PulsarState),
}

/// What a behavior tick may read and write
pub struct BehaviorCtx<'a> {
    pub dt: f32,
    pub tube: &'a mut Tube,
    pub player_segment: usize,
    pub rng: &'a mut GameRng,
}

#[inline]
pub(crate) fn is_at_top(depth: f32) -> bool {
    depth >= TOP_DEPTH
}

/// Climb toward the rim, stopping at depth 1
#[inline]
pub(crate) fn climb(body: &mut Body, speed: f32, dt: f32) {
    body.depth = (body.depth + speed * dt).min(1.0);
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    /// Assigned by the game state on adoption
    pub id: u32,
    pub body: Body,
    pub points: u64,
    pub speed: f32,
    pub can_shoot: bool,
    pub shoot_cooldown: f32,
    pub shoot_rate: f32,
    pub behavior: Behavior,
}

impl Enemy {
    /// Create an enemy of `kind` in a lane. Fuseballs always sit on the rim.
    pub fn spawn(kind: EnemyKind, segment: usize, depth: f32, rng: &mut GameRng) -> Self {
        let (behavior, depth) = match kind {
            EnemyKind::Flipper => (Behavior::Flipper(FlipperState::new(rng)), depth),
            EnemyKind::Tanker => (Behavior::Tanker, depth),
            EnemyKind::Spiker => (Behavior::Spiker(SpikerState::new(rng)), depth),
            EnemyKind::Fuseball => (Behavior::Fuseball(FuseballState::new(rng)), 1.0),
            EnemyKind::Pulsar => (Behavior::Pulsar(PulsarState::new(rng)), depth),
        };
        Self {
            id: 0,
            body: Body::new(segment, depth),
            points: kind.points(),
            speed: kind.speed(),
            can_shoot: false,
            shoot_cooldown: 0.0,
            shoot_rate: SHOOT_RATE,
            behavior,
        }
    }

    pub fn kind(&self) -> EnemyKind {
        match self.behavior {
            Behavior::Flipper(_) => EnemyKind::Flipper,
            Behavior::Tanker => EnemyKind::Tanker,
            Behavior::Spiker(_) => EnemyKind::Spiker,
            Behavior::Fuseball(_) => EnemyKind::Fuseball,
            Behavior::Pulsar(_) => EnemyKind::Pulsar,
        }
    }

    pub fn is_at_top(&self) -> bool {
        is_at_top(self.body.depth)
    }

    /// Advance this enemy's state machine by one tick
    pub fn update_behavior(&mut self, ctx: &mut BehaviorCtx) {
        if self.shoot_cooldown > 0.0 {
            self.shoot_cooldown -= ctx.dt;
        }

        let speed = self.speed;
        match &mut self.behavior {
            Behavior::Flipper(state) => flipper::update(&mut self.body, state, speed, ctx),
            Behavior::Tanker => tanker::update(&mut self.body, speed, ctx),
            Behavior::Spiker(state) => spiker::update(&mut self.body, state, speed, ctx),
            Behavior::Fuseball(state) => fuseball::update(&mut self.body, state, ctx),
            Behavior::Pulsar(state) => pulsar::update(&mut self.body, state, speed, ctx),
        }
    }

    /// Fire a shot outward if this enemy may shoot and is off cooldown
    pub fn try_shoot(&mut self) -> Option<Projectile> {
        if !self.can_shoot || self.shoot_cooldown > 0.0 {
            return None;
        }
        self.shoot_cooldown = self.shoot_rate;
        Some(Projectile::enemy_shot(self.body.segment, self.body.depth + 0.05))
    }

    /// Kill this enemy by a player shot; returns any enemies it releases
    pub fn on_destroyed(&mut self, tube: &Tube, rng: &mut GameRng) -> Vec<Enemy> {
        self.body.alive = false;
        match self.behavior {
            Behavior::Tanker => tanker::split(&self.body, tube, rng),
            _ => Vec::new(),
        }
    }

    /// Release any hazard this enemy holds on its segment
    pub fn on_removed(&self, tube: &mut Tube) {
        if let Behavior::Pulsar(state) = &self.behavior {
            if state.is_electrifying() {
                tube.segment_mut(self.body.segment).clear_electrification();
            }
        }
    }

    /// Sideways render offset while a Flipper is mid-flip
    pub fn flip_offset(&self) -> f32 {
        match &self.behavior {
            Behavior::Flipper(state) => state.flip_offset(),
            _ => 0.0,
        }
    }

    /// Render scale for a Fuseball's pulse
    pub fn pulse_scale(&self) -> f32 {
        match &self.behavior {
            Behavior::Fuseball(state) => state.pulse_scale(),
            _ => 1.0,
        }
    }

    pub fn is_electrifying(&self) -> bool {
        matches!(&self.behavior, Behavior::Pulsar(state) if state.is_electrifying())
    }
}

impl Entity for Enemy {
    fn body(&self) -> &Body {
        &self.body
    }

    fn color(&self) -> Color {
        match self.kind() {
            EnemyKind::Flipper => palette::FLIPPER,
            EnemyKind::Tanker => palette::TANKER,
            EnemyKind::Spiker => palette::SPIKER,
            EnemyKind::Fuseball => palette::FUSEBALL,
            EnemyKind::Pulsar if self.is_electrifying() => palette::PULSAR_ACTIVE,
            EnemyKind::Pulsar => palette::PULSAR,
        }
    }
}
