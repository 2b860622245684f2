//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied frame delta only
//! - Seeded RNG only
//! - Stable iteration order (reverse index over live collections)
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod enemy;
pub mod engine;
pub mod entity;
pub mod error;
pub mod input;
pub mod level;
pub mod palette;
pub mod player;
pub mod projectile;
pub mod rng;
pub mod shapes;
pub mod state;
pub mod tick;
pub mod tube;

pub use collision::{
    circle_intersects_line, collides, distance_to_line_segment, line_segment_intersection,
    point_near_line,
};
pub use effects::{AudioSink, Effects, FxEvent, NullSink, ParticleSink, RecordingSink, SoundEffect};
pub use enemy::{Behavior, Enemy, EnemyKind};
pub use engine::GameEngine;
pub use entity::{Body, Entity};
pub use error::{GeometryError, SetupError};
pub use input::{HeldButtons, InputTracker, TickInput};
pub use level::{EnemyCounts, Level, LevelManager};
pub use palette::Color;
pub use player::{Player, SuperZapper, ZapMode};
pub use projectile::Projectile;
pub use rng::GameRng;
pub use shapes::{TubeDimensions, TubeShape, create_level_tube};
pub use state::{FinalResult, GamePhase, GameState};
pub use tick::{start_game, tick};
pub use tube::{Side, Tube, TubeSegment};
