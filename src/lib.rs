//! Tube Tempest - simulation core for a tube-shooter arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (tube geometry, enemies, collisions, game state)
//! - `settings`: Runtime configuration loaded from JSON
//! - `highscores`: In-memory leaderboard for finished games

pub mod highscores;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// Recommended ceiling for the frame delta handed to `tick`
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default tube geometry (host window 800x600)
    pub const DEFAULT_CENTER: (f32, f32) = (400.0, 300.0);
    pub const DEFAULT_OUTER_RADIUS: f32 = 280.0;
    /// Inner radius as a fraction of the outer radius
    pub const DEFAULT_INNER_RATIO: f32 = 0.15;

    /// Session defaults
    pub const STARTING_LIVES: u32 = 3;
    pub const BONUS_LIFE_EVERY: u64 = 20_000;

    /// Timed phases (seconds)
    pub const LEVEL_COMPLETE_DELAY: f32 = 3.0;
    pub const DEATH_DELAY: f32 = 2.0;
    pub const WARP_DELAY: f32 = 1.5;
    pub const RESPAWN_INVULNERABILITY: f32 = 2.0;

    /// Player
    pub const PLAYER_MOVE_SPEED: f32 = 8.0; // segments per second
    pub const PLAYER_FIRE_RATE: f32 = 0.1;
    pub const SUPER_ZAPPER_CHARGES: u32 = 2;
    pub const SUPER_ZAPPER_FLASH: f32 = 0.5;

    /// Projectiles
    pub const PLAYER_SHOT_START_DEPTH: f32 = 0.95;
    pub const PLAYER_SHOT_SPEED: f32 = 3.0;
    pub const ENEMY_SHOT_SPEED: f32 = 1.5;

    /// Collision thresholds (tube-space units)
    pub const DEFAULT_COLLISION_THRESHOLD: f32 = 15.0;
    pub const PROJECTILE_HIT_THRESHOLD: f32 = 20.0;

    /// Enemies reaching this depth are "at the top" of the tube
    pub const TOP_DEPTH: f32 = 0.95;
    /// Spikes taller than this kill the player
    pub const LETHAL_SPIKE_DEPTH: f32 = 0.9;

    /// Spawning
    pub const MAX_WAVE_SIZE: usize = 3;
    pub const BASE_MAX_ACTIVE: usize = 5;
    pub const SPAWN_DEPTH_SPREAD: f32 = 0.2;

    /// Level bonus
    pub const BONUS_PER_ZAPPER_CHARGE: u64 = 1000;
    pub const BONUS_PER_CLEAR_SEGMENT: u64 = 50;

    /// Particle counts for explosions
    pub const ENEMY_EXPLOSION_PARTICLES: u32 = 15;
    pub const ZAPPER_EXPLOSION_PARTICLES: u32 = 20;
    pub const PLAYER_EXPLOSION_PARTICLES: u32 = 30;
}

/// Clamp a depth value to the tube's [0, 1] range
#[inline]
pub fn clamp_depth(depth: f32) -> f32 {
    depth.clamp(0.0, 1.0)
}

/// Integer sign (-1, 0 or 1)
#[inline]
pub fn sign(value: i64) -> i32 {
    match value {
        v if v > 0 => 1,
        v if v < 0 => -1,
        _ => 0,
    }
}
