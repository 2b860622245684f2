//! Game state and core simulation types
//!
//! Everything a renderer reads lives here; `tick` is the only writer.

use serde::{Deserialize, Serialize};

use super::enemy::Enemy;
use super::error::SetupError;
use super::level::{Level, LevelManager};
use super::player::{Player, SuperZapper};
use super::projectile::Projectile;
use super::rng::GameRng;
use super::tube::Tube;
use crate::consts::*;
use crate::settings::Settings;

/// Top-level phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen decoration, waiting for Start
    Attract,
    /// Active gameplay
    Playing,
    /// Player destroyed, respawn pending
    Dying,
    /// Level cleared, bonus shown
    LevelComplete,
    /// Flying down to the next level
    Warping,
    /// Out of lives, waiting for Start
    GameOver,
    /// Game is paused
    Paused,
}

impl GamePhase {
    /// Length of timed phases in seconds
    pub fn duration(&self) -> Option<f32> {
        match self {
            GamePhase::Dying => Some(DEATH_DELAY),
            GamePhase::LevelComplete => Some(LEVEL_COMPLETE_DELAY),
            GamePhase::Warping => Some(WARP_DELAY),
            _ => None,
        }
    }
}

/// Outcome of a finished game, for high-score submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalResult {
    pub score: u64,
    /// Level reached (1-based)
    pub level: u32,
}

/// Complete game state for one session (deterministic for a given seed)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: GameRng,
    pub settings: Settings,
    /// Current phase
    pub phase: GamePhase,
    /// Seconds spent in the current timed phase
    pub state_timer: f32,
    /// Normalized progress through the current timed phase (0-1)
    pub state_progress: f32,
    pub score: u64,
    pub high_score: u64,
    pub lives: u32,
    /// Bonus awarded for the most recently completed level
    pub level_bonus: u64,
    /// Seconds of unpaused simulation
    pub game_time: f32,
    pub levels: LevelManager,
    pub player: Player,
    pub super_zapper: SuperZapper,
    /// Live enemies (each with a unique id)
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub spawn_timer: f32,
    pub spawn_interval: f32,
    /// Waves attempted this level
    pub current_wave: u32,
    /// Quota enemies spawned this level (Tanker splits excluded)
    pub enemies_spawned: u32,
    pub enemies_killed: u32,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// New session in Attract with level 0 loaded
    pub fn new(seed: u64, settings: Settings) -> Result<Self, SetupError> {
        settings.validate()?;
        let levels = LevelManager::new(settings.tube_dimensions())?;
        let spawn_interval = levels.current().spawn_interval();
        Ok(Self {
            seed,
            rng: GameRng::new(seed),
            player: Player::new(settings.move_speed, settings.fire_rate),
            lives: settings.starting_lives,
            settings,
            phase: GamePhase::Attract,
            state_timer: 0.0,
            state_progress: 0.0,
            score: 0,
            high_score: 0,
            level_bonus: 0,
            game_time: 0.0,
            levels,
            super_zapper: SuperZapper::default(),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            spawn_timer: 0.0,
            spawn_interval,
            current_wave: 0,
            enemies_spawned: 0,
            enemies_killed: 0,
            next_id: 1,
        })
    }

    /// Default settings
    pub fn with_seed(seed: u64) -> Result<Self, SetupError> {
        Self::new(seed, Settings::default())
    }

    pub fn level(&self) -> &Level {
        self.levels.current()
    }

    pub fn tube(&self) -> &Tube {
        self.levels.current().tube()
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take ownership of a freshly created enemy
    pub fn adopt_enemy(&mut self, mut enemy: Enemy) {
        enemy.id = self.next_entity_id();
        enemy.can_shoot = self.settings.enemies_shoot;
        self.enemies.push(enemy);
    }

    /// Credit a kill's points; returns true if it earned a bonus life.
    ///
    /// At most one life per call, even if `points` spans several thresholds.
    pub fn award_points(&mut self, points: u64) -> bool {
        self.score += points;
        self.high_score = self.high_score.max(self.score);

        let every = self.settings.bonus_life_every.max(1);
        let earned = self.score / every > (self.score - points) / every;
        if earned {
            self.lives += 1;
            log::info!("Bonus life at {} points ({} lives)", self.score, self.lives);
        }
        earned
    }

    /// Level-clear bonus: zapper charges left plus spike-free lanes
    pub fn compute_level_bonus(&self) -> u64 {
        self.player.super_zapper_charges as u64 * BONUS_PER_ZAPPER_CHARGE
            + self.tube().spike_free_count() as u64 * BONUS_PER_CLEAR_SEGMENT
    }

    /// Score and level of a finished game
    pub fn final_result(&self) -> Option<FinalResult> {
        (self.phase == GamePhase::GameOver).then(|| FinalResult {
            score: self.score,
            level: self.levels.current_number() + 1,
        })
    }
}
