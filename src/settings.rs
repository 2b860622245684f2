//! Game settings
//!
//! Loaded from JSON text supplied by the host; missing fields fall back to
//! the defaults in `consts`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::shapes::TubeDimensions;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings are not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Runtime configuration for one session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Tube placement ===
    /// Screen-space tube center
    pub tube_center: Vec2,
    pub outer_radius: f32,
    /// Inner radius as a fraction of the outer radius
    pub inner_ratio: f32,

    // === Rules ===
    pub starting_lives: u32,
    /// Extra life every this many points
    pub bonus_life_every: u64,
    /// Player speed in segments per second
    pub move_speed: f32,
    /// Seconds between player shots
    pub fire_rate: f32,
    /// Let enemies fire back (off in the classic rules)
    pub enemies_shoot: bool,

    // === Host ===
    /// Ceiling hosts should apply to frame deltas before ticking
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tube_center: Vec2::new(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            outer_radius: DEFAULT_OUTER_RADIUS,
            inner_ratio: DEFAULT_INNER_RATIO,

            starting_lives: STARTING_LIVES,
            bonus_life_every: BONUS_LIFE_EVERY,
            move_speed: PLAYER_MOVE_SPEED,
            fire_rate: PLAYER_FIRE_RATE,
            enemies_shoot: false,

            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        log::info!("Loaded settings");
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::Invalid(format!("{name} must be positive, got {value}")))
            }
        };

        positive("outer_radius", self.outer_radius)?;
        positive("move_speed", self.move_speed)?;
        positive("fire_rate", self.fire_rate)?;
        positive("max_frame_dt", self.max_frame_dt)?;
        if !(self.inner_ratio > 0.0 && self.inner_ratio < 1.0) {
            return Err(SettingsError::Invalid(format!(
                "inner_ratio must be in (0, 1), got {}",
                self.inner_ratio
            )));
        }
        if self.starting_lives == 0 {
            return Err(SettingsError::Invalid("starting_lives must be at least 1".into()));
        }
        if self.bonus_life_every == 0 {
            return Err(SettingsError::Invalid("bonus_life_every must be at least 1".into()));
        }
        if !self.tube_center.is_finite() {
            return Err(SettingsError::Invalid("tube_center must be finite".into()));
        }
        Ok(())
    }

    pub fn tube_dimensions(&self) -> TubeDimensions {
        TubeDimensions::new(
            self.tube_center,
            self.outer_radius * self.inner_ratio,
            self.outer_radius,
        )
    }

    /// Apply the recommended frame-delta ceiling
    pub fn clamp_dt(&self, dt: f32) -> f32 {
        dt.clamp(0.0, self.max_frame_dt)
    }
}
