//! Levels, difficulty scaling and wave composition

use super::enemy::{Enemy, EnemyKind};
use super::error::GeometryError;
use super::palette::{self, Color};
use super::rng::GameRng;
use super::shapes::{TubeDimensions, TubeShape};
use super::tube::Tube;
use crate::consts::*;

/// Per-kind enemy totals for one level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnemyCounts {
    pub flippers: u32,
    pub tankers: u32,
    pub spikers: u32,
    pub fuseballs: u32,
    pub pulsars: u32,
}

impl EnemyCounts {
    /// Difficulty curve for a 0-indexed level
    pub fn for_level(level: u32) -> Self {
        let n = level as i64;
        let scaled = |base: i64, cap: i64| base.max(0).min(cap) as u32;
        Self {
            flippers: scaled(4 + n, 20),
            tankers: scaled((n - 2) / 2, 8),
            spikers: scaled((n - 1) / 2, 6),
            fuseballs: scaled((n - 4) / 3, 4),
            pulsars: scaled((n - 3) / 3, 4),
        }
    }

    pub fn get(&self, kind: EnemyKind) -> u32 {
        match kind {
            EnemyKind::Flipper => self.flippers,
            EnemyKind::Tanker => self.tankers,
            EnemyKind::Spiker => self.spikers,
            EnemyKind::Fuseball => self.fuseballs,
            EnemyKind::Pulsar => self.pulsars,
        }
    }

    fn get_mut(&mut self, kind: EnemyKind) -> &mut u32 {
        match kind {
            EnemyKind::Flipper => &mut self.flippers,
            EnemyKind::Tanker => &mut self.tankers,
            EnemyKind::Spiker => &mut self.spikers,
            EnemyKind::Fuseball => &mut self.fuseballs,
            EnemyKind::Pulsar => &mut self.pulsars,
        }
    }

    pub fn total(&self) -> u32 {
        self.flippers + self.tankers + self.spikers + self.fuseballs + self.pulsars
    }

    /// Share of each quota available to a given wave.
    ///
    /// Flippers are front-loaded; Fuseballs and Pulsars only show up from
    /// waves 2 and 1 onward, trickling in one more per wave.
    pub fn remaining_for_wave(&self, wave: u32) -> Self {
        let w = wave;
        Self {
            flippers: self.flippers.saturating_sub(w.saturating_mul(2)),
            tankers: self.tankers.saturating_sub(w),
            spikers: self.spikers.saturating_sub(w),
            fuseballs: if w >= 2 { self.fuseballs.min(w - 1) } else { 0 },
            pulsars: if w >= 1 { self.pulsars.min(w) } else { 0 },
        }
    }
}

/// Weighted kind roll: 50% Flipper, 20% Tanker, 15% Spiker, 10% Pulsar, rest Fuseball
fn roll_kind(roll: u32) -> EnemyKind {
    match roll {
        0..50 => EnemyKind::Flipper,
        50..70 => EnemyKind::Tanker,
        70..85 => EnemyKind::Spiker,
        85..95 => EnemyKind::Pulsar,
        _ => EnemyKind::Fuseball,
    }
}

/// One level: its tube, color and enemy quota.
///
/// Only the tube's hazard state changes while the level is played.
#[derive(Debug, Clone)]
pub struct Level {
    pub number: u32,
    tube: Tube,
    pub color: Color,
    pub counts: EnemyCounts,
}

impl Level {
    pub fn new(number: u32, tube: Tube, color: Color, counts: EnemyCounts) -> Self {
        Self {
            number,
            tube,
            color,
            counts,
        }
    }

    pub fn tube(&self) -> &Tube {
        &self.tube
    }

    pub fn tube_mut(&mut self) -> &mut Tube {
        &mut self.tube
    }

    pub fn total_enemies(&self) -> u32 {
        self.counts.total()
    }

    /// Concurrent enemy cap for this level
    pub fn max_active(&self) -> usize {
        BASE_MAX_ACTIVE + self.number as usize
    }

    /// Seconds between wave attempts
    pub fn spawn_interval(&self) -> f32 {
        (2.0 - 0.1 * self.number as f32).max(0.5)
    }

    /// Draw up to `max_active` enemies for wave `wave`
    pub fn create_enemy_wave(&self, wave: u32, max_active: usize, rng: &mut GameRng) -> Vec<Enemy> {
        let mut remaining = self.counts.remaining_for_wave(wave);
        let to_spawn = max_active.min(remaining.total() as usize);

        let mut enemies = Vec::with_capacity(to_spawn);
        for _ in 0..to_spawn {
            let rolled = roll_kind(rng.percent());
            let kind = if remaining.get(rolled) > 0 {
                rolled
            } else {
                match EnemyKind::ALL.into_iter().find(|&k| remaining.get(k) > 0) {
                    Some(kind) => kind,
                    None => break,
                }
            };
            *remaining.get_mut(kind) -= 1;
            enemies.push(self.spawn_enemy(kind, rng));
        }
        enemies
    }

    /// Up to `count` Flippers, used when a wave's formula share runs dry
    pub fn backfill_wave(&self, count: usize, rng: &mut GameRng) -> Vec<Enemy> {
        (0..count)
            .map(|_| self.spawn_enemy(EnemyKind::Flipper, rng))
            .collect()
    }

    fn spawn_enemy(&self, kind: EnemyKind, rng: &mut GameRng) -> Enemy {
        let segment = rng.index(self.tube.segment_count());
        let depth = rng.unit() * SPAWN_DEPTH_SPREAD;
        Enemy::spawn(kind, segment, depth, rng)
    }
}

/// Builds levels from pre-validated shape templates
#[derive(Debug, Clone)]
pub struct LevelManager {
    dimensions: TubeDimensions,
    /// One tube per shape, indexed like `TubeShape::ALL`
    templates: Vec<Tube>,
    current: Level,
}

impl LevelManager {
    /// Validate every shape against `dimensions` and load level 0
    pub fn new(dimensions: TubeDimensions) -> Result<Self, GeometryError> {
        let templates = build_templates(&dimensions)?;
        let current = make_level(0, &templates);
        Ok(Self {
            dimensions,
            templates,
            current,
        })
    }

    pub fn dimensions(&self) -> TubeDimensions {
        self.dimensions
    }

    pub fn current(&self) -> &Level {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Level {
        &mut self.current
    }

    pub fn current_number(&self) -> u32 {
        self.current.number
    }

    /// Replace the current level with a fresh one (hazards cleared)
    pub fn load_level(&mut self, number: u32) -> &Level {
        self.current = make_level(number, &self.templates);
        log::info!(
            "Level {}: {} tube, {} enemies",
            number + 1,
            TubeShape::for_level(number).name(),
            self.current.total_enemies()
        );
        &self.current
    }

    pub fn next_level(&mut self) -> &Level {
        self.load_level(self.current.number + 1)
    }

    /// Regenerate geometry for a resized host; spikes and electrification survive
    pub fn update_dimensions(&mut self, dimensions: TubeDimensions) -> Result<(), GeometryError> {
        let templates = build_templates(&dimensions)?;
        let mut tube = templates[shape_slot(self.current.number)].clone();
        tube.copy_hazards_from(&self.current.tube);

        self.dimensions = dimensions;
        self.templates = templates;
        self.current.tube = tube;
        Ok(())
    }
}

fn build_templates(dimensions: &TubeDimensions) -> Result<Vec<Tube>, GeometryError> {
    TubeShape::ALL.iter().map(|shape| shape.build(dimensions)).collect()
}

fn shape_slot(level: u32) -> usize {
    let shape = TubeShape::for_level(level);
    TubeShape::ALL.iter().position(|&s| s == shape).unwrap_or(0)
}

fn make_level(number: u32, templates: &[Tube]) -> Level {
    Level::new(
        number,
        templates[shape_slot(number)].clone(),
        palette::level_color(number),
        EnemyCounts::for_level(number),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flipper_only_level() -> Level {
        let tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let counts = EnemyCounts {
            flippers: 4,
            ..Default::default()
        };
        Level::new(0, tube, palette::level_color(0), counts)
    }

    #[test]
    fn test_counts_scale_with_level() {
        assert_eq!(
            EnemyCounts::for_level(0),
            EnemyCounts {
                flippers: 4,
                ..Default::default()
            }
        );
        let l7 = EnemyCounts::for_level(7);
        assert_eq!(l7.flippers, 11);
        assert_eq!(l7.tankers, 2);
        assert_eq!(l7.spikers, 3);
        assert_eq!(l7.fuseballs, 1);
        assert_eq!(l7.pulsars, 1);

        let l100 = EnemyCounts::for_level(100);
        assert_eq!(
            l100,
            EnemyCounts {
                flippers: 20,
                tankers: 8,
                spikers: 6,
                fuseballs: 4,
                pulsars: 4,
            }
        );
        assert_eq!(l100.total(), 42);
    }

    #[test]
    fn test_flipper_only_wave() {
        let level = flipper_only_level();
        let mut rng = GameRng::new(77);
        for max_active in 0..8 {
            let wave = level.create_enemy_wave(0, max_active, &mut rng);
            assert_eq!(wave.len(), max_active.min(4));
            for enemy in &wave {
                assert_eq!(enemy.kind(), EnemyKind::Flipper);
                assert!(enemy.body.depth < SPAWN_DEPTH_SPREAD);
                assert!(enemy.body.segment < 16);
            }
        }
    }

    #[test]
    fn test_later_waves_thin_out_flippers() {
        let level = flipper_only_level();
        let mut rng = GameRng::new(77);
        assert_eq!(level.create_enemy_wave(1, 3, &mut rng).len(), 2);
        assert!(level.create_enemy_wave(2, 3, &mut rng).is_empty());
        assert_eq!(level.backfill_wave(2, &mut rng).len(), 2);
    }

    #[test]
    fn test_wave_respects_remaining_quotas() {
        let tube = TubeShape::Circle.build(&TubeDimensions::default()).unwrap();
        let level = Level::new(12, tube, palette::level_color(12), EnemyCounts::for_level(12));
        let mut rng = GameRng::new(5);
        for wave in 0..6 {
            let remaining = level.counts.remaining_for_wave(wave);
            let drawn = level.create_enemy_wave(wave, 3, &mut rng);
            assert!(drawn.len() <= 3);
            for kind in EnemyKind::ALL {
                let n = drawn.iter().filter(|e| e.kind() == kind).count() as u32;
                assert!(n <= remaining.get(kind), "{} wave {wave}", kind.name());
            }
        }
    }

    #[test]
    fn test_spawn_interval_floor() {
        let level = flipper_only_level();
        assert!((level.spawn_interval() - 2.0).abs() < 1e-6);
        let mut manager = LevelManager::new(TubeDimensions::default()).unwrap();
        manager.load_level(30);
        assert!((manager.current().spawn_interval() - 0.5).abs() < 1e-6);
        assert_eq!(manager.current().max_active(), 35);
    }

    #[test]
    fn test_levels_cycle_shapes() {
        let mut manager = LevelManager::new(TubeDimensions::default()).unwrap();
        assert_eq!(manager.current_number(), 0);
        assert_eq!(manager.current().tube().segment_count(), 16);

        manager.load_level(5);
        assert!(manager.current().tube().is_open());
        manager.next_level();
        assert_eq!(manager.current_number(), 6);
        assert!(!manager.current().tube().is_open());
        manager.load_level(13);
        assert!(manager.current().tube().is_open());
    }

    #[test]
    fn test_load_resets_hazards() {
        let mut manager = LevelManager::new(TubeDimensions::default()).unwrap();
        manager.current_mut().tube_mut().segment_mut(3).raise_spike(0.5);
        manager.load_level(0);
        assert_eq!(manager.current().tube().spike_free_count(), 16);
    }

    #[test]
    fn test_update_dimensions_keeps_hazards() {
        let mut manager = LevelManager::new(TubeDimensions::default()).unwrap();
        {
            let tube = manager.current_mut().tube_mut();
            tube.segment_mut(3).raise_spike(0.6);
            tube.segment_mut(7).electrify(0.2);
        }
        let resized = TubeDimensions::new(glam::Vec2::new(500.0, 400.0), 60.0, 400.0);
        manager.update_dimensions(resized).unwrap();

        let tube = manager.current().tube();
        assert!((tube.outer_radius() - 400.0).abs() < 1e-3);
        assert!((tube.segment(3).spike_depth() - 0.6).abs() < 1e-6);
        assert!(tube.segment(7).is_electrified());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let bad = TubeDimensions::new(glam::Vec2::ZERO, 100.0, 50.0);
        assert!(matches!(
            LevelManager::new(bad),
            Err(GeometryError::InvalidRadii { .. })
        ));

        let mut manager = LevelManager::new(TubeDimensions::default()).unwrap();
        assert!(manager.update_dimensions(bad).is_err());
        assert_eq!(manager.dimensions(), TubeDimensions::default());
    }
}
